//! Error types for portal access and downloads.

/// Errors produced while authenticating, scraping, or downloading.
#[derive(thiserror::Error, Debug)]
pub enum PortalError {
    /// A handshake step returned unexpected content or status. Fatal for
    /// the whole session; the handshake is never retried.
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The response carried no usable `Content-Disposition` filename and
    /// the final URL had no path segment to fall back to.
    #[error("no filename derivable for {url}")]
    MissingFilename { url: String },
}

/// Convenience result type.
pub type PortalResult<T> = Result<T, PortalError>;
