//! A downloadable file attached to a course page.
//!
//! The save name comes from the HTTP response, not the URL: the portal
//! redirects resource views to the underlying file and names it through
//! `Content-Disposition`. Reading the name is therefore a side-effecting
//! first access, cached for the instance's lifetime.

use crate::course::id_param;
use crate::error::{PortalError, PortalResult};
use regex::Regex;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, Response};
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Write granularity for streamed downloads.
const CHUNK_CAPACITY: usize = 5 * 1024 * 1024;

/// One resource anchor from a course page, bound to the session's HTTP
/// handle. Safe to download concurrently with other resources of the same
/// session.
pub struct Resource {
    url: String,
    http: Client,
    name: OnceCell<String>,
}

impl Resource {
    pub(crate) fn new(url: String, http: Client) -> Self {
        Self {
            url,
            http,
            name: OnceCell::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The `id` query parameter of the resource URL, when present.
    pub fn id(&self) -> Option<u64> {
        id_param(&self.url)
    }

    /// The resource's save name. First access issues a GET and derives
    /// the name from the response; repeat calls are cache hits.
    pub async fn name(&self) -> PortalResult<&str> {
        self.name
            .get_or_try_init(|| async {
                debug!("probing resource name for {}", self.url);
                let resp = self.http.get(&self.url).send().await?.error_for_status()?;
                derive_name(&resp)
            })
            .await
            .map(|s| s.as_str())
    }

    /// Stream the resource to `dir` (created with parents when absent;
    /// defaults to the current directory) under `filename` or the derived
    /// name. Returns the number of bytes written. Runs independently of
    /// other downloads; cancellation leaves any partial file behind.
    pub async fn download(
        &self,
        dir: Option<&Path>,
        filename: Option<&str>,
    ) -> PortalResult<u64> {
        let mut resp = self.http.get(&self.url).send().await?.error_for_status()?;

        let name = match filename {
            Some(explicit) => explicit.to_string(),
            None => match self.name.get() {
                Some(cached) => cached.clone(),
                None => {
                    let derived = derive_name(&resp)?;
                    let _ = self.name.set(derived.clone());
                    derived
                }
            },
        };

        let dir = dir.unwrap_or_else(|| Path::new("."));
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&name);

        debug!("downloading {} -> {}", self.url, path.display());
        let file = tokio::fs::File::create(&path).await?;
        let mut writer = BufWriter::with_capacity(CHUNK_CAPACITY, file);

        let mut written = 0u64;
        while let Some(chunk) = resp.chunk().await? {
            if chunk.is_empty() {
                continue;
            }
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;

        info!("saved {} ({written} bytes)", path.display());
        Ok(written)
    }
}

/// Derive a save name from a resource response: the quoted
/// `Content-Disposition` filename, else the final URL's trailing path
/// segment (percent-decoded).
fn derive_name(resp: &Response) -> PortalResult<String> {
    if let Some(value) = resp
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
    {
        if let Some(name) = disposition_filename(value) {
            return Ok(name);
        }
    }
    trailing_segment(resp.url()).ok_or_else(|| PortalError::MissingFilename {
        url: resp.url().to_string(),
    })
}

/// The quoted `filename="..."` value of a `Content-Disposition` header.
fn disposition_filename(value: &str) -> Option<String> {
    let re = Regex::new(r#"filename="([^"]+)""#).expect("disposition regex is valid");
    re.captures(value).map(|caps| caps[1].to_string())
}

/// Last non-empty path segment of a URL, percent-decoded.
fn trailing_segment(url: &url::Url) -> Option<String> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).next_back()?;
    let decoded = urlencoding::decode(segment).ok()?.into_owned();
    (!decoded.is_empty()).then_some(decoded)
}
