//! CLI subcommand implementations for the campusdl binary.

pub mod courses_cmd;
pub mod download_cmd;
pub mod output;
pub mod resources_cmd;

use crate::config::Endpoints;
use crate::course::Course;
use crate::session::PortalSession;
use anyhow::{bail, Context, Result};
use std::io::Read;

/// Resolved portal credentials.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Resolve credentials from flags, falling back to `CAMPUSDL_USERNAME` /
/// `CAMPUSDL_PASSWORD`. `--password-stdin` reads one line from stdin and
/// wins over both.
pub fn resolve_credentials(
    username: Option<String>,
    password: Option<String>,
    password_stdin: bool,
) -> Result<Credentials> {
    let username = match username.or_else(|| std::env::var("CAMPUSDL_USERNAME").ok()) {
        Some(u) if !u.is_empty() => u,
        _ => bail!("no username; pass --username or set CAMPUSDL_USERNAME"),
    };

    let password = if password_stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read password from stdin")?;
        let line = buf.lines().next().unwrap_or("").to_string();
        if line.is_empty() {
            bail!("no password on stdin");
        }
        line
    } else {
        match password.or_else(|| std::env::var("CAMPUSDL_PASSWORD").ok()) {
            Some(p) if !p.is_empty() => p,
            _ => bail!("no password; pass --password, --password-stdin, or set CAMPUSDL_PASSWORD"),
        }
    };

    Ok(Credentials { username, password })
}

/// Log into the portal with the configured endpoints.
pub async fn connect(creds: &Credentials) -> Result<PortalSession> {
    let endpoints = Endpoints::from_env();
    PortalSession::login(endpoints, &creds.username, &creds.password)
        .await
        .context("portal login failed")
}

/// Resolve `--course` (dashboard id or course code) against the session's
/// course list.
pub async fn find_course<'a>(session: &'a PortalSession, key: &str) -> Result<&'a Course> {
    session
        .find_course(key)
        .await?
        .with_context(|| format!("course '{key}' not found on dashboard"))
}
