// Copyright 2026 campusdl contributors
// SPDX-License-Identifier: Apache-2.0

//! Authenticated portal session.
//!
//! `PortalSession` owns the cookie-carrying HTTP client and the memoized
//! dashboard state. It is a cheap-clone handle (shared inner state) so
//! courses and resources can fan out across tasks while reading the same
//! authenticated cookie jar.

use crate::auth;
use crate::config::Endpoints;
use crate::course::Course;
use crate::error::PortalResult;
use crate::scrape;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Standard Chrome user-agent; ADFS occasionally rejects obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/131.0.0.0 Safari/537.36";

/// An authenticated session against one portal deployment.
#[derive(Clone)]
pub struct PortalSession {
    inner: Arc<Inner>,
}

struct Inner {
    http: Client,
    endpoints: Endpoints,
    username: String,
    dashboard: OnceCell<String>,
    courses: OnceCell<Vec<Course>>,
}

impl PortalSession {
    /// Execute the federation handshake and return an authenticated
    /// session. Fails with `PortalError::Auth` when any step produces
    /// unexpected content, `PortalError::Network` on transport failures.
    pub async fn login(
        endpoints: Endpoints,
        username: &str,
        password: &str,
    ) -> PortalResult<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        auth::handshake(&http, &endpoints, username, password).await?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                endpoints,
                username: username.to_string(),
                dashboard: OnceCell::new(),
                courses: OnceCell::new(),
            }),
        })
    }

    pub fn username(&self) -> &str {
        &self.inner.username
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    /// The session's HTTP handle. Clones share the cookie jar.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Dashboard markup, fetched once per session and cached for its
    /// lifetime. Repeat calls return the snapshot without a request.
    pub async fn dashboard(&self) -> PortalResult<&str> {
        self.inner
            .dashboard
            .get_or_try_init(|| async {
                debug!("fetching dashboard {}", self.inner.endpoints.dashboard);
                let resp = self
                    .inner
                    .http
                    .get(&self.inner.endpoints.dashboard)
                    .send()
                    .await?
                    .error_for_status()?;
                Ok(resp.text().await?)
            })
            .await
            .map(|s| s.as_str())
    }

    /// The dashboard's course list, computed once and reused. Every
    /// qualifying anchor yields one course; duplicates are preserved.
    pub async fn courses(&self) -> PortalResult<&[Course]> {
        self.inner
            .courses
            .get_or_try_init(|| async {
                let html = self.dashboard().await?;
                let list: Vec<Course> = scrape::course_links(html)
                    .into_iter()
                    .map(|link| Course::new(link.code, link.href, self.inner.http.clone()))
                    .collect();
                info!("found {} course(s) on dashboard", list.len());
                Ok(list)
            })
            .await
            .map(|v| v.as_slice())
    }

    /// Look a course up by dashboard id or by course code
    /// (case-insensitive). Returns `None` when no anchor matched.
    pub async fn find_course(&self, key: &str) -> PortalResult<Option<&Course>> {
        let id: Option<u64> = key.parse().ok();
        let courses = self.courses().await?;
        Ok(courses.iter().find(|c| {
            (id.is_some() && c.id() == id) || c.code().eq_ignore_ascii_case(key)
        }))
    }
}
