//! A course found on the portal dashboard.

use crate::error::PortalResult;
use crate::resource::Resource;
use crate::scrape;
use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::debug;

/// One course anchor from the dashboard. Holds the session's HTTP handle
/// and lazily loads its own page markup on first resource access.
pub struct Course {
    code: String,
    url: String,
    http: Client,
    page: OnceCell<String>,
    resources: OnceCell<Vec<Resource>>,
}

impl Course {
    pub(crate) fn new(code: String, url: String, http: Client) -> Self {
        Self {
            code,
            url,
            http,
            page: OnceCell::new(),
            resources: OnceCell::new(),
        }
    }

    /// Course code, e.g. `SOEN-363`.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The `id` query parameter of the course URL, when present.
    pub fn id(&self) -> Option<u64> {
        id_param(&self.url)
    }

    /// Course page markup, fetched once per instance and cached.
    pub async fn page(&self) -> PortalResult<&str> {
        self.page
            .get_or_try_init(|| async {
                debug!("fetching course page {}", self.url);
                let resp = self.http.get(&self.url).send().await?.error_for_status()?;
                Ok(resp.text().await?)
            })
            .await
            .map(|s| s.as_str())
    }

    /// The course's downloadable resources, in document order, computed
    /// once from the cached page. No deduplication.
    pub async fn resources(&self) -> PortalResult<&[Resource]> {
        self.resources
            .get_or_try_init(|| async {
                let page = self.page().await?;
                let list: Vec<Resource> = scrape::resource_links(page)
                    .into_iter()
                    .map(|href| Resource::new(href, self.http.clone()))
                    .collect();
                debug!("course {} has {} resource(s)", self.code, list.len());
                Ok(list)
            })
            .await
            .map(|v| v.as_slice())
    }
}

/// Parse the numeric `id` query parameter out of a portal URL.
pub(crate) fn id_param(raw: &str) -> Option<u64> {
    let parsed = url::Url::parse(raw).ok()?;
    parsed
        .query_pairs()
        .find(|(k, _)| k == "id")
        .and_then(|(_, v)| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_param() {
        assert_eq!(id_param("http://x/course/view.php?id=134469"), Some(134469));
        assert_eq!(id_param("http://x/mod/resource/view.php?foo=1&id=7"), Some(7));
        assert_eq!(id_param("http://x/course/view.php"), None);
        assert_eq!(id_param("not a url"), None);
    }
}
