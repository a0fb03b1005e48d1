//! Federation login handshake.
//!
//! A fixed 3-step replay of the SAML2 web-browser SSO flow: post the
//! credentials to ADFS, pick the signed assertion out of the auto-submit
//! form the portal hands back, and deliver it to the Assertion Consumer
//! Service. The cookie jar on the shared client carries the session state
//! between steps; nothing mutates it after step 3 succeeds. One-shot —
//! a failed step is fatal and never retried.

use crate::config::Endpoints;
use crate::error::{PortalError, PortalResult};
use crate::scrape;
use reqwest::Client;
use tracing::{debug, info};

/// ADFS forms-authentication marker posted alongside the credentials.
const AUTH_METHOD: &str = "FormsAuthentication";

/// Run the handshake against `endpoints`, leaving `client`'s cookie jar
/// authenticated for all subsequent portal requests.
pub async fn handshake(
    client: &Client,
    endpoints: &Endpoints,
    username: &str,
    password: &str,
) -> PortalResult<()> {
    // Step 1: credentials to the federation endpoint. The response body is
    // an interstitial page we don't need; only the cookies matter.
    let account = format!("{}\\{}", endpoints.auth_domain, username);
    debug!("posting credentials to federation endpoint");
    let resp = client
        .post(&endpoints.federation_login)
        .form(&[
            ("UserName", account.as_str()),
            ("Password", password),
            ("AuthMethod", AUTH_METHOD),
        ])
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(PortalError::Auth(format!(
            "federation login returned HTTP {}",
            resp.status().as_u16()
        )));
    }

    // Step 2: the dashboard now serves an auto-submit form carrying the
    // signed assertion. An absent input means expired state or rejected
    // credentials — fail rather than post malformed data.
    debug!("fetching assertion form from {}", endpoints.dashboard);
    let page = client.get(&endpoints.dashboard).send().await?.text().await?;
    let assertion = scrape::saml_response(&page).ok_or_else(|| {
        PortalError::Auth("handshake page carries no SAMLResponse input".to_string())
    })?;

    // Step 3: deliver the assertion to the ACS endpoint with the portal
    // home as relay state.
    debug!("posting assertion to consumer service");
    let resp = client
        .post(&endpoints.assertion_consumer)
        .form(&[
            ("SAMLResponse", assertion.as_str()),
            ("RelayState", endpoints.home.as_str()),
        ])
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(PortalError::Auth(format!(
            "assertion consumer returned HTTP {}",
            resp.status().as_u16()
        )));
    }

    info!("authenticated against {} as {username}", endpoints.home);
    Ok(())
}
