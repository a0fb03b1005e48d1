//! Portal endpoint configuration.
//!
//! The login flow talks to four fixed addresses: the federation login
//! endpoint (an ADFS URL embedding a pre-signed SAML AuthnRequest), the
//! portal home, the dashboard (`home + "my/"`), and the Assertion
//! Consumer Service that finalizes the session. These are configuration
//! values, not computed — the defaults target Concordia's portal and each
//! can be overridden through `CAMPUSDL_*` environment variables.

/// ADFS login URL with the pre-signed AuthnRequest for the portal's
/// service provider. The signature covers the query string, so this is a
/// single opaque constant.
const DEFAULT_FEDERATION_URL: &str = "https://fas.concordia.ca/adfs/ls/?SAMLRequest=lZJfS8MwFMW%2FSsl7m%2FSPmwtbYTrEwdSxVR98kWuSukCb1NxU9NvbtYob6MC3cHJ%2F9557uFOEumr4vPU7s1GvrUIfvNeVQd5%2FzEjrDLeAGrmBWiH3gm%2FnNyueRIw3znorbEUOkNMEICrntTUkWC5m5InBKBuNk0mZSpaJcapKOZExTLJElaKMxylLk3ORjc4lCR6Uw46cka5RhyO2amnQg%2FGdxJI4ZGnIzgqW8mTEWfJIgkW3jTbge2rnfYOc0hIwEtYI66SGSAAFWSKtkJJg%2Fu3u0hpsa%2BW2yr1poe43qx%2B%2BtlZW6rjFoFHoUqT7EBKKzfAIQWDU7JrfMBKsvwK80EZq83I6u%2BehCPl1UazD9d22IPl0P4T3Wbj83w5r5UGCh73BKT1sNR3O4rYzsVysbaXFR3BlXQ3%2Bb49xFPeKlmHZl%2FLWYKOELrWShObDhONbyz8B&RelayState=https%3A%2F%2Fmoodle.concordia.ca%2Fmoodle%2Fauth%2Fsaml2%2Flogin.php%3Fwants%26idp%3D56f3be3eabcae573100b88c23d68c53e%26passive%3Doff&SigAlg=http%3A%2F%2Fwww.w3.org%2F2001%2F04%2Fxmldsig-more%23rsa-sha256&Signature=wlcGZg%2BNbPGxuhd4xnpbQDUzOxFXGyzxbNdjqIMyhRMHX6L9JFo5iR5cV34EYH6bun5TusJBpRvSWiif27vab9GK66smHR17q7cb%2BXmBEQcgiXAh72ZDfKYKs47Xq41pgltss1tQBzwkaN%2Fll%2BpTPDgjZBNIGZdtnEqmFBcXPrHsORplz%2FvC8tr7CYOiw3C1R%2FvRV%2FKPyzBHda%2BkdJ%2Bcm3UmbVPhU%2FCw92kQaLzRdQ0V%2Bf0Mq%2BpkVnOKGy%2BKP8pIzw2RWEyYj4czkRaP%2FX6PSlkYXKYGy12NyB%2FYfGZCpN9kfMjbAImc%2BnWSY8QplML0QdbuX3P2%2Fdg2DBvYv4NLZQ%3D%3D&client-request-id=cc2ef1e1-129b-436b-b226-008000000092";

const DEFAULT_HOME: &str = "https://moodle.concordia.ca/moodle/";

const DEFAULT_ACS_URL: &str =
    "https://moodle.concordia.ca:443/moodle/auth/saml2/sp/saml2-acs.php/moodle.concordia.ca";

const DEFAULT_AUTH_DOMAIN: &str = "concordia.ca";

/// The fixed address set for one portal deployment.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Portal home page, trailing slash included.
    pub home: String,
    /// Dashboard page, always `home + "my/"`.
    pub dashboard: String,
    /// Federation login endpoint with the embedded AuthnRequest.
    pub federation_login: String,
    /// Assertion Consumer Service endpoint.
    pub assertion_consumer: String,
    /// Windows domain prefixed to the username (`DOMAIN\user`).
    pub auth_domain: String,
}

impl Endpoints {
    /// Build an endpoint set. A missing trailing slash on `home` is
    /// normalized so the dashboard URL always derives cleanly.
    pub fn new(
        home: impl Into<String>,
        federation_login: impl Into<String>,
        assertion_consumer: impl Into<String>,
        auth_domain: impl Into<String>,
    ) -> Self {
        let mut home = home.into();
        if !home.ends_with('/') {
            home.push('/');
        }
        let dashboard = format!("{home}my/");
        Self {
            home,
            dashboard,
            federation_login: federation_login.into(),
            assertion_consumer: assertion_consumer.into(),
            auth_domain: auth_domain.into(),
        }
    }

    /// The production constants for Concordia's Moodle portal.
    pub fn concordia() -> Self {
        Self::new(
            DEFAULT_HOME,
            DEFAULT_FEDERATION_URL,
            DEFAULT_ACS_URL,
            DEFAULT_AUTH_DOMAIN,
        )
    }

    /// Concordia defaults with per-value `CAMPUSDL_*` environment
    /// overrides applied.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("CAMPUSDL_HOME").unwrap_or_else(|_| DEFAULT_HOME.to_string()),
            std::env::var("CAMPUSDL_FEDERATION_URL")
                .unwrap_or_else(|_| DEFAULT_FEDERATION_URL.to_string()),
            std::env::var("CAMPUSDL_ACS_URL").unwrap_or_else(|_| DEFAULT_ACS_URL.to_string()),
            std::env::var("CAMPUSDL_AUTH_DOMAIN")
                .unwrap_or_else(|_| DEFAULT_AUTH_DOMAIN.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_derives_from_home() {
        let e = Endpoints::new("http://portal.test/moodle/", "http://fas.test/", "http://portal.test/acs", "test.ca");
        assert_eq!(e.dashboard, "http://portal.test/moodle/my/");
    }

    #[test]
    fn test_missing_trailing_slash_is_normalized() {
        let e = Endpoints::new("http://portal.test/moodle", "f", "a", "d");
        assert_eq!(e.home, "http://portal.test/moodle/");
        assert_eq!(e.dashboard, "http://portal.test/moodle/my/");
    }

    #[test]
    fn test_concordia_defaults() {
        let e = Endpoints::concordia();
        assert!(e.home.ends_with("/moodle/"));
        assert_eq!(e.dashboard, format!("{}my/", e.home));
        assert!(e.federation_login.contains("SAMLRequest="));
        assert!(e.assertion_consumer.contains("saml2-acs.php"));
        assert_eq!(e.auth_domain, "concordia.ca");
    }
}
