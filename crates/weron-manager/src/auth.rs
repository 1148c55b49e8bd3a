//! Strategies for attaching credentials to management API requests.

use std::fmt::{self, Debug, Formatter};

use base64::{Engine as _, engine::general_purpose};
use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;

use crate::credentials::Credentials;

/// Adds authentication material to an outgoing request.
///
/// The client only sees this trait, so alternate schemes (for example a token
/// obtained through an OIDC exchange) plug in without changing its contract.
pub trait CredentialAttacher: Debug + Send + Sync {
    /// Scheme name recorded in logs.
    fn scheme(&self) -> &'static str;

    /// Return the request with credentials attached.
    fn attach(&self, request: RequestBuilder) -> RequestBuilder;
}

/// HTTP basic authentication using resolved credentials.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    credentials: Credentials,
}

impl BasicAuth {
    /// Wrap resolved credentials.
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// `Authorization` header value for these credentials.
    #[must_use]
    pub fn header_value(&self) -> String {
        let raw = format!(
            "{}:{}",
            self.credentials.username(),
            self.credentials.password()
        );
        format!("Basic {}", general_purpose::STANDARD.encode(raw))
    }
}

impl CredentialAttacher for BasicAuth {
    fn scheme(&self) -> &'static str {
        "basic"
    }

    fn attach(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.header_value())
    }
}

/// Bearer token authentication for tokens acquired out of band.
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    /// Wrap an already-issued access token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// `Authorization` header value for this token.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl Debug for BearerToken {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BearerToken")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl CredentialAttacher for BearerToken {
    fn scheme(&self) -> &'static str {
        "bearer"
    }

    fn attach(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, self.header_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ManagerResult;
    use reqwest::Client;

    #[test]
    fn basic_auth_encodes_username_and_password() -> ManagerResult<()> {
        let auth = BasicAuth::new(Credentials::new("admin", "secret")?);
        assert_eq!(auth.header_value(), "Basic YWRtaW46c2VjcmV0");
        assert_eq!(auth.scheme(), "basic");
        Ok(())
    }

    #[test]
    fn attachers_set_the_authorization_header() -> Result<(), Box<dyn std::error::Error>> {
        let client = Client::new();
        let attachers: [Box<dyn CredentialAttacher>; 2] = [
            Box::new(BearerToken::new("token-123")),
            Box::new(BasicAuth::new(Credentials::new("admin", "secret")?)),
        ];
        let expected = ["Bearer token-123", "Basic YWRtaW46c2VjcmV0"];

        for (attacher, expected) in attachers.iter().zip(expected) {
            let request = attacher.attach(client.get("http://127.0.0.1/")).build()?;
            let header = request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());
            assert_eq!(header, Some(expected));
        }
        Ok(())
    }

    #[test]
    fn bearer_debug_hides_token() {
        let token = BearerToken::new("token-123");
        assert!(!format!("{token:?}").contains("token-123"));
        assert_eq!(token.scheme(), "bearer");
    }
}
