//! HTTP client for the management API's community listing.

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::CredentialAttacher;
use crate::cancel::Cancellation;
use crate::error::{ManagerError, ManagerResult};
use crate::model::{Community, ManagerDefaults};

/// Request identifier header attached to every call.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

const BODY_EXCERPT_LIMIT: usize = 256;

/// Tunables for the underlying HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Timeout for the whole round trip.
    pub timeout: Duration,
}

impl ClientOptions {
    /// Options derived from injected defaults.
    #[must_use]
    pub const fn from_defaults(defaults: &ManagerDefaults) -> Self {
        Self {
            timeout: defaults.timeout,
        }
    }
}

/// Stateless client bound to one management API address.
pub struct ManagerClient {
    http: Client,
    remote: Url,
    attacher: Arc<dyn CredentialAttacher>,
    request_id: String,
}

impl Debug for ManagerClient {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ManagerClient")
            .field("remote", &self.remote.as_str())
            .field("attacher", &self.attacher)
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}

impl ManagerClient {
    /// Build a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::Network`] if the HTTP client cannot be built.
    pub fn new(
        remote: Url,
        attacher: Arc<dyn CredentialAttacher>,
        options: &ClientOptions,
    ) -> ManagerResult<Self> {
        let http = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(ManagerError::network)?;
        Ok(Self::with_http_client(http, remote, attacher))
    }

    /// Build a client over an existing HTTP client.
    #[must_use]
    pub fn with_http_client(
        http: Client,
        remote: Url,
        attacher: Arc<dyn CredentialAttacher>,
    ) -> Self {
        Self {
            http,
            remote,
            attacher,
            request_id: Uuid::new_v4().to_string(),
        }
    }

    /// Address this client talks to.
    #[must_use]
    pub const fn remote(&self) -> &Url {
        &self.remote
    }

    /// List communities in the order the server returns them.
    ///
    /// Performs exactly one request. If `cancel` fires first the request is
    /// dropped and a cancelled network error is returned.
    ///
    /// # Errors
    ///
    /// - [`ManagerError::Network`] on transport failure, timeout, or cancellation.
    /// - [`ManagerError::Auth`] when the server answers 401 or 403.
    /// - [`ManagerError::Protocol`] for any other non-success status or an
    ///   undecodable body.
    pub async fn list_communities(&self, cancel: &Cancellation) -> ManagerResult<Vec<Community>> {
        if cancel.is_cancelled() {
            return Err(ManagerError::cancelled());
        }

        let request = self.attacher.attach(
            self.http
                .get(self.remote.clone())
                .header(ACCEPT, "application/json")
                .header(HEADER_REQUEST_ID, self.request_id.as_str()),
        );

        debug!(
            remote = %self.remote,
            scheme = self.attacher.scheme(),
            request_id = %self.request_id,
            "listing communities"
        );

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                warn!(request_id = %self.request_id, "community listing cancelled");
                Err(ManagerError::cancelled())
            }
            result = fetch(request) => {
                if let Ok(communities) = &result {
                    debug!(
                        request_id = %self.request_id,
                        count = communities.len(),
                        "communities received"
                    );
                }
                result
            }
        }
    }
}

async fn fetch(request: RequestBuilder) -> ManagerResult<Vec<Community>> {
    let response = request.send().await.map_err(ManagerError::network)?;
    let status = response.status();

    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(ManagerError::Auth {
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(ManagerError::network)?;

    if !status.is_success() {
        return Err(ManagerError::Protocol {
            detail: format!("status {status}: {}", body_excerpt(&bytes)),
            source: None,
        });
    }

    decode_communities(&bytes)
}

/// Decode a management API response body into communities.
///
/// # Errors
///
/// Returns [`ManagerError::Protocol`] if the body is not a JSON array of
/// well-formed community objects.
pub fn decode_communities(body: &[u8]) -> ManagerResult<Vec<Community>> {
    serde_json::from_slice(body).map_err(|source| ManagerError::Protocol {
        detail: "body is not a community list".to_string(),
        source: Some(source),
    })
}

fn body_excerpt(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    trimmed.chars().take(BODY_EXCERPT_LIMIT).collect()
}
