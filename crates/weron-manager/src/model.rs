//! Community records returned by the management API and the defaults used to
//! reach it.

use std::time::Duration;

use serde::Deserialize;

/// Management API queried when no remote address is supplied.
pub const DEFAULT_REMOTE_ADDRESS: &str = "https://webrtcfd-production.up.railway.app/";
/// Username used when neither a flag nor the environment provides one.
pub const DEFAULT_USERNAME: &str = "admin";
/// Request timeout applied to the management API round trip.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A logical group tracked by the management service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Community {
    /// Community identifier.
    pub id: String,
    /// Number of clients connected when the response was produced.
    pub clients: u64,
    /// Whether the community outlives its last connected client.
    pub persistent: bool,
}

/// Defaults injected into the resolver and client instead of process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerDefaults {
    /// Remote address of the management API.
    pub remote_address: String,
    /// Fallback username; the password never has a default.
    pub username: String,
    /// Timeout for the single HTTP round trip.
    pub timeout: Duration,
}

impl Default for ManagerDefaults {
    fn default() -> Self {
        Self {
            remote_address: DEFAULT_REMOTE_ADDRESS.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
