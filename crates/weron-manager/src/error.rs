//! # Design
//!
//! - One error type covers resolution, transport, authentication, decoding and output.
//! - Messages stay constant; context travels in fields and sources.
//! - `kind()` gives callers a stable discriminant for exit codes and hints.

use std::fmt::{self, Display, Formatter};
use std::io;

use thiserror::Error;

/// Result alias for management client operations.
pub type ManagerResult<T> = Result<T, ManagerError>;

/// Credential field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    /// The management API username.
    Username,
    /// The management API password.
    Password,
}

impl CredentialField {
    /// Lower-case field name used in messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
        }
    }
}

impl Display for CredentialField {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Transport failure flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    /// The connection could not be established (refused, DNS, TLS).
    Connect,
    /// The request exceeded the configured timeout.
    Timeout,
    /// The caller cancelled the request before it completed.
    Cancelled,
    /// The response body could not be read to completion.
    Body,
    /// The request could not be built or sent.
    Request,
}

impl NetworkErrorKind {
    fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect
        } else if error.is_body() || error.is_decode() {
            Self::Body
        } else {
            Self::Request
        }
    }
}

/// Stable discriminant for [`ManagerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required credential was missing after resolution.
    MissingCredential,
    /// A credential override could not be read.
    InvalidCredential,
    /// The remote service could not be reached.
    Network,
    /// The remote service rejected the credentials.
    Auth,
    /// The response could not be decoded into a community list.
    Protocol,
    /// Writing to the output sink failed.
    Write,
}

/// Errors raised while listing communities.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// A credential resolved to an empty value.
    #[error("missing API {field}")]
    MissingCredential {
        /// Field that was empty.
        field: CredentialField,
    },
    /// An environment override is set but is not valid UTF-8.
    #[error("API {field} in {variable} is not valid UTF-8")]
    InvalidCredential {
        /// Field the override applies to.
        field: CredentialField,
        /// Environment variable holding the value.
        variable: &'static str,
    },
    /// Transport-level failure, including cancellation.
    #[error("management API request failed")]
    Network {
        /// Failure flavour.
        kind: NetworkErrorKind,
        /// Underlying HTTP error, absent for cancellation.
        source: Option<reqwest::Error>,
    },
    /// The management API rejected the supplied credentials.
    #[error("management API rejected credentials (status {status})")]
    Auth {
        /// HTTP status returned by the server.
        status: u16,
    },
    /// The response could not be decoded.
    #[error("unexpected response from management API: {detail}")]
    Protocol {
        /// Description of what was received.
        detail: String,
        /// Decoder error when the body was malformed.
        source: Option<serde_json::Error>,
    },
    /// The output sink refused a write or flush.
    #[error("failed to write output")]
    Write {
        /// Underlying IO error.
        source: io::Error,
    },
}

impl ManagerError {
    /// Classify a transport error from the HTTP client.
    #[must_use]
    pub fn network(source: reqwest::Error) -> Self {
        Self::Network {
            kind: NetworkErrorKind::classify(&source),
            source: Some(source),
        }
    }

    /// Error returned when the caller cancelled the request.
    #[must_use]
    pub const fn cancelled() -> Self {
        Self::Network {
            kind: NetworkErrorKind::Cancelled,
            source: None,
        }
    }

    /// Wrap an output failure.
    #[must_use]
    pub const fn write(source: io::Error) -> Self {
        Self::Write { source }
    }

    /// Discriminant for callers that branch on the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential { .. } => ErrorKind::MissingCredential,
            Self::InvalidCredential { .. } => ErrorKind::InvalidCredential,
            Self::Network { .. } => ErrorKind::Network,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::Protocol { .. } => ErrorKind::Protocol,
            Self::Write { .. } => ErrorKind::Write,
        }
    }

    /// Whether this error represents a caller-initiated cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Network {
                kind: NetworkErrorKind::Cancelled,
                ..
            }
        )
    }
}
