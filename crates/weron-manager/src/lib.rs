#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Client for the weron community management API.
//!
//! Layout:
//! - `model.rs`: community records and injected defaults
//! - `credentials.rs`: credential resolution with env/flag/default precedence
//! - `auth.rs`: strategies for attaching credentials to outgoing requests
//! - `cancel.rs`: cancellation token passed into network calls
//! - `client.rs`: the single list-communities round trip
//! - `render.rs`: CSV output with per-row flushing
//! - `error.rs`: error taxonomy shared by all of the above

pub mod auth;
pub mod cancel;
pub mod client;
pub mod credentials;
pub mod error;
pub mod model;
pub mod render;

pub use auth::{BasicAuth, BearerToken, CredentialAttacher};
pub use cancel::{Cancellation, CancellationHandle, cancellation};
pub use client::{ClientOptions, ManagerClient, decode_communities};
pub use credentials::{
    API_PASSWORD_ENV, API_USERNAME_ENV, CredentialSource, CredentialSources, Credentials,
    resolve_credentials,
};
pub use error::{CredentialField, ErrorKind, ManagerError, ManagerResult, NetworkErrorKind};
pub use model::{
    Community, DEFAULT_REMOTE_ADDRESS, DEFAULT_TIMEOUT_SECS, DEFAULT_USERNAME, ManagerDefaults,
};
pub use render::{CSV_HEADER, CsvWriter, render_csv, render_csv_with_cancel};
pub use reqwest::Url;
