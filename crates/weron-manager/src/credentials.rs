//! Credential resolution for the management API.
//!
//! Values come from three places: an environment override, a flag value, and
//! the injected default (username only). A non-empty environment value wins
//! over the flag; the flag wins over the default. Emptiness is checked after
//! trimming, password first, so the reported field is deterministic when both
//! are absent. An override that is set but not UTF-8 is an error, never a
//! silent fall-through to the flag.

use std::env;
use std::ffi::OsString;
use std::fmt::{self, Debug, Display, Formatter};

use tracing::debug;

use crate::error::{CredentialField, ManagerError, ManagerResult};
use crate::model::ManagerDefaults;

/// Environment variable overriding `--api-username`.
pub const API_USERNAME_ENV: &str = "API_USERNAME";
/// Environment variable overriding `--api-password`.
pub const API_PASSWORD_ENV: &str = "API_PASSWORD";

/// Fully resolved management API credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Validate and construct credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::MissingCredential`] for the password when it is
    /// blank, otherwise for the username when it is blank.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> ManagerResult<Self> {
        let username = username.into();
        let password = password.into();

        if password.trim().is_empty() {
            return Err(ManagerError::MissingCredential {
                field: CredentialField::Password,
            });
        }

        if username.trim().is_empty() {
            return Err(ManagerError::MissingCredential {
                field: CredentialField::Username,
            });
        }

        Ok(Self { username, password })
    }

    /// Resolved username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Resolved password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Debug for Credentials {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where a resolved credential value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// `API_USERNAME` / `API_PASSWORD`.
    Env,
    /// `--api-username` / `--api-password`.
    Flag,
    /// [`ManagerDefaults`].
    Default,
    /// No source supplied a value.
    Unset,
}

impl Display for CredentialSource {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Env => "env",
            Self::Flag => "flag",
            Self::Default => "default",
            Self::Unset => "unset",
        })
    }
}

/// Raw credential inputs gathered before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialSources {
    /// Value bound to `--api-username`.
    pub flag_username: Option<String>,
    /// Value bound to `--api-password`.
    pub flag_password: Option<String>,
    /// Value of `API_USERNAME`.
    pub env_username: Option<String>,
    /// Value of `API_PASSWORD`.
    pub env_password: Option<String>,
}

impl CredentialSources {
    /// Pair flag values with the current `API_USERNAME` / `API_PASSWORD` values.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::InvalidCredential`] when an override is set but
    /// is not valid UTF-8; the password variable is checked first.
    pub fn from_env(
        flag_username: Option<String>,
        flag_password: Option<String>,
    ) -> ManagerResult<Self> {
        let env_password = env_override(
            CredentialField::Password,
            API_PASSWORD_ENV,
            env::var_os(API_PASSWORD_ENV),
        )?;
        let env_username = env_override(
            CredentialField::Username,
            API_USERNAME_ENV,
            env::var_os(API_USERNAME_ENV),
        )?;
        Ok(Self {
            flag_username,
            flag_password,
            env_username,
            env_password,
        })
    }
}

fn env_override(
    field: CredentialField,
    variable: &'static str,
    value: Option<OsString>,
) -> ManagerResult<Option<String>> {
    value
        .map(OsString::into_string)
        .transpose()
        .map_err(|_| ManagerError::InvalidCredential { field, variable })
}

/// Resolve the effective credentials from the supplied sources.
///
/// # Errors
///
/// Returns [`ManagerError::MissingCredential`] when the password, or failing
/// that the username, is blank after overrides are applied.
pub fn resolve_credentials(
    sources: &CredentialSources,
    defaults: &ManagerDefaults,
) -> ManagerResult<Credentials> {
    let (username, username_source) = pick(
        sources.env_username.as_deref(),
        sources.flag_username.as_deref(),
        Some(defaults.username.as_str()),
    );
    let (password, password_source) = pick(
        sources.env_password.as_deref(),
        sources.flag_password.as_deref(),
        None,
    );

    if username_source == CredentialSource::Env {
        debug!("using username from {API_USERNAME_ENV} env variable");
    }
    if password_source == CredentialSource::Env {
        debug!("using password from {API_PASSWORD_ENV} env variable");
    }
    debug!(
        username = %username_source,
        password = %password_source,
        "resolved management API credential sources"
    );

    Credentials::new(username, password)
}

fn pick<'a>(
    env: Option<&'a str>,
    flag: Option<&'a str>,
    default: Option<&'a str>,
) -> (&'a str, CredentialSource) {
    if let Some(value) = env.filter(|value| !value.is_empty()) {
        return (value, CredentialSource::Env);
    }
    if let Some(value) = flag {
        return (value, CredentialSource::Flag);
    }
    default.map_or(("", CredentialSource::Unset), |value| {
        (value, CredentialSource::Default)
    })
}
