//! CLI error type, exit codes, and argument parsers.

use std::fmt::{self, Display, Formatter};

use weron_manager::{API_PASSWORD_ENV, API_USERNAME_ENV, CredentialField, ManagerError, Url};

/// Exit code for configuration and input errors.
pub(crate) const EXIT_VALIDATION: i32 = 2;
/// Exit code for failures talking to the service or writing output.
pub(crate) const EXIT_FAILURE: i32 = 3;
/// Exit code after an interrupt cancelled the command.
pub(crate) const EXIT_CANCELLED: i32 = 130;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
    Cancelled,
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => EXIT_VALIDATION,
            Self::Failure(_) => EXIT_FAILURE,
            Self::Cancelled => EXIT_CANCELLED,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
            Self::Cancelled => "interrupted before the management API responded".to_string(),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ManagerError> for CliError {
    fn from(error: ManagerError) -> Self {
        match error {
            ManagerError::MissingCredential { field } => {
                let (flag, env) = match field {
                    CredentialField::Username => ("--api-username", API_USERNAME_ENV),
                    CredentialField::Password => ("--api-password", API_PASSWORD_ENV),
                };
                Self::validation(format!("missing API {field} (pass {flag} or set {env})"))
            }
            error @ ManagerError::InvalidCredential { .. } => Self::validation(error.to_string()),
            error if error.is_cancelled() => Self::Cancelled,
            error @ ManagerError::Network { .. } => Self::failure(
                anyhow::Error::new(error)
                    .context("could not reach the management API; check connectivity and --raddr"),
            ),
            error @ ManagerError::Auth { .. } => Self::failure(
                anyhow::Error::new(error).context("authentication failed; check credentials"),
            ),
            error @ (ManagerError::Protocol { .. } | ManagerError::Write { .. }) => {
                Self::failure(error)
            }
        }
    }
}

/// Parse the remote address provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}
