//! Command-line client for a weron community management service.

use std::io::{self, Write};
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::{Instrument, info_span, warn};
use weron_manager::{Cancellation, CredentialSources, ManagerDefaults, Url, cancellation};
use weron_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};

use crate::client::{CliResult, EXIT_CANCELLED, parse_url};
use crate::commands::manager::handle_manager_list;

const VERBOSE_DIRECTIVES: &[&str] = &["weron_cli=debug", "weron_manager=debug"];

/// Time a command gets to unwind after an interrupt before the process exits.
const INTERRUPT_GRACE: Duration = Duration::from_secs(2);

/// Parses CLI arguments, executes the requested command, and reports the
/// outcome on stderr. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: DEFAULT_LOG_LEVEL,
        directives: log_directives(cli.verbose),
        format: LogFormat::from_env(),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    let (handle, cancel) = cancellation();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("interrupt received, cancelling request");
        handle.cancel();
        // Output may be stuck in a blocking write that never sees the token.
        tokio::select! {
            () = tokio::time::sleep(INTERRUPT_GRACE) => {}
            _ = tokio::signal::ctrl_c() => {}
        }
        eprintln!("error: interrupted");
        process::exit(EXIT_CANCELLED);
    });

    let span = info_span!("command", name = command_label(&cli.command));
    let result = dispatch(cli, &ManagerDefaults::default(), &cancel, io::stdout())
        .instrument(span)
        .await;
    interrupt.abort();

    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch<W: Write>(
    cli: Cli,
    defaults: &ManagerDefaults,
    cancel: &Cancellation,
    out: W,
) -> CliResult<()> {
    match cli.command {
        Command::Manager(ManagerCommand::List(args)) => {
            let sources =
                CredentialSources::from_env(args.api_username.clone(), args.api_password.clone())?;
            handle_manager_list(&args, &sources, defaults, cancel, out).await
        }
    }
}

#[derive(Parser)]
#[command(name = "weron", about = "Operator CLI for weron community management")]
pub(crate) struct Cli {
    #[arg(
        short,
        long,
        global = true,
        help = "Log which sources supplied credentials and other diagnostics"
    )]
    pub(crate) verbose: bool,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    #[command(subcommand, about = "Manage communities on a management API")]
    Manager(ManagerCommand),
}

#[derive(Subcommand)]
pub(crate) enum ManagerCommand {
    #[command(
        visible_aliases = ["lis", "l", "ls"],
        about = "List persistent and ephemeral communities"
    )]
    List(ListArgs),
}

#[derive(Args)]
pub(crate) struct ListArgs {
    #[arg(
        long,
        help = "Username for the management API, `admin` unless configured otherwise (can also be set using the API_USERNAME env variable)"
    )]
    pub(crate) api_username: Option<String>,
    #[arg(
        long,
        help = "Password for the management API (can also be set using the API_PASSWORD env variable)"
    )]
    pub(crate) api_password: Option<String>,
    #[arg(
        long,
        value_parser = parse_url,
        help = "Remote address (defaults to the public weron manager)"
    )]
    pub(crate) raddr: Option<Url>,
    #[arg(
        long,
        env = "WERON_HTTP_TIMEOUT_SECS",
        help = "Seconds to wait for the management API (defaults to 10)"
    )]
    pub(crate) timeout: Option<u64>,
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Manager(ManagerCommand::List(_)) => "manager_list",
    }
}

const fn log_directives(verbose: bool) -> &'static [&'static str] {
    if verbose { VERBOSE_DIRECTIVES } else { &[] }
}
