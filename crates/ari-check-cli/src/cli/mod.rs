//! CLI argument parsing, settings resolution and the check run.

pub mod args;

use anyhow::{Context, Result};
use ari_check::{run_checks, AriClient, CheckRequest, Outcome, EXIT_FAULT, EXIT_VALID};
use args::Cli;
use clap::error::ErrorKind;
use clap::Parser;
use rand::rngs::OsRng;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{
    Config, DEFAULT_BASE_DIR, DEFAULT_DIRECTORY_URL, DEFAULT_PERIOD_SECS, DEFAULT_TIMEOUT_SECS,
};
use crate::output::{self, OutputFormat};

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// What to check
    pub request: CheckRequest,
    /// HTTP request timeout
    pub timeout: Duration,
    /// User-Agent override
    pub user_agent: Option<String>,
    /// Verdict output format
    pub output: OutputFormat,
    /// Disable colors
    pub no_color: bool,
}

impl Settings {
    /// Merge command line (including environment) over the config file over
    /// built-in defaults.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let period_secs = cli
            .period_secs
            .or(config.period_secs)
            .unwrap_or(DEFAULT_PERIOD_SECS);
        let period = i64::try_from(period_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .filter(|period| chrono::Utc::now().checked_add_signed(*period).is_some())
            .with_context(|| format!("period of {period_secs} seconds is out of range"))?;

        let timeout_secs = cli
            .timeout_secs
            .or(config.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            request: CheckRequest {
                domains: cli.domains.clone(),
                base_dir: cli
                    .base_dir
                    .clone()
                    .or_else(|| config.base_dir.clone())
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR)),
                directory_url: cli
                    .directory_url
                    .clone()
                    .or_else(|| config.directory_url.clone())
                    .unwrap_or_else(|| DEFAULT_DIRECTORY_URL.to_string()),
                period,
            },
            timeout: Duration::from_secs(timeout_secs),
            user_agent: config.user_agent.clone(),
            output: cli.output.or(config.output_format).unwrap_or_default(),
            no_color: cli.no_color,
        })
    }
}

/// Run the CLI and return the process exit code.
///
/// Always yields one of the three contract codes: argument errors and
/// panics map to 255, `--help` and `--version` to 1.
pub fn run() -> u8 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return argument_error(&e),
    };

    init_tracing(cli.verbose);

    match panic::catch_unwind(AssertUnwindSafe(|| execute(&cli))) {
        Ok(code) => code,
        Err(_) => {
            error!("renewal check panicked");
            EXIT_FAULT
        }
    }
}

fn argument_error(e: &clap::Error) -> u8 {
    // Printing can only fail on a closed stdout/stderr; the exit code still holds.
    let _ = e.print();
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_VALID,
        _ => EXIT_FAULT,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .try_init();
}

fn execute(cli: &Cli) -> u8 {
    let settings = match Config::load(cli.config.as_deref())
        .and_then(|config| Settings::resolve(cli, &config))
    {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %format!("{e:#}"), "invalid configuration");
            return EXIT_FAULT;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to start async runtime");
            return EXIT_FAULT;
        }
    };

    let outcome = runtime.block_on(check(&settings));

    let domain = settings.request.domains.first().map_or("", String::as_str);
    let report = output::render(domain, &outcome, settings.output, settings.no_color);
    if let Err(e) = writeln!(io::stdout().lock(), "{report}") {
        warn!(error = %e, "failed to write verdict to stdout");
    }

    outcome.exit_code()
}

/// Build the HTTP client for this run only and run every check with it.
async fn check(settings: &Settings) -> Outcome {
    let mut builder = AriClient::builder().timeout(settings.timeout);
    if let Some(agent) = &settings.user_agent {
        builder = builder.user_agent(agent);
    }
    let client = match builder.build() {
        Ok(client) => client,
        Err(e) => return Outcome::Fault(e),
    };

    run_checks(&settings.request, &client, chrono::Utc::now(), &mut OsRng).await
}
