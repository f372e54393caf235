//! Command-line argument definitions using clap.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Decide whether an ACME certificate must be renewed now
///
/// Loads `{base-dir}/certs/{first domain}/cert.pem` and checks, in order,
/// that it covers exactly the given domains, that it has not expired, and
/// that the CA's ACME Renewal Information does not ask for a renewal
/// before the next scheduled run.
#[derive(Parser, Debug)]
#[command(name = "ari-check")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Exit codes: 0 = renew now, 1 = certificate is valid, 255 = check failed")]
pub struct Cli {
    /// Domains the certificate must cover; the first names its store directory
    #[arg(required = true, value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// Root of the certificate store
    #[arg(short = 'b', long, env = "ARI_CHECK_BASEDIR", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// ACME directory URL of the issuing CA
    #[arg(short = 'd', long = "directory", env = "ARI_CHECK_DIRECTORY", value_name = "URL")]
    pub directory_url: Option<String>,

    /// Seconds between two scheduled runs of this check
    #[arg(short = 'p', long = "period", env = "ARI_CHECK_PERIOD", value_name = "SECONDS")]
    pub period_secs: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Configuration file (default: platform config dir)
    #[arg(short, long, env = "ARI_CHECK_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format of the verdict on stdout
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
