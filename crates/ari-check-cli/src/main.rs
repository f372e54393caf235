//! ari-check - renewal check for ACME certificates
//!
//! Exits 0 when the certificate must be renewed, 1 when it is still good
//! and 255 when the check could not decide.

use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(ari_check_cli::run())
}
