//! The full check run: load, then domains, expiry and ARI in that order.

use ari_client::AriClient;
use ari_core::{AriError, Outcome, RenewalReason, Result, Verdict};
use chrono::{DateTime, Duration, Utc};
use rand::{CryptoRng, RngCore};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::certificate::{certificate_path, ParsedCertificate};
use crate::checker::RenewalChecker;

/// Everything a check run needs to know about the certificate it checks.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    /// Expected SAN set; the first entry names the certificate directory
    pub domains: Vec<String>,
    /// Root of the certificate store
    pub base_dir: PathBuf,
    /// ACME directory URL of the issuing CA
    pub directory_url: String,
    /// Interval between two scheduled runs
    pub period: Duration,
}

/// Run every check for `request` and fold the result into an [`Outcome`].
pub async fn run_checks<R>(
    request: &CheckRequest,
    client: &AriClient,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Outcome
where
    R: RngCore + CryptoRng,
{
    let outcome = Outcome::from(check_sequence(request, client, now, rng).await);
    match &outcome {
        Outcome::Fault(e) => warn!(error = %e, "renewal check failed"),
        other => info!(outcome = %other, "renewal check finished"),
    }
    outcome
}

async fn check_sequence<R>(
    request: &CheckRequest,
    client: &AriClient,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Verdict>
where
    R: RngCore + CryptoRng,
{
    let Some(first) = request.domains.first() else {
        return Err(AriError::Config("no domains requested".to_string()));
    };

    let path = certificate_path(&request.base_dir, first);
    let cert = match ParsedCertificate::read(&path) {
        Ok(cert) => cert,
        Err(AriError::Io { path, source }) => {
            info!(path = %path, error = %source, "no readable certificate");
            return Ok(Verdict::Renew(RenewalReason::CertificateNotFound));
        }
        Err(e) => return Err(e),
    };

    let checker = RenewalChecker::new(&cert, now)?;

    let verdict = checker.check_domains(&request.domains);
    if verdict.is_renew() {
        return Ok(verdict);
    }

    let verdict = checker.check_expired();
    if verdict.is_renew() {
        return Ok(verdict);
    }

    checker
        .check_ari(client, &request.directory_url, request.period, rng)
        .await
}
