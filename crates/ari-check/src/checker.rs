//! The renewal checker: one certificate, one reference time, three checks.

use ari_client::AriClient;
use ari_core::{CertificateIdentifier, RenewalReason, Result, Verdict};
use chrono::{DateTime, Duration, Utc};
use rand::{CryptoRng, RngCore};
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::certificate::ParsedCertificate;
use crate::window;

/// Renewal checks bound to a single certificate and a fixed "now".
///
/// The checks are independent; callers run them in order and stop at the
/// first [`Verdict::Renew`].
#[derive(Debug, Clone)]
pub struct RenewalChecker {
    subject: String,
    not_after: DateTime<Utc>,
    dns_names: BTreeSet<String>,
    identifier: CertificateIdentifier,
    now: DateTime<Utc>,
}

impl RenewalChecker {
    /// Bind a checker to `cert`, deriving its ARI identifier.
    ///
    /// Fails when the certificate has no authority key identifier.
    pub fn new(cert: &ParsedCertificate, now: DateTime<Utc>) -> Result<Self> {
        let identifier = cert.identifier()?;
        info!(
            subject = %cert.subject,
            identifier = %identifier,
            not_after = %cert.not_after,
            "checking certificate"
        );

        Ok(Self {
            subject: cert.subject.clone(),
            not_after: cert.not_after,
            dns_names: cert.dns_names.iter().cloned().collect(),
            identifier,
            now,
        })
    }

    /// Subject of the certificate
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// ARI identifier of the certificate
    #[must_use]
    pub const fn identifier(&self) -> &CertificateIdentifier {
        &self.identifier
    }

    /// Compare the certificate's DNS names with the requested domains as sets.
    pub fn check_domains<I, S>(&self, requested: I) -> Verdict
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: BTreeSet<String> = requested
            .into_iter()
            .map(|d| d.as_ref().to_string())
            .collect();

        if requested == self.dns_names {
            debug!(domains = requested.len(), "domain set unchanged");
            return Verdict::Continue;
        }

        let added: Vec<_> = requested.difference(&self.dns_names).collect();
        let removed: Vec<_> = self.dns_names.difference(&requested).collect();
        info!(?added, ?removed, "domain set changed");
        Verdict::Renew(RenewalReason::DomainsChanged)
    }

    /// Renew when the reference time is past `notAfter`.
    pub fn check_expired(&self) -> Verdict {
        if self.now > self.not_after {
            info!(not_after = %self.not_after, "certificate already expired");
            Verdict::Renew(RenewalReason::Expired)
        } else {
            debug!(remaining = %(self.not_after - self.now), "certificate not expired");
            Verdict::Continue
        }
    }

    /// Ask the CA for its suggested window and decide whether the next
    /// periodic check, `period` from now, would be too late.
    pub async fn check_ari<R>(
        &self,
        client: &AriClient,
        directory_url: &str,
        period: Duration,
        rng: &mut R,
    ) -> Result<Verdict>
    where
        R: RngCore + CryptoRng,
    {
        window::evaluate(
            client,
            &self.identifier,
            directory_url,
            self.now,
            self.not_after,
            period,
            rng,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ari_core::AriError;
    use chrono::TimeZone;

    fn cert(names: &[&str]) -> ParsedCertificate {
        ParsedCertificate {
            subject: "CN=a.example".into(),
            not_after: Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap(),
            dns_names: names.iter().map(ToString::to_string).collect(),
            key_identifier: Some(vec![0x01, 0x02, 0x03]),
            serial: vec![0x80],
        }
    }

    fn checker(names: &[&str], now: DateTime<Utc>) -> RenewalChecker {
        RenewalChecker::new(&cert(names), now).unwrap()
    }

    fn before_expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn identifier_is_derived_at_construction() {
        let c = checker(&["a.example"], before_expiry());
        assert_eq!(c.identifier().as_str(), "AQID.AIA");
        assert_eq!(c.subject(), "CN=a.example");
    }

    #[test]
    fn construction_fails_without_aki() {
        let mut c = cert(&["a.example"]);
        c.key_identifier = None;
        let err = RenewalChecker::new(&c, before_expiry()).unwrap_err();
        assert!(matches!(err, AriError::MissingExtension));
    }

    #[test]
    fn same_domains_in_any_order_pass() {
        let c = checker(&["a.example", "b.example"], before_expiry());
        assert_eq!(c.check_domains(["a.example", "b.example"]), Verdict::Continue);
        assert_eq!(c.check_domains(["b.example", "a.example"]), Verdict::Continue);
        assert_eq!(
            c.check_domains(["b.example", "a.example", "a.example"]),
            Verdict::Continue
        );
    }

    #[test]
    fn added_or_removed_domains_renew() {
        let renew = Verdict::Renew(RenewalReason::DomainsChanged);

        let c = checker(&["a.example", "b.example", "c.example"], before_expiry());
        assert_eq!(c.check_domains(["a.example", "b.example"]), renew);

        let c = checker(&["a.example"], before_expiry());
        assert_eq!(c.check_domains(["a.example", "b.example"]), renew);
    }

    #[test]
    fn expiry_check() {
        let c = checker(&["a.example"], before_expiry());
        assert_eq!(c.check_expired(), Verdict::Continue);

        let after = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 1).unwrap();
        let c = checker(&["a.example"], after);
        assert_eq!(c.check_expired(), Verdict::Renew(RenewalReason::Expired));
    }

    #[test]
    fn exactly_at_expiry_is_not_expired() {
        let c = checker(&["a.example"], cert(&[]).not_after);
        assert_eq!(c.check_expired(), Verdict::Continue);
    }
}
