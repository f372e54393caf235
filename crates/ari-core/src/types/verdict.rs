//! Verdicts of individual checks and the final outcome of a check run.

use serde::Serialize;
use std::fmt;

use crate::AriError;

/// Why a certificate has to be renewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RenewalReason {
    /// SAN set differs from the requested domains
    DomainsChanged,
    /// `notAfter` is in the past
    Expired,
    /// No certificate on disk yet
    CertificateNotFound,
    /// The CA does not know the certificate
    AriNotFound,
    /// The CA returned a window ending after the certificate expires
    AriFault,
    /// The randomly selected renewal time falls before the next check
    WindowReached {
        /// Explanation URL sent with the renewal info
        #[serde(skip_serializing_if = "Option::is_none")]
        explanation_url: Option<String>,
    },
}

impl fmt::Display for RenewalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomainsChanged => f.write_str("domain set changed"),
            Self::Expired => f.write_str("already expired"),
            Self::CertificateNotFound => f.write_str("certificate not found"),
            Self::AriNotFound => f.write_str("ARI returned 404"),
            Self::AriFault => f.write_str("ARI fault"),
            Self::WindowReached {
                explanation_url: Some(url),
            } => write!(f, "ARI suggested renewal window reached ({url})"),
            Self::WindowReached {
                explanation_url: None,
            } => f.write_str("ARI suggested renewal window reached"),
        }
    }
}

/// Result of one check in the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing found, run the next check
    Continue,
    /// Stop here, the certificate must be renewed
    Renew(RenewalReason),
}

impl Verdict {
    /// Returns true if this verdict ends the check sequence with a renewal
    #[must_use]
    pub const fn is_renew(&self) -> bool {
        matches!(self, Self::Renew(_))
    }
}

/// Process exit code asking the supervisor to renew the certificate.
pub const EXIT_RENEW: u8 = 0;
/// Process exit code for a certificate that is still good.
pub const EXIT_VALID: u8 = 1;
/// Process exit code for a check that could not reach a verdict.
pub const EXIT_FAULT: u8 = 255;

/// Final outcome of a full check run.
#[derive(Debug)]
pub enum Outcome {
    /// No renewal needed
    Valid,
    /// Renewal needed
    Renew(RenewalReason),
    /// The check itself failed
    Fault(AriError),
}

impl Outcome {
    /// Exit code for the supervising process.
    ///
    /// The polarity is inverted on purpose: `0` triggers the renewal action.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Valid => EXIT_VALID,
            Self::Renew(_) => EXIT_RENEW,
            Self::Fault(_) => EXIT_FAULT,
        }
    }
}

impl From<crate::Result<Verdict>> for Outcome {
    fn from(result: crate::Result<Verdict>) -> Self {
        match result {
            Ok(Verdict::Continue) => Self::Valid,
            Ok(Verdict::Renew(reason)) => Self::Renew(reason),
            Err(e) => Self::Fault(e),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("certificate is valid, no renewal needed"),
            Self::Renew(reason) => write!(f, "renewal needed: {reason}"),
            Self::Fault(e) => write!(f, "check failed: {e}"),
        }
    }
}
