use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::ParseError;

/// Result type alias for ARI check operations
pub type Result<T> = std::result::Result<T, AriError>;

/// Errors that can occur while checking a certificate for renewal.
///
/// Every variant is a fault: the check itself could not reach a verdict.
/// A certificate that needs renewal is reported through
/// [`Verdict::Renew`](crate::Verdict::Renew), never through this type.
#[derive(Error, Debug)]
pub enum AriError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Connection to the ACME server failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// Request timed out
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Server answered with an unexpected status code
    #[error("unexpected HTTP status {code} from {url}")]
    Status {
        /// HTTP status code
        code: u16,
        /// URL that was requested
        url: String,
    },

    /// Resource not found (HTTP 404)
    #[error("resource not found: {resource}")]
    NotFound {
        /// URL of the resource that wasn't found
        resource: String,
    },

    /// The ACME directory does not advertise a `renewalInfo` endpoint
    #[error("ACME directory at {directory} does not advertise renewalInfo (ARI unsupported)")]
    MissingRenewalInfo {
        /// Directory URL that was queried
        directory: String,
    },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed timestamp in a server response
    #[error(transparent)]
    Timestamp(#[from] ParseError),

    /// Suggested window ends before it starts
    #[error("suggested window is inverted: start {start} is after end {end}")]
    InvertedWindow {
        /// Window start
        start: DateTime<Utc>,
        /// Window end
        end: DateTime<Utc>,
    },

    /// Certificate has no authority key identifier
    #[error("certificate has no authority key identifier extension")]
    MissingExtension,

    /// X.509 parsing failed
    #[error("failed to parse certificate {path}: {reason}")]
    CertParse {
        /// Source of the certificate
        path: String,
        /// Parser message
        reason: String,
    },

    /// PEM decoding failed
    #[error("failed to decode PEM in {path}: {reason}")]
    PemDecode {
        /// Source of the PEM data
        path: String,
        /// Decoder message
        reason: String,
    },

    /// PEM data holds no certificate block
    #[error("no CERTIFICATE block found in {0}")]
    NoCertificate(String),

    /// Local I/O error
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl AriError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if the server reported the resource as unknown
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the HTTP status code if the server answered at all
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}
