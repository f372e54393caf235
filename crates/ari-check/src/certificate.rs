//! Loading and parsing the certificate under check.

use ari_core::{AriError, CertificateIdentifier, Result};
use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tracing::debug;
use x509_parser::extensions::{GeneralName, ParsedExtension};

/// Location of the current certificate for `domain` in the certificate store.
///
/// The store keeps one directory per certificate, named after its first
/// domain: `{base_dir}/certs/{domain}/cert.pem`.
#[must_use]
pub fn certificate_path(base_dir: &Path, domain: &str) -> PathBuf {
    base_dir.join("certs").join(domain).join("cert.pem")
}

/// The fields of an X.509 certificate that renewal checks look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCertificate {
    /// Subject distinguished name (human-readable)
    pub subject: String,
    /// Not valid after
    pub not_after: DateTime<Utc>,
    /// DNS names from the subject alternative name extension
    pub dns_names: Vec<String>,
    /// Key identifier from the authority key identifier extension
    pub key_identifier: Option<Vec<u8>>,
    /// Serial number, unsigned big-endian magnitude
    pub serial: Vec<u8>,
}

impl ParsedCertificate {
    /// Read a PEM file and parse its first certificate.
    ///
    /// I/O failures are reported as [`AriError::Io`] so callers can tell a
    /// missing file from a broken one.
    pub fn read(path: &Path) -> Result<Self> {
        let source = path.display().to_string();
        let content = std::fs::read(path).map_err(|e| AriError::io(&source, e))?;
        Self::from_pem(&content, &source)
    }

    /// Parse the first `CERTIFICATE` block of a PEM document.
    ///
    /// Chain files list the leaf first, so trailing intermediates are ignored.
    pub fn from_pem(content: &[u8], source: &str) -> Result<Self> {
        let pems = pem::parse_many(content).map_err(|e| AriError::PemDecode {
            path: source.to_string(),
            reason: e.to_string(),
        })?;

        let leaf = pems
            .iter()
            .find(|p| p.tag() == "CERTIFICATE")
            .ok_or_else(|| AriError::NoCertificate(source.to_string()))?;
        if pems.len() > 1 {
            debug!(path = source, blocks = pems.len(), "using first certificate of PEM bundle");
        }

        Self::from_der(leaf.contents(), source)
    }

    /// Parse a single DER-encoded X.509 certificate.
    pub fn from_der(der: &[u8], source: &str) -> Result<Self> {
        let cert_parse = |reason: String| AriError::CertParse {
            path: source.to_string(),
            reason,
        };

        let (_, cert) =
            x509_parser::parse_x509_certificate(der).map_err(|e| cert_parse(e.to_string()))?;

        let not_after = Utc
            .timestamp_opt(cert.validity().not_after.timestamp(), 0)
            .single()
            .ok_or_else(|| cert_parse("notAfter out of range".to_string()))?;

        let dns_names = cert
            .subject_alternative_name()
            .map_err(|e| cert_parse(e.to_string()))?
            .map(|san| {
                san.value
                    .general_names
                    .iter()
                    .filter_map(|name| match name {
                        GeneralName::DNSName(dns) => Some((*dns).to_string()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let key_identifier = cert.extensions().iter().find_map(|ext| {
            match ext.parsed_extension() {
                ParsedExtension::AuthorityKeyIdentifier(aki) => {
                    aki.key_identifier.as_ref().map(|kid| kid.0.to_vec())
                }
                _ => None,
            }
        });

        Ok(Self {
            subject: cert.subject().to_string(),
            not_after,
            dns_names,
            key_identifier,
            serial: cert.tbs_certificate.serial.to_bytes_be(),
        })
    }

    /// Derive the ARI identifier of this certificate.
    ///
    /// Fails with [`AriError::MissingExtension`] when the certificate carries
    /// no authority key identifier.
    pub fn identifier(&self) -> Result<CertificateIdentifier> {
        let aki = self
            .key_identifier
            .as_deref()
            .ok_or(AriError::MissingExtension)?;
        Ok(CertificateIdentifier::from_parts(aki, &self.serial))
    }
}
