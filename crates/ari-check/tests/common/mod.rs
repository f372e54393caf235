//! Shared fixtures: a throwaway certificate store and a mock ACME server.

#![allow(dead_code)]

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair, SerialNumber};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Current time truncated to whole seconds, matching X.509 precision.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Issue a leaf certificate for `domains` from a fresh test CA.
pub fn issue_pem(domains: &[&str], not_after: DateTime<Utc>) -> String {
    let ca_key = KeyPair::generate().unwrap();
    let mut ca_params = CertificateParams::new(Vec::<String>::new()).unwrap();
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    ca_params.distinguished_name.push(DnType::CommonName, "Mock ACME Issuer");
    let ca = ca_params.self_signed(&ca_key).unwrap();

    let key = KeyPair::generate().unwrap();
    let names: Vec<String> = domains.iter().map(ToString::to_string).collect();
    let mut params = CertificateParams::new(names).unwrap();
    params.distinguished_name.push(DnType::CommonName, domains[0]);
    params.serial_number = Some(SerialNumber::from_slice(&[0x93, 0x11, 0x42]));
    params.not_before = time::OffsetDateTime::from_unix_timestamp(
        (not_after - Duration::days(90)).timestamp(),
    )
    .unwrap();
    params.not_after = time::OffsetDateTime::from_unix_timestamp(not_after.timestamp()).unwrap();
    params.use_authority_key_identifier_extension = true;

    params.signed_by(&key, &ca, &ca_key).unwrap().pem()
}

/// A certificate store rooted in a temporary directory.
pub struct Store {
    pub dir: TempDir,
}

impl Store {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Place a certificate at `certs/{domains[0]}/cert.pem`.
    pub fn install(&self, domains: &[&str], not_after: DateTime<Utc>) {
        let dir = self.path().join("certs").join(domains[0]);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("cert.pem"), issue_pem(domains, not_after)).unwrap();
    }
}

/// Serve a directory advertising ARI at `/renewal-info`.
pub async fn mount_directory(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/directory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "newNonce": format!("{}/nonce", server.uri()),
            "newOrder": format!("{}/order", server.uri()),
            "renewalInfo": format!("{}/renewal-info", server.uri()),
        })))
        .mount(server)
        .await;
}

/// Answer every renewal-info lookup with the given window.
pub async fn mount_window(server: &MockServer, start: DateTime<Utc>, end: DateTime<Utc>) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/renewal-info/[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggestedWindow": {
                "start": start.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true),
                "end": end.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true),
            },
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Answer every renewal-info lookup with a bare status code.
pub async fn mount_lookup_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/renewal-info/.+$"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn directory_url(server: &MockServer) -> String {
    format!("{}/directory", server.uri())
}

/// A URL on a local port nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/directory")
}
