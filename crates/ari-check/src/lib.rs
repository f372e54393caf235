//! # ari-check
//!
//! Decides whether an ACME-managed certificate must be renewed now.
//!
//! A check run loads the current certificate from the store and then runs
//! three checks, stopping at the first one that asks for a renewal:
//!
//! 1. **Domains**: the certificate's DNS names must equal the requested set
//! 2. **Expiry**: the certificate must not be past `notAfter`
//! 3. **ARI**: the CA's suggested renewal window, with a randomly selected
//!    renewal instant, must not fall before the next scheduled run
//!
//! ## Example
//!
//! ```rust,no_run
//! use ari_check::{run_checks, AriClient, CheckRequest};
//! use chrono::{Duration, Utc};
//! use rand::rngs::OsRng;
//!
//! # async fn demo() -> ari_check::Result<()> {
//! let request = CheckRequest {
//!     domains: vec!["example.com".into(), "www.example.com".into()],
//!     base_dir: "/etc/dehydrated".into(),
//!     directory_url: "https://acme-v02.api.letsencrypt.org/directory".into(),
//!     period: Duration::days(1),
//! };
//! let client = AriClient::new()?;
//! let outcome = run_checks(&request, &client, Utc::now(), &mut OsRng).await;
//! std::process::exit(i32::from(outcome.exit_code()));
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/ari-check/0.3.0")]

mod certificate;
mod checker;
mod sequence;
pub mod window;

pub use certificate::{certificate_path, ParsedCertificate};
pub use checker::RenewalChecker;
pub use sequence::{run_checks, CheckRequest};

// Re-export the client and core types
pub use ari_client::{AriClient, AriClientBuilder};
pub use ari_core::*;
