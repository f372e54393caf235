//! Core types and errors for ACME Renewal Information (ARI) checks.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - **Timestamps**: [`parse_timestamp`] accepts RFC 3339 strings with any
//!   number of fractional digits and rounds them to microseconds
//! - **Identifiers**: [`CertificateIdentifier`] builds the ARI certificate ID
//!   from an authority key identifier and a serial number
//! - **Wire types**: the ACME directory and `renewalInfo` response bodies
//! - **Verdicts**: [`Verdict`], [`RenewalReason`] and the final [`Outcome`]
//! - **Errors**: [`AriError`] and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use ari_core::CertificateIdentifier;
//!
//! let aki = [0x69, 0x88, 0x5b, 0x6b, 0x87, 0x46, 0x40, 0x41, 0xe1, 0xb3,
//!            0x7b, 0x84, 0x7b, 0xa0, 0xae, 0x2c, 0xde, 0x01, 0xc8, 0xd4];
//! let id = CertificateIdentifier::from_parts(&aki, &[0x87, 0x65, 0x43, 0x21]);
//! assert_eq!(id.as_str(), "aYhba4dGQEHhs3uEe6CuLN4ByNQ.AIdlQyE");
//! ```

#![doc(html_root_url = "https://docs.rs/ari-core/0.3.0")]

mod error;
pub mod types;

pub use error::{AriError, Result};
pub use types::*;
