//! HTTP client for ACME Renewal Information.
//!
//! This crate provides [`AriClient`], which performs the two requests an ARI
//! check needs: fetching the ACME directory to discover the `renewalInfo`
//! endpoint, and looking up the suggested window for one certificate.

#![doc(html_root_url = "https://docs.rs/ari-client/0.3.0")]

mod client;
pub mod api;

pub use ari_core::{AriError, Result};
pub use client::{AriClient, AriClientBuilder, DEFAULT_TIMEOUT};
