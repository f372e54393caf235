//! # ari-check-cli
//!
//! Command-line driver for the [`ari_check`] renewal engine.
//!
//! The process is meant to run from a timer next to an ACME client. It
//! speaks to its supervisor only through the exit code:
//!
//! | code | meaning                                    |
//! |------|--------------------------------------------|
//! | 0    | renewal required, run the ACME client      |
//! | 1    | certificate is still good, do nothing      |
//! | 255  | the check failed, do nothing and alert     |

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
