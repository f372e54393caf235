//! Verdict rendering on stdout.

use ari_check::{Outcome, RenewalReason};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Output format for the verdict line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable single line
    #[default]
    Pretty,
    /// Single JSON object
    Json,
}

/// Machine-readable form of an [`Outcome`].
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Certificate name (first domain)
    pub domain: &'a str,
    /// `valid`, `renew` or `fault`
    pub outcome: &'static str,
    /// Process exit code
    pub exit_code: u8,
    /// Renewal reason, for `renew`
    #[serde(flatten)]
    pub reason: Option<&'a RenewalReason>,
    /// Human-readable summary
    pub message: String,
}

impl<'a> Report<'a> {
    /// Build a report for `domain`.
    pub fn new(domain: &'a str, outcome: &'a Outcome) -> Self {
        let (label, reason) = match outcome {
            Outcome::Valid => ("valid", None),
            Outcome::Renew(reason) => ("renew", Some(reason)),
            Outcome::Fault(_) => ("fault", None),
        };
        Self {
            domain,
            outcome: label,
            exit_code: outcome.exit_code(),
            reason,
            message: outcome.to_string(),
        }
    }
}

/// Render the verdict for `domain`.
pub fn render(domain: &str, outcome: &Outcome, format: OutputFormat, no_color: bool) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(&Report::new(domain, outcome))
            .unwrap_or_else(|e| format!("{{\"outcome\":\"fault\",\"message\":\"{e}\"}}")),
        OutputFormat::Pretty => {
            let (tag, detail) = match outcome {
                Outcome::Valid => ("VALID", "no renewal needed".to_string()),
                Outcome::Renew(reason) => ("RENEW", reason.to_string()),
                Outcome::Fault(e) => ("FAULT", e.to_string()),
            };
            if no_color {
                format!("{tag} {domain}: {detail}")
            } else {
                let tag = match outcome {
                    Outcome::Valid => tag.green().bold(),
                    Outcome::Renew(_) => tag.yellow().bold(),
                    Outcome::Fault(_) => tag.red().bold(),
                };
                format!("{tag} {}: {detail}", domain.bold())
            }
        }
    }
}
