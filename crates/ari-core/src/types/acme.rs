//! ACME wire types used by ARI discovery and lookup.

use serde::{Deserialize, Serialize};

use super::{parse_timestamp, RenewalWindow};
use crate::Result;

/// ACME directory document (RFC 8555 §7.1.1).
///
/// Only the resources relevant to renewal checks are modelled; everything
/// else in the document is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    /// Base URL of the ARI endpoint, absent when the server lacks ARI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_info: Option<String>,
}

/// Response body of a `renewalInfo` lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewalInfo {
    /// Window in which the CA suggests renewing
    #[serde(rename = "suggestedWindow")]
    pub suggested_window: SuggestedWindow,

    /// Page explaining why the window was set, if the CA provided one
    #[serde(
        rename = "explanationURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation_url: Option<String>,
}

/// Raw `suggestedWindow`, timestamps still as sent by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedWindow {
    /// Window start (RFC 3339)
    pub start: String,
    /// Window end (RFC 3339)
    pub end: String,
}

impl RenewalInfo {
    /// Parse the suggested window, rejecting malformed or inverted windows.
    pub fn window(&self) -> Result<RenewalWindow> {
        let start = parse_timestamp(&self.suggested_window.start)?;
        let end = parse_timestamp(&self.suggested_window.end)?;
        RenewalWindow::new(start.into(), end.into())
    }
}
