//! Suggested renewal window.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::{AriError, Result};

/// A `[start, end)` range in which the CA suggests renewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenewalWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl RenewalWindow {
    /// Create a window, failing with [`AriError::InvertedWindow`] when
    /// `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AriError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window start
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window end
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the window
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}
