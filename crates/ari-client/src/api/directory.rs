//! ACME directory discovery.

use crate::AriClient;
use ari_core::{AriError, Directory, Result};
use tracing::debug;

/// ACME directory endpoints
pub struct DirectoryApi<'a> {
    client: &'a AriClient,
}

impl<'a> DirectoryApi<'a> {
    pub(crate) const fn new(client: &'a AriClient) -> Self {
        Self { client }
    }

    /// Fetch the directory document
    pub async fn fetch(&self, directory_url: &str) -> Result<Directory> {
        self.client.get(directory_url).await
    }

    /// Fetch the directory and return its `renewalInfo` base URL.
    ///
    /// Fails with [`AriError::MissingRenewalInfo`] when the server does not
    /// support ARI.
    pub async fn renewal_info_url(&self, directory_url: &str) -> Result<String> {
        let directory = self.fetch(directory_url).await?;
        let url = directory
            .renewal_info
            .ok_or_else(|| AriError::MissingRenewalInfo {
                directory: directory_url.to_string(),
            })?;
        debug!(renewal_info = %url, "discovered ARI endpoint");
        Ok(url)
    }
}
