//! ARI renewal-info lookups.

use crate::AriClient;
use ari_core::{CertificateIdentifier, RenewalInfo, Result};

/// Renewal-info endpoints
pub struct RenewalInfoApi<'a> {
    client: &'a AriClient,
}

impl<'a> RenewalInfoApi<'a> {
    pub(crate) const fn new(client: &'a AriClient) -> Self {
        Self { client }
    }

    /// Look up the suggested window for one certificate.
    ///
    /// `base` is the `renewalInfo` URL from the directory. A 404 surfaces as
    /// [`AriError::NotFound`](ari_core::AriError::NotFound).
    pub async fn get(&self, base: &str, id: &CertificateIdentifier) -> Result<RenewalInfo> {
        self.client.get(&lookup_url(base, id)).await
    }

    /// Discover the endpoint from `directory_url`, then look up `id`.
    pub async fn lookup(
        &self,
        directory_url: &str,
        id: &CertificateIdentifier,
    ) -> Result<RenewalInfo> {
        let base = self.client.directory().renewal_info_url(directory_url).await?;
        self.get(&base, id).await
    }
}

/// `{renewalInfo}/{identifier}` without doubling a trailing slash.
fn lookup_url(base: &str, id: &CertificateIdentifier) -> String {
    format!("{}/{}", base.trim_end_matches('/'), id)
}
