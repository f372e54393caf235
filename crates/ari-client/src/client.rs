//! Main ARI client implementation.

use crate::api::{DirectoryApi, RenewalInfoApi};
use ari_core::{AriError, Result};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for ACME directory and renewal-info requests.
///
/// Cheap to clone. The underlying connection pool is released once the last
/// clone is dropped.
#[derive(Clone)]
pub struct AriClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
}

impl AriClient {
    /// Create a new client using default settings
    pub fn new() -> Result<Self> {
        AriClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> AriClientBuilder {
        AriClientBuilder::new()
    }

    /// Access ACME directory discovery
    #[must_use]
    pub const fn directory(&self) -> DirectoryApi<'_> {
        DirectoryApi::new(self)
    }

    /// Access renewal-info lookups
    #[must_use]
    pub const fn renewal_info(&self) -> RenewalInfoApi<'_> {
        RenewalInfoApi::new(self)
    }

    /// Perform a GET request and decode the JSON body
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let url = parse_url(url)?;
        debug!(url = %url, "GET request");

        let response = self
            .inner
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(map_transport_error)?;

        Self::handle_response(url.as_str(), response).await
    }

    /// Handle a response that returns JSON
    async fn handle_response<T: DeserializeOwned>(
        url: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await.map_err(map_transport_error)?;
            serde_json::from_str(&body).map_err(AriError::Json)
        } else {
            Self::handle_error(url, status.as_u16(), response).await
        }
    }

    /// Convert an error response to an `AriError`
    async fn handle_error<T>(url: &str, status: u16, response: reqwest::Response) -> Result<T> {
        let body = response.text().await.unwrap_or_default();
        debug!(url, status, body = %body.chars().take(512).collect::<String>(), "error response");

        match status {
            404 => Err(AriError::NotFound {
                resource: url.to_string(),
            }),
            _ => {
                warn!(url, status, "unexpected status from ACME server");
                Err(AriError::Status {
                    code: status,
                    url: url.to_string(),
                })
            }
        }
    }
}

/// Builder for configuring an [`AriClient`]
pub struct AriClientBuilder {
    timeout: Duration,
    user_agent: String,
}

impl AriClientBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("ari-check/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AriClient> {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| AriError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(AriClient {
            inner: Arc::new(ClientInner { http }),
        })
    }
}

impl Default for AriClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| AriError::InvalidUrl(format!("{url}: {e}")))
}

fn map_transport_error(e: reqwest::Error) -> AriError {
    if e.is_timeout() {
        AriError::Timeout(e.to_string())
    } else if e.is_connect() {
        AriError::Connection(e.to_string())
    } else {
        AriError::Http(e.to_string())
    }
}
