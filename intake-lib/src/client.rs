//! Main IntakeClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ApiError;
use crate::error::Error;

/// The main client for talking to the intake form service.
///
/// This client is cheap to clone (uses `Arc` internally) and can be
/// shared across threads safely.
///
/// # Example
///
/// ```ignore
/// use intake_lib::IntakeClient;
///
/// let client = IntakeClient::builder()
///     .base_url("https://forms.example.com")
///     .build()?;
///
/// let response = client.get_form("RA2211003010000").await?;
/// ```
#[derive(Clone)]
pub struct IntakeClient {
    inner: Arc<IntakeClientInner>,
}

struct IntakeClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl IntakeClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> IntakeClientBuilder<Missing> {
        IntakeClientBuilder::new()
    }

    /// Returns the base URL of the intake service.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Builds the URL for an endpoint directly under the base URL.
    pub(crate) fn endpoint(&self, segment: &str) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("cannot-be-a-base URL: {}", self.inner.base_url)))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Returns the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http_client
    }

    /// Applies the configured per-request timeout, if any.
    pub(crate) fn apply_timeout(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.inner.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`IntakeClient`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile
/// time; `build` then validates it.
///
/// # Example
///
/// ```ignore
/// let client = IntakeClient::builder()
///     .base_url("https://forms.example.com")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub struct IntakeClientBuilder<U> {
    base_url: U,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl IntakeClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the intake service base URL.
    pub fn base_url(self, url: impl Into<String>) -> IntakeClientBuilder<Set<String>> {
        IntakeClientBuilder {
            base_url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for IntakeClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> IntakeClientBuilder<U> {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl IntakeClientBuilder<Set<String>> {
    /// Builds the [`IntakeClient`].
    ///
    /// This method is only available once `base_url` has been set; it
    /// fails if the URL does not parse or the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<IntakeClient, Error> {
        let base_url = Url::parse(&self.base_url.0)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.base_url.0)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(IntakeClient {
            inner: Arc::new(IntakeClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_endpoint() {
        let client = IntakeClient::builder()
            .base_url("https://forms.example.com")
            .build()
            .unwrap();

        let url = client.endpoint("get-form").unwrap();
        assert_eq!(url.as_str(), "https://forms.example.com/get-form");
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let client = IntakeClient::builder()
            .base_url("https://forms.example.com/api/")
            .build()
            .unwrap();

        let url = client.endpoint("create-user").unwrap();
        assert_eq!(url.as_str(), "https://forms.example.com/api/create-user");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = IntakeClient::builder().base_url("not a url").build();
        assert!(matches!(
            result,
            Err(Error::Api(ApiError::InvalidUrl(_)))
        ));
    }
}
