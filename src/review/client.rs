//! Review API client.

use http::header::{AUTHORIZATION, HeaderValue, InvalidHeaderValue};
use serde_json::Value;
use url::Url;

use super::ReviewError;
use super::error::reason;
use crate::time::{Clock, SystemClock};
use crate::transport::{HttpClient, HttpRequest};

/// Source of raw homework status responses.
///
/// This abstraction separates the poll loop from HTTP details and
/// enables testing the loop with scripted responses.
pub trait ReviewApi: Send + Sync {
    /// Fetches statuses changed since `since` (Unix seconds).
    ///
    /// A `since` of 0 means "now".
    ///
    /// # Errors
    ///
    /// - [`ReviewError::Connectivity`] if the request cannot complete
    /// - [`ReviewError::UpstreamUnavailable`] if the status is not 200
    /// - [`ReviewError::MalformedResponse`] if the body is not JSON
    fn fetch_status(
        &self,
        since: i64,
    ) -> impl std::future::Future<Output = Result<Value, ReviewError>> + Send;
}

/// Builds the `Authorization: OAuth <token>` header value.
///
/// The value is marked sensitive so it is redacted from debug output.
///
/// # Errors
///
/// Returns an error if the token contains characters not allowed in a header.
pub fn oauth_header(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut value = HeaderValue::from_str(&format!("OAuth {token}"))?;
    value.set_sensitive(true);
    Ok(value)
}

/// HTTP client for the homework statuses endpoint.
///
/// # Type Parameters
///
/// * `H` - The [`HttpClient`] used to send requests
/// * `C` - The [`Clock`] used to resolve a `since` of 0 (defaults to [`SystemClock`])
#[derive(Debug, Clone)]
pub struct PracticumClient<H, C = SystemClock> {
    http: H,
    clock: C,
    endpoint: Url,
    authorization: HeaderValue,
}

impl<H> PracticumClient<H, SystemClock> {
    /// Creates a client for `endpoint` authorized with `authorization`
    /// (see [`oauth_header`]).
    #[must_use]
    pub const fn new(http: H, endpoint: Url, authorization: HeaderValue) -> Self {
        Self {
            http,
            clock: SystemClock,
            endpoint,
            authorization,
        }
    }
}

impl<H, C> PracticumClient<H, C> {
    /// Replaces the clock used to resolve a `since` of 0.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> PracticumClient<H, C2> {
        PracticumClient {
            http: self.http,
            clock,
            endpoint: self.endpoint,
            authorization: self.authorization,
        }
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl<H: HttpClient, C: Clock> ReviewApi for PracticumClient<H, C> {
    async fn fetch_status(&self, since: i64) -> Result<Value, ReviewError> {
        let from_date = if since == 0 {
            self.clock.unix_seconds()
        } else {
            since
        };

        tracing::info!("Запрос к API");
        tracing::debug!("GET {} from_date={from_date}", self.endpoint);

        let request = HttpRequest::get(self.endpoint.clone())
            .with_query("from_date", &from_date.to_string())
            .with_header(AUTHORIZATION, self.authorization.clone());

        let response = self
            .http
            .request(request)
            .await
            .map_err(ReviewError::Connectivity)?;

        if response.status != http::StatusCode::OK {
            tracing::debug!(
                "Review API answered {}: {}",
                response.status,
                response.body_text().unwrap_or("<binary>")
            );
            return Err(ReviewError::UpstreamUnavailable {
                status: response.status,
            });
        }

        response.json().map_err(|e| {
            tracing::debug!("Review API body is not JSON: {e}");
            ReviewError::MalformedResponse {
                reason: reason::NOT_JSON,
            }
        })
    }
}
