//! git.io-style shortening service client.
//!
//! The service accepts `POST /` with a form field `url` and answers
//! `201 Created` with the short link in the `Location` header. Anything else
//! (another status, a missing header, a transport error, the timeout) is a
//! failure and the original URL is used.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::LOCATION;
use thiserror::Error;
use tracing::{debug, warn};

use super::LinkShortener;

/// The public git.io endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://git.io";

/// How long a single shortening request may take.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Why a shortening attempt failed.
#[derive(Debug, Error)]
pub enum ShortenError {
    /// Connection, TLS, or timeout failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with something other than 201 Created.
    ///
    /// Usually means the service is throttling us.
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// 201 Created without a usable `Location` header.
    #[error("response has no Location header")]
    MissingLocation,
}

/// Client for a git.io-compatible shortening service.
#[derive(Debug, Clone)]
pub struct GitIoShortener {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl Default for GitIoShortener {
    fn default() -> Self {
        Self::new()
    }
}

impl GitIoShortener {
    pub fn new() -> Self {
        // The short link is read from the Location header, so redirects
        // must not be followed.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    error = %e,
                    "Failed to build shortener client, falling back to one that follows redirects"
                );
                reqwest::Client::default()
            });
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns true if `url` already points at the shortening service.
    ///
    /// Such URLs are never sent to the service again, which makes
    /// shortening idempotent.
    pub fn is_shortened(&self, url: &str) -> bool {
        let host = strip_scheme(&self.endpoint);
        match strip_scheme(url).strip_prefix(host) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Performs one shortening request.
    pub async fn try_shorten(&self, url: &str) -> Result<String, ShortenError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("url", url)])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::CREATED {
            return Err(ShortenError::Status(status));
        }

        response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or(ShortenError::MissingLocation)
    }
}

impl LinkShortener for GitIoShortener {
    async fn shorten(&self, url: &str) -> String {
        if self.is_shortened(url) {
            return url.to_string();
        }

        match self.try_shorten(url).await {
            Ok(short) => {
                debug!(url = %url, short = %short, "Shortened link");
                short
            }
            Err(e) => {
                let timed_out = matches!(&e, ShortenError::Transport(err) if err.is_timeout());
                warn!(
                    url = %url,
                    error = %e,
                    timed_out,
                    "Link shortening failed, using original URL"
                );
                url.to_string()
            }
        }
    }
}

/// Removes a leading `http://` or `https://`.
fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}
