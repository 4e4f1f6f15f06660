//! Best-effort link shortening.
//!
//! Shortening is cosmetic. A [`LinkShortener`] always returns a usable URL:
//! the short form when the service cooperates, the original otherwise. Failures
//! are logged and never reach the caller. There is no retry.

use std::future::Future;

pub mod gitio;

pub use gitio::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, GitIoShortener, ShortenError};

/// Shortens URLs for display.
///
/// # Example (fixed result for testing)
///
/// ```ignore
/// struct Fixed;
///
/// impl LinkShortener for Fixed {
///     async fn shorten(&self, _url: &str) -> String {
///         "https://git.io/fixed".to_string()
///     }
/// }
/// ```
pub trait LinkShortener {
    /// Returns a shortened form of `url`, or `url` itself on any failure.
    fn shorten(&self, url: &str) -> impl Future<Output = String> + Send;
}

/// A shortener that returns every URL unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl LinkShortener for Passthrough {
    async fn shorten(&self, url: &str) -> String {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passthrough_returns_input() {
        assert_eq!(
            Passthrough.shorten("https://gitea.example/a").await,
            "https://gitea.example/a"
        );
    }
}
