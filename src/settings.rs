//! Process configuration from environment variables.
//!
//! | Variable                          | Default        |
//! |-----------------------------------|----------------|
//! | `HOOK_RELAY_LISTEN_ADDR`          | `0.0.0.0:3000` |
//! | `HOOK_RELAY_SHORTENER_URL`        | `http://git.io`|
//! | `HOOK_RELAY_SHORTENER_TIMEOUT_MS` | `4000`         |
//! | `HOOK_RELAY_HOOKS_FILE`           | unset          |
//!
//! Values that fail to parse fall back to the default with a warning.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::shortener::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, GitIoShortener};

pub const ENV_LISTEN_ADDR: &str = "HOOK_RELAY_LISTEN_ADDR";
pub const ENV_SHORTENER_URL: &str = "HOOK_RELAY_SHORTENER_URL";
pub const ENV_SHORTENER_TIMEOUT_MS: &str = "HOOK_RELAY_SHORTENER_TIMEOUT_MS";
pub const ENV_HOOKS_FILE: &str = "HOOK_RELAY_HOOKS_FILE";

const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub listen_addr: SocketAddr,
    pub shortener_url: String,
    pub shortener_timeout: Duration,
    /// Where to load hook records from. Without one the relay knows no hooks.
    pub hooks_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            listen_addr: DEFAULT_LISTEN_ADDR,
            shortener_url: DEFAULT_ENDPOINT.to_string(),
            shortener_timeout: DEFAULT_TIMEOUT,
            hooks_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Settings::default();
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout_ms = parse_or(
            ENV_SHORTENER_TIMEOUT_MS,
            var(ENV_SHORTENER_TIMEOUT_MS),
            defaults.shortener_timeout.as_millis() as u64,
        );

        Settings {
            listen_addr: parse_or(ENV_LISTEN_ADDR, var(ENV_LISTEN_ADDR), defaults.listen_addr),
            shortener_url: var(ENV_SHORTENER_URL).unwrap_or(defaults.shortener_url),
            shortener_timeout: Duration::from_millis(timeout_ms),
            hooks_file: var(ENV_HOOKS_FILE).map(PathBuf::from),
        }
    }

    pub fn shortener(&self) -> GitIoShortener {
        GitIoShortener::new()
            .with_endpoint(self.shortener_url.clone())
            .with_timeout(self.shortener_timeout)
    }
}

fn parse_or<T: FromStr>(name: &str, raw: Option<String>, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            warn!(variable = name, value = %raw, error = %e, "Ignoring unparseable setting");
            default
        }
    }
}
