//! Per-hook configuration.
//!
//! Stored hook records carry a small JSON object using the keys below. Any key
//! may be missing (hooks created before a key existed have none of them), and a
//! missing key takes its default. A hook with no stored config at all behaves
//! exactly like [`HookConfig::default`].

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of the raw comma-separated `branches` value.
pub const MAX_BRANCHES_LEN: usize = 1024;

/// Errors raised when a stored configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `branches` value exceeds [`MAX_BRANCHES_LEN`].
    #[error("branches value is {len} characters long (max {MAX_BRANCHES_LEN})")]
    BranchesTooLong { len: usize },

    /// The stored JSON does not have the expected shape.
    #[error("invalid hook config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Branch allow-list for pushes with commits.
///
/// Names are trimmed and lower-cased. An empty filter allows every branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub struct BranchFilter(BTreeSet<String>);

impl BranchFilter {
    /// Parses a comma-separated list such as `"master, dev"`.
    ///
    /// Empty entries are dropped, so `""` and `" , "` both yield an empty filter.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let len = raw.chars().count();
        if len > MAX_BRANCHES_LEN {
            return Err(ConfigError::BranchesTooLong { len });
        }

        Ok(BranchFilter(
            raw.split(',')
                .map(|b| b.trim().to_lowercase())
                .filter(|b| !b.is_empty())
                .collect(),
        ))
    }

    /// Returns true if no branches are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `branch` (compared case-insensitively) is allowed.
    pub fn allows(&self, branch: &str) -> bool {
        self.is_empty() || self.0.contains(&branch.to_lowercase())
    }

    /// Iterates the configured names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for BranchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

impl TryFrom<Option<String>> for BranchFilter {
    type Error = ConfigError;

    fn try_from(raw: Option<String>) -> Result<Self, Self::Error> {
        match raw {
            Some(raw) => BranchFilter::parse(&raw),
            None => Ok(BranchFilter::default()),
        }
    }
}

impl From<BranchFilter> for Option<String> {
    fn from(filter: BranchFilter) -> Self {
        if filter.is_empty() {
            None
        } else {
            Some(filter.to_string())
        }
    }
}

impl<'a> FromIterator<&'a str> for BranchFilter {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        BranchFilter(
            iter.into_iter()
                .map(|b| b.trim().to_lowercase())
                .filter(|b| !b.is_empty())
                .collect(),
        )
    }
}

/// Configuration of one hook, read-only while formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Branches to forward; empty forwards all.
    #[serde(rename = "branches")]
    pub branch_filter: BranchFilter,

    /// Keep mIRC colour codes in the output.
    pub use_colors: bool,

    /// Mention the branch in push summaries.
    pub show_branch: bool,

    /// Report tag pushes that carry no commits.
    pub show_tags: bool,

    /// Attribute commits to the provider username when known.
    pub prefer_username: bool,

    /// Render the project as `owner/name` instead of `name`.
    pub full_project_name: bool,
}

impl Default for HookConfig {
    fn default() -> Self {
        HookConfig {
            branch_filter: BranchFilter::default(),
            use_colors: true,
            show_branch: true,
            show_tags: true,
            prefer_username: true,
            full_project_name: false,
        }
    }
}

impl HookConfig {
    /// Parses a stored configuration record.
    ///
    /// `null` is treated as "no config" and yields the defaults.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        if value.is_null() {
            return Ok(HookConfig::default());
        }
        if let Some(raw) = value.get("branches").and_then(|b| b.as_str()) {
            let len = raw.chars().count();
            if len > MAX_BRANCHES_LEN {
                return Err(ConfigError::BranchesTooLong { len });
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Returns true if lines should have colour codes stripped.
    pub fn strip_colors(&self) -> bool {
        !self.use_colors
    }
}
