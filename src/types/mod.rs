//! Core domain types for the hook relay.
//!
//! The canonical [`Event`] is the provider-agnostic shape every webhook
//! adapter normalizes into. [`HookConfig`] is the per-hook configuration the
//! formatter consults. Both are constructed once per request and never mutated
//! afterwards.

pub mod config;
pub mod event;
pub mod ids;

pub use config::{BranchFilter, ConfigError, HookConfig, MAX_BRANCHES_LEN};
pub use event::{CommitInfo, Event, FileChanges, GitRef, RawPayload, RepositoryInfo};
pub use ids::{ProjectId, ServiceId, Sha};
