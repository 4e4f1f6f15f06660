//! Hook records and their lookup.
//!
//! A hook is a secret URL (`/h/{project}/{key}`) bound to one service and a
//! set of channels. Formatting options are stored per project and service,
//! so every hook a project has for the same service shares one
//! [`HookConfig`]. The relay never writes hooks; it only reads them from a
//! [`HookStore`].
//!
//! # Hooks file
//!
//! [`MemoryHookStore::load`] reads a JSON document of the form:
//!
//! ```json
//! {
//!   "hooks": [
//!     {
//!       "project": "notifico",
//!       "key": "s3cr3t",
//!       "service_id": 10,
//!       "channels": [{ "network": "libera", "channel": "#notifico" }],
//!       "config": { "branches": "main, dev", "use_colors": true }
//!     }
//!   ]
//! }
//! ```
//!
//! `config` may be omitted or `null`, in which case defaults apply. When two
//! entries for the same project and service both carry a `config`, the later
//! one wins.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::{fs, io};
use thiserror::Error;

use super::sink::ChannelTarget;
use crate::types::{ConfigError, HookConfig, ProjectId, ServiceId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A hook's `config` object was rejected.
    #[error("invalid config for hook in project {project}: {source}")]
    Config {
        project: ProjectId,
        #[source]
        source: ConfigError,
    },
}

/// A registered hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookRecord {
    pub project: ProjectId,
    pub key: String,
    pub service_id: ServiceId,
    pub channels: Vec<ChannelTarget>,
}

/// Read access to hook records.
pub trait HookStore: Send + Sync {
    /// Looks up a hook by its URL components.
    fn find_hook(&self, project: &ProjectId, key: &str) -> Option<HookRecord>;

    /// The project's configuration for the given service, if one is stored.
    fn load_config(&self, project: &ProjectId, service_id: ServiceId) -> Option<HookConfig>;
}

#[derive(Debug, Deserialize)]
struct HooksFile {
    #[serde(default)]
    hooks: Vec<HookEntry>,
}

#[derive(Debug, Deserialize)]
struct HookEntry {
    project: ProjectId,
    key: String,
    service_id: ServiceId,
    #[serde(default)]
    channels: Vec<ChannelTarget>,
    #[serde(default)]
    config: serde_json::Value,
}

impl HookEntry {
    fn into_parts(self) -> Result<(HookRecord, Option<HookConfig>), StoreError> {
        let config = if self.config.is_null() {
            None
        } else {
            let config =
                HookConfig::from_value(self.config).map_err(|source| StoreError::Config {
                    project: self.project.clone(),
                    source,
                })?;
            Some(config)
        };
        let record = HookRecord {
            project: self.project,
            key: self.key,
            service_id: self.service_id,
            channels: self.channels,
        };
        Ok((record, config))
    }
}

/// An in-memory hook table.
#[derive(Debug, Clone, Default)]
pub struct MemoryHookStore {
    hooks: HashMap<(ProjectId, String), HookRecord>,
    configs: HashMap<(ProjectId, ServiceId), HookConfig>,
}

impl MemoryHookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hook, replacing any hook with the same project and key.
    pub fn insert(&mut self, record: HookRecord) {
        self.hooks
            .insert((record.project.clone(), record.key.clone()), record);
    }

    /// Stores the configuration for a project's hooks of one service.
    pub fn set_config(&mut self, project: ProjectId, service_id: ServiceId, config: HookConfig) {
        self.configs.insert((project, service_id), config);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Parses a hooks document.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let file: HooksFile = serde_json::from_str(json)?;
        let mut store = Self::new();
        for entry in file.hooks {
            let (record, config) = entry.into_parts()?;
            if let Some(config) = config {
                store.set_config(record.project.clone(), record.service_id, config);
            }
            store.insert(record);
        }
        Ok(store)
    }

    /// Loads a hooks file from disk.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl FromIterator<HookRecord> for MemoryHookStore {
    fn from_iter<I: IntoIterator<Item = HookRecord>>(iter: I) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.insert(record);
        }
        store
    }
}

impl HookStore for MemoryHookStore {
    fn find_hook(&self, project: &ProjectId, key: &str) -> Option<HookRecord> {
        self.hooks.get(&(project.clone(), key.to_string())).cloned()
    }

    fn load_config(&self, project: &ProjectId, service_id: ServiceId) -> Option<HookConfig> {
        self.configs.get(&(project.clone(), service_id)).cloned()
    }
}
