//! The canonical, provider-agnostic webhook event.
//!
//! Every provider adapter in [`crate::webhooks`] maps its own payload shape
//! into an [`Event`]. Fields the provider did not send are `None` (or empty);
//! nothing here is ever an error. The message formatter decides what an
//! incomplete event means for the output.

use serde::{Deserialize, Serialize};

use super::ids::Sha;

/// The raw JSON payload as received from the provider.
pub type RawPayload = serde_json::Value;

/// The ref a push targeted.
///
/// A single ref path resolves to a branch or a tag, never both, so the event
/// carries at most one of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum GitRef {
    /// `refs/heads/<name>`
    Branch(String),
    /// `refs/tags/<name>`
    Tag(String),
}

impl GitRef {
    /// Returns the branch or tag name.
    pub fn name(&self) -> &str {
        match self {
            GitRef::Branch(name) | GitRef::Tag(name) => name,
        }
    }
}

/// File movement summed over every commit in a push.
///
/// Paths are kept in encounter order. A path touched by several commits appears
/// once per commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChanges {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
    /// `added`, `removed` and `modified` of each commit, commit by commit.
    pub all: Vec<String>,
}

impl FileChanges {
    /// Records one commit's file lists.
    pub fn record_commit(&mut self, added: &[String], removed: &[String], modified: &[String]) {
        for (paths, bucket) in [
            (added, &mut self.added),
            (removed, &mut self.removed),
            (modified, &mut self.modified),
        ] {
            bucket.extend_from_slice(paths);
            self.all.extend_from_slice(paths);
        }
    }
}

/// One commit of a push.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: Sha,
    pub message: String,
    pub author_name: Option<String>,
    pub author_username: Option<String>,
    pub committer_name: Option<String>,
}

/// Repository-level fields of a push.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: Option<String>,
    pub owner_name: Option<String>,
    pub compare_url: Option<String>,
    pub head_commit_url: Option<String>,
    pub head_commit_sha: Option<Sha>,
}

/// A normalized push or tag event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub git_ref: Option<GitRef>,
    /// Absent for pushes the provider generated itself.
    pub pusher_name: Option<String>,
    pub file_changes: FileChanges,
    /// In provider order.
    pub commits: Vec<CommitInfo>,
    pub repository: RepositoryInfo,
    /// The untouched payload, for provider-specific extras.
    pub raw: RawPayload,
}

impl Event {
    /// Returns the pushed branch, if the ref was a branch.
    pub fn branch(&self) -> Option<&str> {
        match &self.git_ref {
            Some(GitRef::Branch(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns the pushed tag, if the ref was a tag.
    pub fn tag(&self) -> Option<&str> {
        match &self.git_ref {
            Some(GitRef::Tag(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns the project name to display: `name`, or `owner/name` when
    /// `full` is set and the owner is known.
    ///
    /// Returns `None` if the payload carried no repository name.
    pub fn project_label(&self, full: bool) -> Option<String> {
        let name = self.repository.name.as_deref()?;
        match (&self.repository.owner_name, full) {
            (Some(owner), true) => Some(format!("{}/{}", owner, name)),
            _ => Some(name.to_string()),
        }
    }
}
