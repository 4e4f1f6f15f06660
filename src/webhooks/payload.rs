//! Shared push-payload walker.
//!
//! GitHub-style push payloads agree on most of their structure (`ref`,
//! `commits[]` with `added`/`removed`/`modified`, `head_commit`,
//! `repository.name`) and disagree on a handful of field names. Adapters
//! describe those differences with a [`PayloadPaths`] table and delegate the
//! walk to [`normalize_with`].

use serde_json::Value;

use crate::types::{CommitInfo, Event, FileChanges, RawPayload, RepositoryInfo, Sha};

use super::refs::resolve_ref;

/// A JSON path: object keys from the payload root.
pub type JsonPath = &'static [&'static str];

/// Provider-specific locations of the fields that differ between providers.
///
/// Every entry is a list of candidate paths tried in order; the first path
/// holding a non-empty string wins.
#[derive(Debug, Clone, Copy)]
pub struct PayloadPaths {
    pub pusher: &'static [JsonPath],
    pub owner: &'static [JsonPath],
    pub compare_url: &'static [JsonPath],
}

/// Builds an [`Event`] from a raw payload using the given field table.
///
/// Never fails. Fields that are missing, `null`, empty, or of the wrong JSON
/// type are left absent.
pub fn normalize_with(paths: &PayloadPaths, raw: RawPayload) -> Event {
    let mut file_changes = FileChanges::default();
    let commits: Vec<CommitInfo> = raw
        .get("commits")
        .and_then(Value::as_array)
        .map(|commits| {
            commits
                .iter()
                .filter(|c| c.is_object())
                .map(|c| {
                    file_changes.record_commit(
                        &string_list(c, "added"),
                        &string_list(c, "removed"),
                        &string_list(c, "modified"),
                    );
                    commit_info(c)
                })
                .collect()
        })
        .unwrap_or_default();

    let repository = RepositoryInfo {
        name: string_at(&raw, &["repository", "name"]),
        owner_name: first_string(&raw, paths.owner),
        compare_url: first_string(&raw, paths.compare_url),
        head_commit_url: string_at(&raw, &["head_commit", "url"]),
        head_commit_sha: string_at(&raw, &["head_commit", "id"]).map(Sha::from),
    };

    Event {
        git_ref: resolve_ref(&raw),
        pusher_name: first_string(&raw, paths.pusher),
        file_changes,
        commits,
        repository,
        raw,
    }
}

fn commit_info(commit: &Value) -> CommitInfo {
    CommitInfo {
        sha: string_at(commit, &["id"]).map(Sha::from).unwrap_or_default(),
        message: string_at(commit, &["message"]).unwrap_or_default(),
        author_name: string_at(commit, &["author", "name"]),
        author_username: string_at(commit, &["author", "username"]),
        committer_name: string_at(commit, &["committer", "name"]),
    }
}

/// Follows `path` from `value`, returning a non-empty string if one is there.
pub fn string_at(value: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_string(value: &Value, candidates: &[JsonPath]) -> Option<String> {
    candidates.iter().find_map(|path| string_at(value, path))
}

/// Collects the string entries of an array field, skipping anything else.
fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
