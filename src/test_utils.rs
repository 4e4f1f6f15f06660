//! Shared test fixtures and arbitrary generators for property-based testing.

use crate::types::{
    BranchFilter, CommitInfo, Event, FileChanges, GitRef, HookConfig, RepositoryInfo, Sha,
};
use proptest::prelude::*;
use serde_json::Value;

/// A commit with only a SHA and a message.
pub fn commit(sha: &str, message: &str) -> CommitInfo {
    CommitInfo {
        sha: Sha::new(sha),
        message: message.to_string(),
        ..CommitInfo::default()
    }
}

/// `alice` pushing `commits` to `branch` of `org/proj`, touching `a.py`.
pub fn push_event(branch: &str, commits: Vec<CommitInfo>) -> Event {
    Event {
        git_ref: Some(GitRef::Branch(branch.to_string())),
        pusher_name: Some("alice".to_string()),
        file_changes: FileChanges {
            modified: vec!["a.py".to_string()],
            all: vec!["a.py".to_string()],
            ..FileChanges::default()
        },
        commits,
        repository: RepositoryInfo {
            name: Some("proj".to_string()),
            owner_name: Some("org".to_string()),
            compare_url: Some("https://github.com/org/proj/compare/x...y".to_string()),
            head_commit_url: None,
            head_commit_sha: None,
        },
        raw: Value::Null,
    }
}

/// An anonymous push of `tag` on `deadbeef00` with no commits.
pub fn tag_event(tag: &str) -> Event {
    Event {
        git_ref: Some(GitRef::Tag(tag.to_string())),
        pusher_name: None,
        file_changes: FileChanges::default(),
        commits: Vec::new(),
        repository: RepositoryInfo {
            name: Some("proj".to_string()),
            owner_name: Some("org".to_string()),
            compare_url: None,
            head_commit_url: Some("https://x/y".to_string()),
            head_commit_sha: Some(Sha::new("deadbeef00")),
        },
        raw: Value::Null,
    }
}

/// Free text that may carry newlines, colour codes and other control bytes.
pub fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ._-]{0,30}",
        "[a-z]{1,10}(\r?\n[a-z ]{0,20}){0,3}",
        "[\\x00-\\x1f a-z0-9]{0,20}",
        any::<String>(),
    ]
}

/// Mostly real SHAs, sometimes whatever a hostile payload puts in `id`.
pub fn arb_sha() -> impl Strategy<Value = Sha> {
    prop_oneof![
        3 => "[0-9a-f]{40}".prop_map(Sha::new),
        1 => arb_text().prop_map(Sha::new),
        1 => "[0-9a-f]{0,4}\r?\n[A-Z]{1,8} :[a-z]{0,8}".prop_map(Sha::new),
    ]
}

pub fn arb_git_ref() -> impl Strategy<Value = Option<GitRef>> {
    prop_oneof![
        Just(None),
        "[a-zA-Z][a-zA-Z0-9/_-]{0,20}".prop_map(|b| Some(GitRef::Branch(b))),
        "v[0-9]{1,2}(\\.[0-9]{1,2}){0,2}".prop_map(|t| Some(GitRef::Tag(t))),
    ]
}

pub fn arb_commit() -> impl Strategy<Value = CommitInfo> {
    (
        arb_sha(),
        arb_text(),
        prop::option::of(arb_text()),
        prop::option::of("[a-z][a-z0-9-]{0,15}"),
        prop::option::of(arb_text()),
    )
        .prop_map(
            |(sha, message, author_name, author_username, committer_name)| CommitInfo {
                sha,
                message,
                author_name,
                author_username,
                committer_name,
            },
        )
}

/// Events that always carry a displayable repository name.
pub fn arb_event() -> impl Strategy<Value = Event> {
    (
        arb_git_ref(),
        prop::option::of(arb_text()),
        prop::collection::vec(arb_commit(), 0..5),
        "[a-z][a-z0-9-]{0,15}",
        prop::option::of("[a-z][a-z0-9-]{0,15}"),
        prop::option::of(arb_sha()),
        prop::collection::vec("[a-z]{1,8}\\.rs", 0..4),
    )
        .prop_map(
            |(git_ref, pusher_name, commits, name, owner_name, head_commit_sha, paths)| {
                let mut file_changes = FileChanges::default();
                for _ in &commits {
                    file_changes.record_commit(&paths, &[], &paths);
                }
                Event {
                    git_ref,
                    pusher_name,
                    file_changes,
                    commits,
                    repository: RepositoryInfo {
                        name: Some(name),
                        owner_name,
                        compare_url: Some("https://github.com/org/proj/compare/a...b".to_string()),
                        head_commit_url: Some("https://github.com/org/proj/commit/a".to_string()),
                        head_commit_sha,
                    },
                    raw: Value::Null,
                }
            },
        )
}

pub fn arb_config() -> impl Strategy<Value = HookConfig> {
    (
        prop::collection::vec("[a-z]{1,8}", 0..3),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(branches, use_colors, show_branch, show_tags, prefer_username, full_project_name)| {
                HookConfig {
                    branch_filter: branches.iter().map(String::as_str).collect::<BranchFilter>(),
                    use_colors,
                    show_branch,
                    show_tags,
                    prefer_username,
                    full_project_name,
                }
            },
        )
}
