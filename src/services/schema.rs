//! Declarative configuration schemas.
//!
//! A schema lists the fields an external form renderer should offer for a
//! service. The keys are the keys [`HookConfig`](crate::types::HookConfig)
//! reads from the stored record.

use serde::Serialize;

use crate::types::MAX_BRANCHES_LEN;

/// The input a field takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text, optional, at most `max_len` characters.
    Text { max_len: usize },
    /// A checkbox.
    Bool { default: bool },
}

/// One configurable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfigField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

/// Fields shared by every push-style service.
pub const PUSH_HOOK_FIELDS: &[ConfigField] = &[
    ConfigField {
        key: "branches",
        label: "Branches",
        kind: FieldKind::Text {
            max_len: MAX_BRANCHES_LEN,
        },
        description: "A comma-separated list of branches to forward, or blank for all. \
                      Ex: \"master, dev\"",
    },
    ConfigField {
        key: "use_colors",
        label: "Use Colors",
        kind: FieldKind::Bool { default: true },
        description: "If checked, commit messages will include minor mIRC coloring.",
    },
    ConfigField {
        key: "show_branch",
        label: "Show Branch Name",
        kind: FieldKind::Bool { default: true },
        description: "If checked, commit messages will include the branch name.",
    },
    ConfigField {
        key: "show_tags",
        label: "Show Tags",
        kind: FieldKind::Bool { default: true },
        description: "If checked, changes to tags will be shown.",
    },
    ConfigField {
        key: "prefer_username",
        label: "Prefer Usernames",
        kind: FieldKind::Bool { default: true },
        description: "If checked, show usernames instead of committer names when possible.",
    },
    ConfigField {
        key: "full_project_name",
        label: "Full Project Name",
        kind: FieldKind::Bool { default: false },
        description: "If checked, show the full repository name (ex: tktech/notifico) \
                      instead of the short name (ex: notifico).",
    },
];
