//! Git ref path resolution.

use serde_json::Value;

use crate::types::GitRef;

/// Parses a full ref path such as `refs/heads/main` or `refs/tags/v1.0`.
///
/// Returns `None` for other namespaces (`refs/pull/...`, `refs/notes/...`),
/// for bare names, and for an empty branch or tag name.
///
/// # Examples
///
/// ```
/// use hook_relay::types::GitRef;
/// use hook_relay::webhooks::parse_ref;
///
/// assert_eq!(parse_ref("refs/heads/main"), Some(GitRef::Branch("main".into())));
/// assert_eq!(parse_ref("refs/tags/v1.0"), Some(GitRef::Tag("v1.0".into())));
/// assert_eq!(parse_ref("refs/heads/feature/x"), Some(GitRef::Branch("feature/x".into())));
/// assert_eq!(parse_ref("refs/pull/1/head"), None);
/// assert_eq!(parse_ref("main"), None);
/// ```
pub fn parse_ref(path: &str) -> Option<GitRef> {
    let rest = path.strip_prefix("refs/")?;

    let git_ref = if let Some(name) = rest.strip_prefix("heads/") {
        GitRef::Branch(name.to_string())
    } else if let Some(name) = rest.strip_prefix("tags/") {
        GitRef::Tag(name.to_string())
    } else {
        return None;
    };

    if git_ref.name().is_empty() {
        None
    } else {
        Some(git_ref)
    }
}

/// Resolves the ref of a push payload.
///
/// Tries `ref` first, then `base_ref`; the first one that parses wins. Tag
/// pushes from some providers carry the tag in `ref` and the branch it points
/// into in `base_ref`, so the order matters.
pub fn resolve_ref(raw: &Value) -> Option<GitRef> {
    ["ref", "base_ref"]
        .into_iter()
        .filter_map(|key| raw.get(key).and_then(Value::as_str))
        .find_map(parse_ref)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn ref_wins_over_base_ref() {
        let raw = json!({ "ref": "refs/tags/v1.0", "base_ref": "refs/heads/main" });
        assert_eq!(resolve_ref(&raw), Some(GitRef::Tag("v1.0".into())));
    }

    #[test]
    fn falls_back_to_base_ref() {
        let raw = json!({ "ref": "something-else", "base_ref": "refs/heads/main" });
        assert_eq!(resolve_ref(&raw), Some(GitRef::Branch("main".into())));
    }

    #[test]
    fn null_and_missing_refs_resolve_to_none() {
        assert_eq!(resolve_ref(&json!({})), None);
        assert_eq!(resolve_ref(&json!({ "ref": null, "base_ref": null })), None);
        assert_eq!(resolve_ref(&json!({ "ref": 42 })), None);
        assert_eq!(resolve_ref(&json!("refs/heads/main")), None);
    }

    #[test]
    fn empty_names_are_rejected() {
        assert_eq!(parse_ref("refs/heads/"), None);
        assert_eq!(parse_ref("refs/tags/"), None);
    }

    #[test]
    fn prefix_must_be_anchored() {
        assert_eq!(parse_ref("xrefs/heads/main"), None);
        assert_eq!(parse_ref("heads/main"), None);
    }

    proptest! {
        #[test]
        fn branch_names_round_trip(name in "[a-zA-Z0-9][a-zA-Z0-9/._-]{0,40}") {
            let parsed = parse_ref(&format!("refs/heads/{}", name));
            prop_assert_eq!(parsed, Some(GitRef::Branch(name)));
        }

        #[test]
        fn arbitrary_input_never_panics(s: String) {
            let _ = parse_ref(&s);
        }
    }
}
