//! Gitea (and Forgejo/Gogs) push payloads.
//!
//! The payload follows GitHub's layout, but users are identified by `username`
//! / `login` rather than `name`, and the compare link lives in `compare_url`.

use crate::types::{Event, RawPayload};

use super::payload::{PayloadPaths, normalize_with};

/// Field locations in Gitea push payloads.
pub const PATHS: PayloadPaths = PayloadPaths {
    pusher: &[&["pusher", "username"], &["pusher", "login"]],
    owner: &[
        &["repository", "owner", "username"],
        &["repository", "owner", "login"],
    ],
    compare_url: &[&["compare_url"]],
};

/// Normalizes a Gitea push payload.
pub fn normalize(raw: RawPayload) -> Event {
    normalize_with(&PATHS, raw)
}
