//! GitHub push payloads.
//!
//! GitHub does not always know who pushed: the `pusher` object is missing for
//! commits GitHub generates itself and for deliveries sent from the "Test Hook"
//! button. Tag pushes arrive with an empty `commits` array and the tagged
//! commit in `head_commit`.

use crate::types::{Event, RawPayload};

use super::payload::{PayloadPaths, normalize_with};

/// Field locations in GitHub push payloads.
pub const PATHS: PayloadPaths = PayloadPaths {
    pusher: &[&["pusher", "name"]],
    owner: &[&["repository", "owner", "name"], &["repository", "owner", "login"]],
    compare_url: &[&["compare"]],
};

/// Normalizes a GitHub push payload.
pub fn normalize(raw: RawPayload) -> Event {
    normalize_with(&PATHS, raw)
}
