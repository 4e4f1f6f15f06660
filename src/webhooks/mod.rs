//! Webhook payload normalization.
//!
//! Each provider adapter turns a raw JSON payload into the canonical
//! [`Event`](crate::types::Event). Normalization is a pure, total function: it
//! performs no I/O and never fails. Anything the payload lacks becomes an
//! absent field on the event.
//!
//! - [`refs`] resolves `refs/heads/*` and `refs/tags/*` paths
//! - [`payload`] holds the shared push-payload walker
//! - [`github`] and [`gitea`] describe where each provider keeps its fields

pub mod gitea;
pub mod github;
pub mod payload;
pub mod refs;

pub use payload::{PayloadPaths, normalize_with};
pub use refs::{parse_ref, resolve_ref};
