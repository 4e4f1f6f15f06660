//! Boundaries to the rest of the system.
//!
//! Hook records live in a [`HookStore`]; formatted lines leave through a
//! [`DispatchSink`]. The HTTP layer depends only on these traits.

pub mod sink;
pub mod store;

pub use sink::{ChannelSink, ChannelTarget, DispatchError, DispatchSink, LogSink, Outbound};
pub use store::{HookRecord, HookStore, MemoryHookStore, StoreError};
