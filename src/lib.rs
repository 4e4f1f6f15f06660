//! Hook Relay - turns source-hosting webhooks into IRC notification lines.
//!
//! A webhook arrives for a registered hook, the hook's service normalizes the
//! payload into an [`Event`](types::Event), the formatter renders it into
//! IRC lines according to the hook's [`HookConfig`](types::HookConfig), and
//! each line is handed to a [`DispatchSink`](dispatch::DispatchSink).

pub mod dispatch;
pub mod message;
pub mod server;
pub mod services;
pub mod settings;
pub mod shortener;
pub mod types;
pub mod webhooks;

#[cfg(test)]
mod test_utils;
