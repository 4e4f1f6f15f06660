//! Message formatting.
//!
//! Turns a canonical [`Event`](crate::types::Event) and a
//! [`HookConfig`](crate::types::HookConfig) into zero or more single-line IRC
//! messages:
//!
//! - [`palette`] holds the mIRC colour table and the role-to-colour mapping
//! - [`line`] holds [`FormattedLine`], colour stripping and field sanitizing
//! - [`render`] decides what to report and builds the lines lazily
//!
//! Lines are always built with colour codes. When a hook has colours turned
//! off the codes are stripped from the finished line, so coloured and plain
//! output can never disagree on content.

pub mod line;
pub mod palette;
pub mod render;

pub use line::{FormattedLine, MAX_FIELD_LEN, MAX_LINK_LEN, MAX_MESSAGE_LEN, strip_colors};
pub use palette::{Color, Palette};
pub use render::{Lines, Summary, format_event, plan, render};
