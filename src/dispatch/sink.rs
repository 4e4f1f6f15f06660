//! Delivery of formatted lines to IRC channels.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

use crate::message::FormattedLine;

/// An IRC channel on a particular network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelTarget {
    pub network: String,
    pub channel: String,
}

impl ChannelTarget {
    pub fn new(network: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            channel: channel.into(),
        }
    }
}

impl fmt::Display for ChannelTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.channel, self.network)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The transport on the other side has shut down.
    #[error("dispatch channel closed")]
    Closed,
}

/// Accepts formatted lines for delivery.
///
/// Delivery is fire-and-forget from the caller's point of view: an `Ok`
/// means the line was handed off, not that it reached IRC.
pub trait DispatchSink: Send + Sync {
    fn deliver(&self, target: &ChannelTarget, line: &FormattedLine) -> Result<(), DispatchError>;
}

/// A line addressed to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub target: ChannelTarget,
    pub line: FormattedLine,
}

/// Forwards lines over an unbounded tokio channel to the bot transport.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ChannelSink {
    /// Creates a sink and the receiver the transport reads from.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl DispatchSink for ChannelSink {
    fn deliver(&self, target: &ChannelTarget, line: &FormattedLine) -> Result<(), DispatchError> {
        self.tx
            .send(Outbound {
                target: target.clone(),
                line: line.clone(),
            })
            .map_err(|_| DispatchError::Closed)
    }
}

/// Emits every line as a tracing event. Used when no transport is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DispatchSink for LogSink {
    fn deliver(&self, target: &ChannelTarget, line: &FormattedLine) -> Result<(), DispatchError> {
        info!(
            network = %target.network,
            channel = %target.channel,
            line = %line,
            "Dispatching line"
        );
        Ok(())
    }
}
