use std::fmt;

use bytes::Bytes;

/// Lifecycle and traffic notifications from a peer channel, drained via
/// [`MessageChannel::poll_event`].
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    /// The connect handshake completed; queued sends may flush.
    Open,
    /// One complete inbound payload.
    Message(Bytes),
    Closed,
    Error(String),
}

#[derive(Debug)]
pub enum ChannelError {
    NotConnected,
    Closed,
    Io(String),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ChannelError::*;
        match self {
            NotConnected => write!(f, "channel not connected"),
            Closed => write!(f, "channel closed"),
            Io(e) => write!(f, "channel io error: {e}"),
        }
    }
}

impl std::error::Error for ChannelError {}

/// A reliable-ordered bidirectional message channel to one remote peer.
///
/// The transport establishes it lazily; implementations surface `Open` once
/// the handshake finishes and deliver complete payloads in order.
pub trait MessageChannel: Send {
    fn poll_event(&mut self) -> Option<ChannelEvent>;

    fn send(&mut self, payload: &[u8]) -> Result<(), ChannelError>;
}
