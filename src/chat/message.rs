use std::collections::HashMap;

pub type PeerId = String;

/// Delivery state of one outgoing message at one peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    /// Transmitted, no acknowledgement yet.
    Sending,
    /// The peer acknowledged receipt (not display).
    Sent,
    /// The channel failed before an acknowledgement arrived.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Enter,
    Leave,
}

/// One entry of the append-only chat timeline.
///
/// `from`/`who` hold raw peer ids; display names are late-bound on every
/// read so renames stay visible in history. Per-peer send states are
/// updated in place as acknowledgements arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    Incoming {
        from: PeerId,
        text: String,
        when: u64,
    },
    Outgoing {
        text: String,
        when: u64,
        states: HashMap<PeerId, SendState>,
    },
    Status {
        who: PeerId,
        what: StatusKind,
        when: u64,
    },
}
