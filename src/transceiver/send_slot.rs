use crate::media::{track::MediaTrack, track_kind::TrackKind};

/// Direction of a transport send slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotDirection {
    /// A local track is attached and being sent.
    SendRecv,
    /// No local track; the slot only receives.
    RecvOnly,
}

/// One transport-level endpoint for a single track.
///
/// Slots are established once per peer and kind and then reused across
/// every track swap — the transport never has to renegotiate its topology
/// because a camera was toggled.
pub trait SendSlot: Send {
    /// Swaps the outgoing track in place without renegotiation.
    fn replace_track(&mut self, track: Option<MediaTrack>);

    fn set_direction(&mut self, direction: SlotDirection);
}

/// The injected peer transport that hands out send slots.
pub trait SlotHost {
    /// Creates a slot under the given logical stream label, optionally
    /// pre-loaded with a track. Called only during binder attach.
    fn create_send_slot(
        &mut self,
        stream_label: &str,
        kind: TrackKind,
        track: Option<MediaTrack>,
        direction: SlotDirection,
    ) -> Box<dyn SendSlot>;
}
