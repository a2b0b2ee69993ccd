use std::sync::Arc;

use crate::log::log_sink::LogSink;
use crate::media::{stream::StreamHandle, track::MediaTrack, track_kind::TrackKind};
use crate::transceiver::send_slot::{SendSlot, SlotDirection, SlotHost};
use crate::{sink_debug, sink_info};

struct BoundSlot {
    kind: TrackKind,
    slot: Box<dyn SendSlot>,
    /// The track currently attached, for identity-based no-op detection.
    track: Option<MediaTrack>,
}

/// Binds a (possibly changing) logical stream to transport send slots.
///
/// Slots are created once per attached peer — with a placeholder when no
/// track exists yet — and afterwards only ever have their track swapped in
/// place and their direction toggled. Attaching early with placeholders is
/// what lets a user toggle camera and microphone freely without triggering
/// a renegotiation per toggle.
pub struct TransceiverBinder {
    stream_label: String,
    kinds: Vec<TrackKind>,
    stream: Option<StreamHandle>,
    slots: Vec<BoundSlot>,
    logger: Arc<dyn LogSink>,
}

impl TransceiverBinder {
    pub fn new(
        stream_label: impl Into<String>,
        kinds: impl Into<Vec<TrackKind>>,
        logger: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            stream_label: stream_label.into(),
            kinds: kinds.into(),
            stream: None,
            slots: Vec::new(),
            logger,
        }
    }

    /// Creates this binder's slots on a newly joined peer. The slots start
    /// from the current stream state and follow every later change.
    pub fn attach(&mut self, host: &mut dyn SlotHost) {
        for &kind in &self.kinds {
            let track = self.stream.as_ref().and_then(|s| s.track(kind)).cloned();
            let direction = direction_for(track.as_ref());
            let slot = host.create_send_slot(&self.stream_label, kind, track.clone(), direction);
            sink_info!(self.logger, "created {kind} slot on '{}'", self.stream_label);
            self.slots.push(BoundSlot { kind, slot, track });
        }
    }

    /// Points every bound slot at the new stream's tracks. A slot whose
    /// track is reference-identical to the incoming one is left untouched.
    pub fn set_stream(&mut self, stream: Option<StreamHandle>) {
        for bound in &mut self.slots {
            let next = stream.as_ref().and_then(|s| s.track(bound.kind)).cloned();

            let unchanged = match (&bound.track, &next) {
                (None, None) => true,
                (Some(current), Some(incoming)) => current.same_track(incoming),
                _ => false,
            };
            if unchanged {
                continue;
            }

            sink_debug!(
                self.logger,
                "swapping {} track on '{}'",
                bound.kind,
                self.stream_label
            );
            bound.slot.replace_track(next.clone());
            bound.slot.set_direction(direction_for(next.as_ref()));
            bound.track = next;
        }

        self.stream = stream;
    }

    #[must_use]
    pub fn stream(&self) -> Option<&StreamHandle> {
        self.stream.as_ref()
    }
}

fn direction_for(track: Option<&MediaTrack>) -> SlotDirection {
    if track.is_some() {
        SlotDirection::SendRecv
    } else {
        SlotDirection::RecvOnly
    }
}
