use std::fmt;
use std::sync::Arc;

use crate::media::{track::MediaTrack, track_kind::TrackKind};

struct StreamShared {
    tracks: Vec<MediaTrack>,
}

/// Shared handle over zero or more live tracks keyed by kind.
///
/// Clones are cheap and refer to the same underlying tracks. The component
/// that acquired the stream owns its lifecycle; everyone else only reads.
#[derive(Clone)]
pub struct StreamHandle {
    shared: Arc<StreamShared>,
}

impl StreamHandle {
    #[must_use]
    pub fn from_tracks(tracks: Vec<MediaTrack>) -> Self {
        Self {
            shared: Arc::new(StreamShared { tracks }),
        }
    }

    #[must_use]
    pub fn tracks(&self) -> &[MediaTrack] {
        &self.shared.tracks
    }

    /// First track of the given kind, if any.
    #[must_use]
    pub fn track(&self, kind: TrackKind) -> Option<&MediaTrack> {
        self.shared.tracks.iter().find(|t| t.kind() == kind)
    }

    /// Stops every track in the stream. Safe to call more than once.
    pub fn stop(&self) {
        for track in &self.shared.tracks {
            track.stop();
        }
    }

    #[must_use]
    pub fn same_stream(&self, other: &StreamHandle) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandle")
            .field("tracks", &self.shared.tracks)
            .finish()
    }
}
