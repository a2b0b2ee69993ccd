use std::fmt;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use crate::media::track_kind::TrackKind;

type ReleaseHook = Box<dyn FnOnce() + Send>;

struct TrackShared {
    kind: TrackKind,
    device_id: Option<String>,
    stopped: AtomicBool,
    release: Mutex<Option<ReleaseHook>>,
}

/// A single live audio or video track.
///
/// Clones share one underlying track; identity is reference identity, so a
/// consumer can tell "same track survived reconfiguration" apart from "a
/// fresh track from the same device". `stop` releases the underlying capture
/// exactly once, no matter how many clones exist — consumers that merely
/// read a track (preview, metering, transceivers) must never call it.
#[derive(Clone)]
pub struct MediaTrack {
    shared: Arc<TrackShared>,
}

impl MediaTrack {
    #[must_use]
    pub fn new(kind: TrackKind, device_id: Option<String>) -> Self {
        Self::with_release(kind, device_id, None)
    }

    /// A track carrying a hook that fires on first `stop` (hardware release).
    #[must_use]
    pub fn with_release(
        kind: TrackKind,
        device_id: Option<String>,
        release: Option<ReleaseHook>,
    ) -> Self {
        Self {
            shared: Arc::new(TrackShared {
                kind,
                device_id,
                stopped: AtomicBool::new(false),
                release: Mutex::new(release),
            }),
        }
    }

    #[must_use]
    pub fn kind(&self) -> TrackKind {
        self.shared.kind
    }

    #[must_use]
    pub fn device_id(&self) -> Option<&str> {
        self.shared.device_id.as_deref()
    }

    /// Stops the track. Subsequent calls are no-ops.
    pub fn stop(&self) {
        if self.shared.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        let hook = self.shared.release.lock().ok().and_then(|mut g| g.take());
        if let Some(hook) = hook {
            hook();
        }
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.shared.stopped.load(Ordering::SeqCst)
    }

    /// Reference identity: true iff both handles refer to the same live track.
    #[must_use]
    pub fn same_track(&self, other: &MediaTrack) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl fmt::Debug for MediaTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaTrack")
            .field("kind", &self.shared.kind)
            .field("device_id", &self.shared.device_id)
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn stop_fires_release_hook_exactly_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let fired_clone = Arc::clone(&fired);
        let track = MediaTrack::with_release(
            TrackKind::Audio,
            None,
            Some(Box::new(move || {
                fired_clone.fetch_add(1, Ordering::SeqCst);
            })),
        );

        let alias = track.clone();
        track.stop();
        alias.stop();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(alias.is_stopped());
    }

    #[test]
    fn identity_is_per_track_not_per_device() {
        let a = MediaTrack::new(TrackKind::Video, Some("cam".into()));
        let b = MediaTrack::new(TrackKind::Video, Some("cam".into()));

        assert!(a.same_track(&a.clone()));
        assert!(!a.same_track(&b));
    }
}
