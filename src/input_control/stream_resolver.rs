use crate::media::stream::StreamHandle;

/// Tracks the single current acquisition target and its settled stream.
///
/// Every new target gets a fresh generation token; a result may only be
/// committed with the token it was started under. Results carrying a stale
/// token are rejected, which is the whole supersession mechanism: a slow
/// acquisition that was replaced (or cleared) can never overwrite newer
/// state, no matter when it finishes.
#[derive(Debug, Default)]
pub struct StreamResolver {
    generation: u64,
    active: bool,
    stream: Option<StreamHandle>,
}

impl StreamResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new target, superseding any outstanding one. Returns the
    /// token the eventual result must present to `try_commit`.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.active = true;
        self.generation
    }

    /// Drops the current target. The settled stream (if any) is handed back
    /// to the caller, who owns its release.
    pub fn clear(&mut self) -> Option<StreamHandle> {
        self.generation += 1;
        self.active = false;
        self.stream.take()
    }

    /// Commits a settled result iff its token is still current. Returns
    /// whether the result was accepted.
    pub fn try_commit(&mut self, generation: u64, stream: Option<StreamHandle>) -> bool {
        if !self.active || generation != self.generation {
            return false;
        }
        self.stream = stream;
        true
    }

    #[must_use]
    pub fn stream(&self) -> Option<&StreamHandle> {
        self.stream.as_ref()
    }

    /// True while a target is set (settled or not).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::media::{track::MediaTrack, track_kind::TrackKind};

    fn stream() -> StreamHandle {
        StreamHandle::from_tracks(vec![MediaTrack::new(TrackKind::Audio, None)])
    }

    #[test]
    fn commits_only_the_current_generation() {
        let mut resolver = StreamResolver::new();
        let first = resolver.begin();
        let second = resolver.begin();

        let stale = stream();
        let fresh = stream();

        assert!(!resolver.try_commit(first, Some(stale)));
        assert!(resolver.stream().is_none());

        assert!(resolver.try_commit(second, Some(fresh.clone())));
        assert!(resolver.stream().unwrap().same_stream(&fresh));
    }

    #[test]
    fn clear_supersedes_and_returns_the_settled_stream() {
        let mut resolver = StreamResolver::new();
        let generation = resolver.begin();
        assert!(resolver.try_commit(generation, Some(stream())));

        let returned = resolver.clear();
        assert!(returned.is_some());
        assert!(!resolver.is_active());

        // the old generation can no longer commit anything
        assert!(!resolver.try_commit(generation, Some(stream())));
        assert!(resolver.stream().is_none());
    }
}
