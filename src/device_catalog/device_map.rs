use std::collections::HashSet;

use crate::device_catalog::descriptor::DeviceDescriptor;
use crate::media::track_kind::TrackKind;

/// Deduplicated view of the available input devices, split by kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceMap {
    pub audio: Vec<DeviceDescriptor>,
    pub video: Vec<DeviceDescriptor>,
}

impl DeviceMap {
    /// Builds a map from a raw enumeration, keeping the first entry per
    /// device id within each kind. Hardware can report a device once per
    /// API generation, so duplicates are expected.
    #[must_use]
    pub fn from_raw(raw: &[DeviceDescriptor]) -> Self {
        Self {
            audio: filter_kind(raw, TrackKind::Audio),
            video: filter_kind(raw, TrackKind::Video),
        }
    }

    #[must_use]
    pub fn of_kind(&self, kind: TrackKind) -> &[DeviceDescriptor] {
        match kind {
            TrackKind::Audio => &self.audio,
            TrackKind::Video => &self.video,
        }
    }

    /// True once at least one device carries a non-empty label. The platform
    /// withholds labels until capture permission has been granted, so this
    /// tells the caller whether a post-permission re-enumeration is due.
    #[must_use]
    pub fn fully_resolved(&self) -> bool {
        self.audio
            .iter()
            .chain(self.video.iter())
            .any(|device| !device.label.is_empty())
    }
}

fn filter_kind(raw: &[DeviceDescriptor], kind: TrackKind) -> Vec<DeviceDescriptor> {
    let mut seen = HashSet::new();

    raw.iter()
        .filter(|device| device.kind == kind && seen.insert(device.id.clone()))
        .cloned()
        .collect()
}
