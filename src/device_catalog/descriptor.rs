use crate::media::track_kind::TrackKind;

/// Immutable snapshot of one input device.
///
/// `id` is only unique within the current enumeration session; after a
/// replug the platform may hand out fresh ids, so stored ids must be
/// revalidated against the live catalog before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub id: String,
    pub kind: TrackKind,
    /// Human-readable name. Empty until the platform grants permission.
    pub label: String,
}

impl DeviceDescriptor {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: TrackKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
        }
    }
}
