use std::fmt;

use crate::media::stream::StreamHandle;

/// Per-kind acquisition hints. `device_id == None` lets the platform pick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrackConstraints {
    pub device_id: Option<String>,
    /// Ideal width/height for video capture; ignored for audio.
    pub ideal: Option<(u32, u32)>,
}

/// Constraints for one acquisition call. A `None` kind is not captured.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StreamConstraints {
    pub audio: Option<TrackConstraints>,
    pub video: Option<TrackConstraints>,
}

pub type AcquireResult = Result<StreamHandle, AcquireError>;

/// Acquisition failures are a normal runtime condition (permission denied,
/// device unplugged mid-call) and are handled locally by the reconciler.
#[derive(Debug)]
pub enum AcquireError {
    PermissionDenied(String),
    DeviceGone(String),
    Failed(String),
}

impl fmt::Display for AcquireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AcquireError::*;
        match self {
            PermissionDenied(e) => write!(f, "permission denied: {e}"),
            DeviceGone(e) => write!(f, "device gone: {e}"),
            Failed(e) => write!(f, "acquisition failed: {e}"),
        }
    }
}

impl std::error::Error for AcquireError {}

/// The injected media-acquisition collaborator.
///
/// Implementations wrap the platform capture API. Calls may block (permission
/// prompts, device warm-up); the reconciler only ever invokes them from its
/// acquisition worker thread.
pub trait MediaSource: Send + Sync {
    fn create_stream(&self, constraints: &StreamConstraints) -> AcquireResult;

    /// Screen capture. Single-shot, no device or resolution selection.
    fn create_display_stream(&self) -> AcquireResult;
}
