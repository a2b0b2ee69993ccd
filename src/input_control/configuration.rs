use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::device_catalog::{descriptor::DeviceDescriptor, device_map::DeviceMap};
use crate::media::{resolution::ResolutionKey, track_kind::TrackKind};

/// Desired state for one track kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackConfiguration {
    pub enabled: bool,
    pub device_id: Option<String>,
}

/// Desired state for the video track; adds the capture resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTrackConfiguration {
    pub enabled: bool,
    pub device_id: Option<String>,
    pub resolution: ResolutionKey,
}

/// The complete user intent for media input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfiguration {
    pub audio: TrackConfiguration,
    pub video: VideoTrackConfiguration,
}

impl Default for InputConfiguration {
    fn default() -> Self {
        Self {
            audio: TrackConfiguration {
                enabled: true,
                device_id: None,
            },
            video: VideoTrackConfiguration {
                enabled: true,
                device_id: None,
                resolution: ResolutionKey::default(),
            },
        }
    }
}

impl InputConfiguration {
    /// Restores a configuration from its stored JSON form.
    ///
    /// The merge is shallow and field-by-field over the defaults: a stored
    /// object with one corrupt field keeps every other valid field instead
    /// of being discarded wholesale.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        let mut config = Self::default();
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            return config;
        };

        if let Some(audio) = value.get("audio") {
            merge_bool(&mut config.audio.enabled, audio.get("enabled"));
            merge_device_id(&mut config.audio.device_id, audio.get("deviceId"));
        }
        if let Some(video) = value.get("video") {
            merge_bool(&mut config.video.enabled, video.get("enabled"));
            merge_device_id(&mut config.video.device_id, video.get("deviceId"));
            if let Some(resolution) = video
                .get("resolution")
                .and_then(|v| serde_json::from_value::<ResolutionKey>(v.clone()).ok())
            {
                config.video.resolution = resolution;
            }
        }

        config
    }

    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    #[must_use]
    pub fn resolution(&self) -> ResolutionKey {
        self.video.resolution
    }
}

fn merge_bool(target: &mut bool, value: Option<&Value>) {
    if let Some(b) = value.and_then(Value::as_bool) {
        *target = b;
    }
}

fn merge_device_id(target: &mut Option<String>, value: Option<&Value>) {
    match value {
        Some(Value::String(id)) => *target = Some(id.clone()),
        Some(Value::Null) => *target = None,
        _ => {}
    }
}

/// Validates a stored device id against the live catalog. An id that no
/// longer exists falls back to the first device of the kind; an empty
/// catalog (or none at all) yields no device.
#[must_use]
pub fn sanitize_device_id(id: Option<&str>, devices: Option<&[DeviceDescriptor]>) -> Option<String> {
    let devices = devices?;

    if let Some(id) = id {
        if devices.iter().any(|device| device.id == id) {
            return Some(id.to_string());
        }
    }

    devices.first().map(|device| device.id.clone())
}

/// Resolves the desired configuration against the current device catalog.
/// `enabled` and `resolution` pass through unchanged.
#[must_use]
pub fn sanitize_configuration(
    config: &InputConfiguration,
    devices: Option<&DeviceMap>,
) -> InputConfiguration {
    InputConfiguration {
        audio: TrackConfiguration {
            enabled: config.audio.enabled,
            device_id: sanitize_device_id(
                config.audio.device_id.as_deref(),
                devices.map(|map| map.of_kind(TrackKind::Audio)),
            ),
        },
        video: VideoTrackConfiguration {
            enabled: config.video.enabled,
            device_id: sanitize_device_id(
                config.video.device_id.as_deref(),
                devices.map(|map| map.of_kind(TrackKind::Video)),
            ),
            resolution: config.video.resolution,
        },
    }
}
