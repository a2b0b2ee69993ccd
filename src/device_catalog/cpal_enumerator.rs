use cpal::traits::{DeviceTrait, HostTrait};

use crate::device_catalog::{
    descriptor::DeviceDescriptor,
    enumerator::{DeviceEnumerator, EnumerateError},
};
use crate::media::track_kind::TrackKind;

/// Audio input enumeration backed by cpal.
///
/// cpal exposes no stable device identifier, so the device name doubles as
/// id and label. Video devices are out of cpal's reach; embedders with a
/// camera backend supply their own `DeviceEnumerator`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpalEnumerator;

impl CpalEnumerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DeviceEnumerator for CpalEnumerator {
    fn enumerate(&self) -> Result<Vec<DeviceDescriptor>, EnumerateError> {
        let host = cpal::default_host();

        let inputs = host
            .input_devices()
            .map_err(|e| EnumerateError(e.to_string()))?;

        let mut devices = Vec::new();
        for device in inputs {
            let Ok(name) = device.name() else {
                continue;
            };
            devices.push(DeviceDescriptor::new(
                format!("input:{name}"),
                TrackKind::Audio,
                name,
            ));
        }

        Ok(devices)
    }
}
