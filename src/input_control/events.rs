use crate::device_catalog::device_map::DeviceMap;
use crate::input_control::configuration::InputConfiguration;
use crate::media::stream::StreamHandle;

/// Notifications from the input reconciler, in commit order.
#[derive(Debug, Clone)]
pub enum InputEvent {
    DevicesChanged(DeviceMap),
    /// The sanitized configuration after a desired-state or catalog change.
    ConfigurationChanged(InputConfiguration),
    StreamChanged(Option<StreamHandle>),
    ScreenshareChanged(Option<StreamHandle>),
    ScreensharingChanged(bool),
}
