use crate::chat::message::PeerId;
use crate::device_catalog::device_map::DeviceMap;
use crate::input_control::configuration::InputConfiguration;
use crate::media::stream::StreamHandle;

/// Room-level notifications, in commit order.
#[derive(Debug, Clone)]
pub enum RoomEvent {
    DevicesChanged(DeviceMap),
    ConfigurationChanged(InputConfiguration),
    StreamChanged(Option<StreamHandle>),
    ScreenshareChanged(Option<StreamHandle>),
    ScreensharingChanged(bool),
    MessagesChanged,
    PeerJoined(PeerId),
    PeerLeft(PeerId),
}
