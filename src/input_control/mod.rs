pub mod acquire_worker;
pub mod configuration;
pub mod events;
pub mod input_control;
pub mod stream_resolver;

pub use configuration::{InputConfiguration, TrackConfiguration, VideoTrackConfiguration};
pub use events::InputEvent;
pub use input_control::InputControl;
pub use stream_resolver::StreamResolver;
