pub mod events;
pub mod room;

pub use events::RoomEvent;
pub use room::Room;
