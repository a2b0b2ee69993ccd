pub mod binder;
pub mod send_slot;

pub use binder::TransceiverBinder;
pub use send_slot::{SendSlot, SlotDirection, SlotHost};
