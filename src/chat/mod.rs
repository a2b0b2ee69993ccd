pub mod chat;
pub mod chat_peer;
pub mod message;
pub mod message_channel;
pub mod telegram;

pub use chat::Chat;
pub use chat_peer::ChatPeer;
pub use message::{ChatMessage, PeerId, SendState, StatusKind};
pub use message_channel::{ChannelError, ChannelEvent, MessageChannel};
pub use telegram::Telegram;
