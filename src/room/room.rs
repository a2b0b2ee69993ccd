use std::collections::VecDeque;
use std::sync::Arc;

use crate::chat::{chat::Chat, message::ChatMessage, message_channel::MessageChannel};
use crate::device_catalog::enumerator::DeviceEnumerator;
use crate::input_control::{events::InputEvent, input_control::InputControl};
use crate::log::log_sink::LogSink;
use crate::media::{source::MediaSource, track_kind::TrackKind};
use crate::names;
use crate::room::events::RoomEvent;
use crate::sink_info;
use crate::store::kv_store::KeyValueStore;
use crate::transceiver::{binder::TransceiverBinder, send_slot::SlotHost};

const NAME_KEY: &str = "name";
/// Label of the primary call stream on the transport.
const PRIMARY_STREAM: &str = "camera";
/// Label of the screenshare stream on the transport.
const SCREENSHARE_STREAM: &str = "screen";

/// Wires the input reconciler, transceiver binders and chat registry into
/// one poll loop.
///
/// The binders follow the reconciler's stream events, so a device change or
/// mute toggle never touches the transport beyond an in-place track swap;
/// chat sessions come and go with peers while the timeline persists.
pub struct Room {
    input: InputControl,
    chat: Chat,
    primary: TransceiverBinder,
    screenshare: TransceiverBinder,
    local_name: String,
    store: Arc<dyn KeyValueStore>,
    pending: VecDeque<RoomEvent>,
    logger: Arc<dyn LogSink>,
}

impl Room {
    pub fn new(
        source: Arc<dyn MediaSource>,
        enumerator: Arc<dyn DeviceEnumerator>,
        store: Arc<dyn KeyValueStore>,
        logger: Arc<dyn LogSink>,
    ) -> Self {
        let local_name = match store.get(NAME_KEY) {
            Some(name) if !name.is_empty() => name,
            _ => {
                let name = names::create_name();
                store.set(NAME_KEY, &name);
                name
            }
        };
        sink_info!(logger, "joining as '{local_name}'");

        let input = InputControl::new(
            source,
            enumerator,
            Arc::clone(&store),
            Arc::clone(&logger),
        );

        Self {
            input,
            chat: Chat::new(Arc::clone(&logger)),
            primary: TransceiverBinder::new(
                PRIMARY_STREAM,
                [TrackKind::Audio, TrackKind::Video],
                Arc::clone(&logger),
            ),
            screenshare: TransceiverBinder::new(
                SCREENSHARE_STREAM,
                [TrackKind::Video],
                Arc::clone(&logger),
            ),
            local_name,
            store,
            pending: VecDeque::new(),
            logger,
        }
    }

    /// Registers a joined peer: transport slots for both outgoing streams
    /// plus a chat session over its message channel.
    pub fn add_peer(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        chat_channel: Box<dyn MessageChannel>,
        host: &mut dyn SlotHost,
    ) {
        let id = id.into();
        self.primary.attach(host);
        self.screenshare.attach(host);
        self.chat.add_peer(id.clone(), name, chat_channel);
        self.pending.push_back(RoomEvent::MessagesChanged);
        self.pending.push_back(RoomEvent::PeerJoined(id));
    }

    pub fn remove_peer(&mut self, id: &str) {
        self.chat.peer_left(id);
        self.pending.push_back(RoomEvent::MessagesChanged);
        self.pending.push_back(RoomEvent::PeerLeft(id.to_string()));
    }

    pub fn send_chat_text(&mut self, text: impl Into<String>) {
        self.chat.send_text(text);
        self.pending.push_back(RoomEvent::MessagesChanged);
    }

    /// The chat timeline with display names resolved.
    #[must_use]
    pub fn chat_messages(&self) -> Vec<ChatMessage> {
        self.chat.named_messages()
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    pub fn set_local_name(&mut self, name: impl Into<String>) {
        self.local_name = name.into();
        self.store.set(NAME_KEY, &self.local_name);
    }

    /// Media settings and streams.
    pub fn input(&mut self) -> &mut InputControl {
        &mut self.input
    }

    #[must_use]
    pub fn chat(&self) -> &Chat {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut Chat {
        &mut self.chat
    }

    /// Drains every subsystem and routes stream changes into the transport
    /// binders. Events come out in commit order.
    pub fn poll(&mut self) -> Vec<RoomEvent> {
        for event in self.input.poll() {
            match event {
                InputEvent::DevicesChanged(map) => {
                    self.pending.push_back(RoomEvent::DevicesChanged(map));
                }
                InputEvent::ConfigurationChanged(config) => {
                    self.pending
                        .push_back(RoomEvent::ConfigurationChanged(config));
                }
                InputEvent::StreamChanged(stream) => {
                    self.primary.set_stream(stream.clone());
                    self.pending.push_back(RoomEvent::StreamChanged(stream));
                }
                InputEvent::ScreenshareChanged(stream) => {
                    self.screenshare.set_stream(stream.clone());
                    self.pending
                        .push_back(RoomEvent::ScreenshareChanged(stream));
                }
                InputEvent::ScreensharingChanged(active) => {
                    self.pending
                        .push_back(RoomEvent::ScreensharingChanged(active));
                }
            }
        }

        if self.chat.poll() {
            self.pending.push_back(RoomEvent::MessagesChanged);
        }

        self.pending.drain(..).collect()
    }

    /// Stops local media and abandons in-flight acquisitions. Chat history
    /// stays readable.
    pub fn close(&mut self) {
        sink_info!(self.logger, "leaving room");
        self.input.close();
        self.primary.set_stream(None);
        self.screenshare.set_stream(None);
    }
}
