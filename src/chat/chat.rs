use std::collections::HashMap;
use std::sync::Arc;

use crate::chat::{
    chat_peer::{ChatPeer, PeerEvent},
    message::{ChatMessage, PeerId, SendState, StatusKind},
    message_channel::MessageChannel,
};
use crate::log::log_sink::LogSink;
use crate::util::now_millis;
use crate::{sink_debug, sink_info};

/// Aggregates one [`ChatPeer`] per joined peer into a single ordered
/// timeline.
///
/// The timeline is append-only; per-peer send states inside `Outgoing`
/// entries are the only in-place mutation. Display names are resolved on
/// every read — live session name first, then the name snapshotted when the
/// peer left, then the raw id — so history stays readable after departure
/// and renames apply retroactively while the peer is present.
pub struct Chat {
    peers: HashMap<PeerId, ChatPeer>,
    old_names: HashMap<PeerId, String>,
    messages: Vec<ChatMessage>,
    /// (peer, tid) of in-flight sends, pointing at their timeline entry.
    in_flight: HashMap<(PeerId, u64), usize>,
    logger: Arc<dyn LogSink>,
}

impl Chat {
    pub fn new(logger: Arc<dyn LogSink>) -> Self {
        Self {
            peers: HashMap::new(),
            old_names: HashMap::new(),
            messages: Vec::new(),
            in_flight: HashMap::new(),
            logger,
        }
    }

    /// Registers a newly joined peer and appends its enter record.
    pub fn add_peer(&mut self, id: impl Into<PeerId>, name: impl Into<String>, channel: Box<dyn MessageChannel>) {
        let id = id.into();
        sink_info!(self.logger, "chat peer joined: {id}");
        self.peers
            .insert(id.clone(), ChatPeer::new(channel, name, Arc::clone(&self.logger)));
        self.messages.push(ChatMessage::Status {
            who: id,
            what: StatusKind::Enter,
            when: now_millis(),
        });
    }

    /// Removes a departed peer, keeping its display name for history.
    pub fn peer_left(&mut self, id: &str) {
        let Some(peer) = self.peers.remove(id) else {
            return;
        };
        sink_info!(self.logger, "chat peer left: {id}");
        self.old_names.insert(id.to_string(), peer.name().to_string());
        self.messages.push(ChatMessage::Status {
            who: id.to_string(),
            what: StatusKind::Leave,
            when: now_millis(),
        });
    }

    pub fn set_peer_name(&mut self, id: &str, name: impl Into<String>) {
        if let Some(peer) = self.peers.get_mut(id) {
            peer.set_name(name);
        }
    }

    /// Current display name for a peer id, live or historical.
    #[must_use]
    pub fn peer_name(&self, id: &str) -> String {
        if let Some(peer) = self.peers.get(id) {
            return peer.name().to_string();
        }
        if let Some(name) = self.old_names.get(id) {
            return name.clone();
        }
        id.to_string()
    }

    /// Broadcasts a text to every peer joined right now and appends one
    /// outgoing entry tracking each of them. Peers joining later never
    /// appear in that entry.
    pub fn send_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let mut states = HashMap::new();
        let mut tids = Vec::new();

        for (id, peer) in &mut self.peers {
            let tid = peer.send_text(text.clone());
            states.insert(id.clone(), SendState::Sending);
            tids.push((id.clone(), tid));
        }

        self.messages.push(ChatMessage::Outgoing {
            text,
            when: now_millis(),
            states,
        });

        let index = self.messages.len() - 1;
        for key in tids {
            self.in_flight.insert(key, index);
        }
    }

    /// Drains every session's channel events. Returns whether the timeline
    /// (or any send state in it) changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        let ids: Vec<PeerId> = self.peers.keys().cloned().collect();

        for id in ids {
            let events = match self.peers.get_mut(&id) {
                Some(peer) => peer.poll(),
                None => continue,
            };

            for event in events {
                match event {
                    PeerEvent::Text(text) => {
                        self.messages.push(ChatMessage::Incoming {
                            from: id.clone(),
                            text,
                            when: now_millis(),
                        });
                        changed = true;
                    }
                    PeerEvent::Delivered(tid) => {
                        changed |= self.mark(&id, tid, SendState::Sent);
                    }
                    PeerEvent::SendFailed(tid) => {
                        changed |= self.mark(&id, tid, SendState::Failed);
                    }
                }
            }
        }

        changed
    }

    /// The raw timeline, ids unresolved.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The timeline with display names materialized for rendering.
    #[must_use]
    pub fn named_messages(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .map(|message| match message {
                ChatMessage::Incoming { from, text, when } => ChatMessage::Incoming {
                    from: self.peer_name(from),
                    text: text.clone(),
                    when: *when,
                },
                ChatMessage::Status { who, what, when } => ChatMessage::Status {
                    who: self.peer_name(who),
                    what: *what,
                    when: *when,
                },
                outgoing @ ChatMessage::Outgoing { .. } => outgoing.clone(),
            })
            .collect()
    }

    fn mark(&mut self, id: &str, tid: u64, state: SendState) -> bool {
        let Some(index) = self.in_flight.remove(&(id.to_string(), tid)) else {
            sink_debug!(self.logger, "ack for unknown send ({id}, {tid})");
            return false;
        };
        if let Some(ChatMessage::Outgoing { states, .. }) = self.messages.get_mut(index) {
            states.insert(id.to_string(), state);
            return true;
        }
        false
    }
}
