use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use crate::chat::{
    message_channel::{ChannelEvent, MessageChannel},
    telegram::Telegram,
};
use crate::log::log_sink::LogSink;
use crate::{sink_debug, sink_warn};

/// Session-level notifications, consumed by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    /// An incoming text, already acknowledged on receipt.
    Text(String),
    /// The peer acknowledged the outgoing telegram with this tid.
    Delivered(u64),
    /// The channel failed while this tid was still in flight.
    SendFailed(u64),
}

/// Reliable request/acknowledgement session with one remote peer.
///
/// Every outgoing text gets a correlation id from a monotonically
/// increasing counter. The counter starts at a random 32-bit offset per
/// session instance, so an ack that limps in from a previous incarnation of
/// this session cannot collide with a live id. Delivery confidence is
/// purely ack-driven: a message stays in flight until its ack arrives or
/// the channel itself fails — there is no timeout.
pub struct ChatPeer {
    channel: Box<dyn MessageChannel>,
    name: String,
    next_tid: u64,
    outstanding: BTreeSet<u64>,
    /// Telegrams waiting for the connect handshake.
    pending: VecDeque<Telegram>,
    open: bool,
    closed: bool,
    /// Failures noticed during dispatch, surfaced on the next poll.
    failed_now: Vec<u64>,
    logger: Arc<dyn LogSink>,
}

impl ChatPeer {
    pub fn new(channel: Box<dyn MessageChannel>, name: impl Into<String>, logger: Arc<dyn LogSink>) -> Self {
        Self {
            channel,
            name: name.into(),
            next_tid: u64::from(rand::random::<u32>()),
            outstanding: BTreeSet::new(),
            pending: VecDeque::new(),
            open: false,
            closed: false,
            failed_now: Vec::new(),
            logger,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Transmits a text and returns its correlation id. The id is reported
    /// back through [`PeerEvent::Delivered`] or [`PeerEvent::SendFailed`].
    pub fn send_text(&mut self, text: impl Into<String>) -> u64 {
        let tid = self.next_tid;
        self.next_tid += 1;
        self.outstanding.insert(tid);
        self.dispatch(Telegram::Text {
            tid,
            text: text.into(),
        });
        tid
    }

    /// Drains channel events. Returned events keep arrival order.
    pub fn poll(&mut self) -> Vec<PeerEvent> {
        let mut events: Vec<PeerEvent> = self
            .failed_now
            .drain(..)
            .map(PeerEvent::SendFailed)
            .collect();

        while let Some(event) = self.channel.poll_event() {
            match event {
                ChannelEvent::Open => {
                    self.open = true;
                    sink_debug!(self.logger, "chat channel open, flushing {} queued", self.pending.len());
                    while let Some(telegram) = self.pending.pop_front() {
                        self.transmit(telegram);
                    }
                }
                ChannelEvent::Message(payload) => match Telegram::deserialize(&payload) {
                    Ok(Telegram::Ack { tid }) => {
                        if self.outstanding.remove(&tid) {
                            events.push(PeerEvent::Delivered(tid));
                        } else {
                            // can happen when the session was recreated while
                            // an old ack was in flight
                            sink_debug!(self.logger, "got invalid ack {tid}");
                        }
                    }
                    Ok(Telegram::Text { tid, text }) => {
                        events.push(PeerEvent::Text(text));
                        self.dispatch(Telegram::Ack { tid });
                    }
                    Err(e) => {
                        sink_warn!(self.logger, "malformed telegram dropped: {e}");
                    }
                },
                ChannelEvent::Error(e) => {
                    sink_warn!(self.logger, "chat channel error: {e}");
                    self.fail_channel(&mut events);
                }
                ChannelEvent::Closed => {
                    sink_debug!(self.logger, "chat channel closed");
                    self.fail_channel(&mut events);
                }
            }
        }

        events.extend(self.failed_now.drain(..).map(PeerEvent::SendFailed));
        events
    }

    /// The channel is gone: everything still in flight fails, and nothing
    /// queues any more.
    fn fail_channel(&mut self, events: &mut Vec<PeerEvent>) {
        self.open = false;
        self.closed = true;
        self.pending.clear();
        let in_flight: Vec<u64> = std::mem::take(&mut self.outstanding).into_iter().collect();
        events.extend(in_flight.into_iter().map(PeerEvent::SendFailed));
    }

    fn dispatch(&mut self, telegram: Telegram) {
        if self.closed {
            if let Telegram::Text { tid, .. } = telegram {
                self.outstanding.remove(&tid);
                self.failed_now.push(tid);
            }
            return;
        }
        if !self.open {
            self.pending.push_back(telegram);
            return;
        }
        self.transmit(telegram);
    }

    fn transmit(&mut self, telegram: Telegram) {
        let tid = match &telegram {
            Telegram::Text { tid, .. } => Some(*tid),
            Telegram::Ack { .. } => None,
        };

        let payload = match telegram.serialize() {
            Ok(payload) => payload,
            Err(e) => {
                sink_warn!(self.logger, "failed to encode telegram: {e}");
                if let Some(tid) = tid {
                    self.outstanding.remove(&tid);
                    self.failed_now.push(tid);
                }
                return;
            }
        };

        if let Err(e) = self.channel.send(&payload) {
            sink_warn!(self.logger, "failed to send telegram: {e}");
            if let Some(tid) = tid {
                self.outstanding.remove(&tid);
                self.failed_now.push(tid);
            }
        }
    }
}
