//! End-to-end flow over the room coordinator: local media comes up, a peer
//! joins, tracks land on transport slots, chat round-trips with acks.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use bytes::Bytes;

use parley::chat::{
    ChannelError, ChannelEvent, ChatMessage, MessageChannel, SendState, StatusKind, Telegram,
};
use parley::device_catalog::{DeviceDescriptor, DeviceEnumerator, EnumerateError};
use parley::log::StdoutLogSink;
use parley::media::{
    AcquireError, MediaSource, MediaTrack, StreamConstraints, StreamHandle, TrackKind,
};
use parley::room::{Room, RoomEvent};
use parley::store::{KeyValueStore, MemoryStore};
use parley::transceiver::{SendSlot, SlotDirection, SlotHost};

// --- collaborator mocks ---

struct FixedEnumerator(Vec<DeviceDescriptor>);

impl DeviceEnumerator for FixedEnumerator {
    fn enumerate(&self) -> Result<Vec<DeviceDescriptor>, EnumerateError> {
        Ok(self.0.clone())
    }
}

struct TestSource;

impl MediaSource for TestSource {
    fn create_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<StreamHandle, AcquireError> {
        if let Some(audio) = &constraints.audio {
            let track = MediaTrack::new(TrackKind::Audio, audio.device_id.clone());
            return Ok(StreamHandle::from_tracks(vec![track]));
        }
        if let Some(video) = &constraints.video {
            let track = MediaTrack::new(TrackKind::Video, video.device_id.clone());
            return Ok(StreamHandle::from_tracks(vec![track]));
        }
        Err(AcquireError::Failed("nothing requested".into()))
    }

    fn create_display_stream(&self) -> Result<StreamHandle, AcquireError> {
        Ok(StreamHandle::from_tracks(vec![MediaTrack::new(
            TrackKind::Video,
            Some("display".into()),
        )]))
    }
}

#[derive(Default)]
struct SlotLog {
    created: Vec<(String, TrackKind)>,
    attached: Vec<(String, TrackKind, Option<String>)>,
}

struct RecordingSlot {
    label: String,
    kind: TrackKind,
    log: Arc<Mutex<SlotLog>>,
}

impl SendSlot for RecordingSlot {
    fn replace_track(&mut self, track: Option<MediaTrack>) {
        self.log.lock().unwrap().attached.push((
            self.label.clone(),
            self.kind,
            track.and_then(|t| t.device_id().map(String::from)),
        ));
    }

    fn set_direction(&mut self, _direction: SlotDirection) {}
}

#[derive(Default)]
struct PeerTransport {
    log: Arc<Mutex<SlotLog>>,
}

impl SlotHost for PeerTransport {
    fn create_send_slot(
        &mut self,
        stream_label: &str,
        kind: TrackKind,
        _track: Option<MediaTrack>,
        _direction: SlotDirection,
    ) -> Box<dyn SendSlot> {
        self.log
            .lock()
            .unwrap()
            .created
            .push((stream_label.to_string(), kind));
        Box::new(RecordingSlot {
            label: stream_label.to_string(),
            kind,
            log: Arc::clone(&self.log),
        })
    }
}

#[derive(Default)]
struct ChannelState {
    events: Mutex<VecDeque<ChannelEvent>>,
    sent: Mutex<Vec<Vec<u8>>>,
}

#[derive(Clone)]
struct ChannelHandle(Arc<ChannelState>);

impl ChannelHandle {
    fn push_telegram(&self, telegram: &Telegram) {
        let payload = telegram.serialize().unwrap();
        self.0
            .events
            .lock()
            .unwrap()
            .push_back(ChannelEvent::Message(Bytes::from(payload)));
    }

    fn sent_telegrams(&self) -> Vec<Telegram> {
        self.0
            .sent
            .lock()
            .unwrap()
            .iter()
            .map(|raw| Telegram::deserialize(raw).unwrap())
            .collect()
    }
}

struct TestChannel(Arc<ChannelState>);

impl MessageChannel for TestChannel {
    fn poll_event(&mut self) -> Option<ChannelEvent> {
        self.0.events.lock().unwrap().pop_front()
    }

    fn send(&mut self, payload: &[u8]) -> Result<(), ChannelError> {
        self.0.sent.lock().unwrap().push(payload.to_vec());
        Ok(())
    }
}

fn open_channel() -> (Box<dyn MessageChannel>, ChannelHandle) {
    let state = Arc::new(ChannelState::default());
    state.events.lock().unwrap().push_back(ChannelEvent::Open);
    (Box::new(TestChannel(Arc::clone(&state))), ChannelHandle(state))
}

fn wait_for<T>(room: &mut Room, mut pick: impl FnMut(&RoomEvent) -> Option<T>) -> T {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        for event in room.poll() {
            if let Some(value) = pick(&event) {
                return value;
            }
        }
        assert!(Instant::now() < deadline, "expected room event never arrived");
        std::thread::sleep(Duration::from_millis(2));
    }
}

// --- the flow ---

#[test]
fn media_and_chat_flow_through_a_room() {
    let store = Arc::new(MemoryStore::new());
    store.set(
        "config",
        r#"{"audio":{"enabled":true},"video":{"enabled":false}}"#,
    );

    let mut room = Room::new(
        Arc::new(TestSource),
        Arc::new(FixedEnumerator(vec![DeviceDescriptor::new(
            "mic1",
            TrackKind::Audio,
            "Desk Mic",
        )])),
        Arc::clone(&store) as Arc<dyn KeyValueStore>,
        Arc::new(StdoutLogSink::start(256)),
    );

    // a generated local name was persisted
    assert!(!room.local_name().is_empty());
    assert_eq!(store.get("name").as_deref(), Some(room.local_name()));

    // peer joins before any track exists: placeholder slots only
    let mut transport = PeerTransport::default();
    let (chat_channel, peer_handle) = open_channel();
    room.add_peer("p1", "Bob", chat_channel, &mut transport);

    {
        let log = transport.log.lock().unwrap();
        assert_eq!(
            log.created,
            vec![
                ("camera".to_string(), TrackKind::Audio),
                ("camera".to_string(), TrackKind::Video),
                ("screen".to_string(), TrackKind::Video),
            ]
        );
        assert!(log.attached.is_empty());
    }

    // local media resolves and lands on the audio slot in place
    let stream = wait_for(&mut room, |e| match e {
        RoomEvent::StreamChanged(stream) => Some(stream.clone()),
        _ => None,
    })
    .expect("a live stream");
    assert_eq!(
        stream
            .track(TrackKind::Audio)
            .and_then(|t| t.device_id().map(String::from)),
        Some("mic1".to_string())
    );

    {
        let log = transport.log.lock().unwrap();
        assert_eq!(
            log.attached,
            vec![(
                "camera".to_string(),
                TrackKind::Audio,
                Some("mic1".to_string())
            )]
        );
        assert_eq!(log.created.len(), 3, "no renegotiation after join");
    }

    // outgoing chat: Sending until the ack comes back
    room.send_chat_text("hello");
    room.poll();

    let texts: Vec<Telegram> = peer_handle
        .sent_telegrams()
        .into_iter()
        .filter(|t| matches!(t, Telegram::Text { .. }))
        .collect();
    let Some(Telegram::Text { tid, text }) = texts.first().cloned() else {
        panic!("peer should have received the text");
    };
    assert_eq!(text, "hello");

    let sending_state = room.chat_messages().iter().find_map(|m| match m {
        ChatMessage::Outgoing { states, .. } => states.get("p1").copied(),
        _ => None,
    });
    assert_eq!(sending_state, Some(SendState::Sending));

    peer_handle.push_telegram(&Telegram::Ack { tid });
    wait_for(&mut room, |e| {
        matches!(e, RoomEvent::MessagesChanged).then_some(())
    });

    let sent_state = room.chat_messages().iter().find_map(|m| match m {
        ChatMessage::Outgoing { states, .. } => states.get("p1").copied(),
        _ => None,
    });
    assert_eq!(sent_state, Some(SendState::Sent));

    // incoming chat is acked on receipt and shows the peer's name
    peer_handle.push_telegram(&Telegram::Text {
        tid: 3,
        text: "hey yourself".into(),
    });
    wait_for(&mut room, |e| {
        matches!(e, RoomEvent::MessagesChanged).then_some(())
    });

    let acks: Vec<Telegram> = peer_handle
        .sent_telegrams()
        .into_iter()
        .filter(|t| matches!(t, Telegram::Ack { .. }))
        .collect();
    assert_eq!(acks, vec![Telegram::Ack { tid: 3 }]);

    // name survives departure
    room.remove_peer("p1");
    room.poll();

    let named = room.chat_messages();
    assert!(named.iter().any(
        |m| matches!(m, ChatMessage::Incoming { from, text, .. } if from == "Bob" && text == "hey yourself")
    ));
    assert!(named.iter().any(
        |m| matches!(m, ChatMessage::Status { who, what: StatusKind::Leave, .. } if who == "Bob")
    ));

    // teardown releases the live track
    room.close();
    let deadline = Instant::now() + Duration::from_secs(2);
    let track = stream.track(TrackKind::Audio).expect("audio track");
    while !track.is_stopped() {
        assert!(Instant::now() < deadline, "track never released");
        std::thread::sleep(Duration::from_millis(2));
    }
}
