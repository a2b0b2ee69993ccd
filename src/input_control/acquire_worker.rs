use std::sync::{
    Arc,
    mpsc::{Receiver, Sender},
};
use std::thread::{self, JoinHandle};

use crate::input_control::configuration::InputConfiguration;
use crate::log::log_sink::LogSink;
use crate::media::{
    source::{MediaSource, StreamConstraints, TrackConstraints},
    stream::StreamHandle,
    track::MediaTrack,
    track_kind::TrackKind,
};
use crate::{sink_debug, sink_warn};

/// Work orders for the acquisition worker.
pub enum AcquireCommand {
    /// Move the live tracks to `config`. The per-kind change flags were
    /// computed by the reconciler against the previously requested state;
    /// unchanged kinds keep their live track untouched.
    Reconcile {
        generation: u64,
        config: InputConfiguration,
        audio_changed: bool,
        video_changed: bool,
    },
    /// Stop all live tracks and settle on "no stream".
    Clear { generation: u64 },
    /// Start a screen capture. Independent of the primary tracks.
    Screenshare { generation: u64 },
}

/// Settled results, tagged with the generation they were started under.
pub enum AcquireOutcome {
    Primary {
        generation: u64,
        stream: Option<StreamHandle>,
    },
    Screenshare {
        generation: u64,
        stream: Option<StreamHandle>,
    },
}

/// Spawns the acquisition worker.
///
/// One worker per reconciler; commands are processed strictly in order, so
/// overlapping reconciliations serialize here and the per-kind reuse logic
/// always diffs against tracks the worker itself produced. The worker owns
/// the live primary tracks until the reconciler commits an outcome; on
/// shutdown (command channel dropped) it stops whatever is still live.
pub fn spawn_acquire_worker(
    source: Arc<dyn MediaSource>,
    rx: Receiver<AcquireCommand>,
    tx: Sender<AcquireOutcome>,
    logger: Arc<dyn LogSink>,
) -> Option<JoinHandle<()>> {
    thread::Builder::new()
        .name("acquire-worker".into())
        .spawn(move || {
            let mut live_audio: Option<MediaTrack> = None;
            let mut live_video: Option<MediaTrack> = None;

            while let Ok(command) = rx.recv() {
                match command {
                    AcquireCommand::Reconcile {
                        generation,
                        config,
                        audio_changed,
                        video_changed,
                    } => {
                        if audio_changed {
                            if let Some(track) = live_audio.take() {
                                track.stop();
                            }
                            live_audio = acquire_track(&source, &config, TrackKind::Audio, &logger);
                        }
                        if video_changed {
                            if let Some(track) = live_video.take() {
                                track.stop();
                            }
                            live_video = acquire_track(&source, &config, TrackKind::Video, &logger);
                        }

                        let tracks: Vec<MediaTrack> = [live_audio.clone(), live_video.clone()]
                            .into_iter()
                            .flatten()
                            .collect();
                        let stream = if tracks.is_empty() {
                            None
                        } else {
                            Some(StreamHandle::from_tracks(tracks))
                        };

                        if tx
                            .send(AcquireOutcome::Primary { generation, stream })
                            .is_err()
                        {
                            break;
                        }
                    }
                    AcquireCommand::Clear { generation } => {
                        if let Some(track) = live_audio.take() {
                            track.stop();
                        }
                        if let Some(track) = live_video.take() {
                            track.stop();
                        }
                        if tx
                            .send(AcquireOutcome::Primary {
                                generation,
                                stream: None,
                            })
                            .is_err()
                        {
                            break;
                        }
                    }
                    AcquireCommand::Screenshare { generation } => {
                        let stream = match source.create_display_stream() {
                            Ok(stream) => Some(stream),
                            Err(e) => {
                                sink_warn!(logger, "screen capture failed: {e}");
                                None
                            }
                        };
                        if let Err(e) =
                            tx.send(AcquireOutcome::Screenshare { generation, stream })
                        {
                            // reconciler gone; the capture would leak otherwise
                            if let AcquireOutcome::Screenshare {
                                stream: Some(stream),
                                ..
                            } = e.0
                            {
                                stream.stop();
                            }
                            break;
                        }
                    }
                }
            }

            // reconciler gone; release anything still live
            if let Some(track) = live_audio.take() {
                track.stop();
            }
            if let Some(track) = live_video.take() {
                track.stop();
            }
            sink_debug!(logger, "acquire worker stopped");
        })
        .ok()
}

/// Acquires a fresh track of `kind`, or `None` when the kind is disabled or
/// the platform refuses. Failures are logged, never propagated: the user
/// retries by changing the configuration.
fn acquire_track(
    source: &Arc<dyn MediaSource>,
    config: &InputConfiguration,
    kind: TrackKind,
    logger: &Arc<dyn LogSink>,
) -> Option<MediaTrack> {
    let constraints = match kind {
        TrackKind::Audio => {
            if !config.audio.enabled {
                return None;
            }
            StreamConstraints {
                audio: Some(TrackConstraints {
                    device_id: config.audio.device_id.clone(),
                    ideal: None,
                }),
                video: None,
            }
        }
        TrackKind::Video => {
            if !config.video.enabled {
                return None;
            }
            StreamConstraints {
                audio: None,
                video: Some(TrackConstraints {
                    device_id: config.video.device_id.clone(),
                    ideal: Some(config.video.resolution.dimensions()),
                }),
            }
        }
    };

    match source.create_stream(&constraints) {
        Ok(stream) => {
            let track = stream.track(kind).cloned();
            if track.is_none() {
                sink_warn!(logger, "source returned no {kind} track");
            }
            track
        }
        Err(e) => {
            sink_warn!(logger, "unable to get user media for {kind}: {e}");
            None
        }
    }
}
