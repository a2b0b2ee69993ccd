use std::collections::VecDeque;
use std::sync::{
    Arc,
    mpsc::{self, Receiver, Sender},
};
use std::thread::JoinHandle;

use crate::device_catalog::{
    device_catalog::DeviceCatalog, device_map::DeviceMap, enumerator::DeviceEnumerator,
};
use crate::input_control::{
    acquire_worker::{AcquireCommand, AcquireOutcome, spawn_acquire_worker},
    configuration::{InputConfiguration, sanitize_configuration},
    events::InputEvent,
    stream_resolver::StreamResolver,
};
use crate::log::log_sink::LogSink;
use crate::media::{
    resolution::ResolutionKey, source::MediaSource, stream::StreamHandle, track_kind::TrackKind,
};
use crate::store::kv_store::KeyValueStore;
use crate::{sink_debug, sink_info};

const CONFIG_KEY: &str = "config";

/// Reconciles the desired input configuration against devices and live
/// tracks.
///
/// Setters are fire-and-forget: they update the persisted intent and kick a
/// reconciliation; results surface through `poll` as [`InputEvent`]s in
/// commit order. Screenshare is a fully independent secondary target with no
/// device or resolution selection and no persistence.
pub struct InputControl {
    catalog: DeviceCatalog,
    desired: InputConfiguration,
    /// The sanitized configuration last handed to the worker; the baseline
    /// for both the idempotence skip and the per-kind change flags.
    requested: Option<InputConfiguration>,
    resolver: StreamResolver,
    screenshare_resolver: StreamResolver,
    /// Whether the current primary generation came from a `Reconcile` (as
    /// opposed to a `Clear`); only those trigger the post-permission
    /// catalog re-refresh.
    primary_is_reconcile: bool,
    cmd_tx: Sender<AcquireCommand>,
    outcome_rx: Receiver<AcquireOutcome>,
    pending: VecDeque<InputEvent>,
    store: Arc<dyn KeyValueStore>,
    logger: Arc<dyn LogSink>,
    _worker: Option<JoinHandle<()>>,
}

impl InputControl {
    pub fn new(
        source: Arc<dyn MediaSource>,
        enumerator: Arc<dyn DeviceEnumerator>,
        store: Arc<dyn KeyValueStore>,
        logger: Arc<dyn LogSink>,
    ) -> Self {
        let desired = store
            .get(CONFIG_KEY)
            .map(|raw| InputConfiguration::from_json(&raw))
            .unwrap_or_default();

        let mut catalog = DeviceCatalog::new(enumerator, Arc::clone(&logger));
        catalog.refresh();

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (outcome_tx, outcome_rx) = mpsc::channel();
        let worker = spawn_acquire_worker(source, cmd_rx, outcome_tx, Arc::clone(&logger));

        Self {
            catalog,
            desired,
            requested: None,
            resolver: StreamResolver::new(),
            screenshare_resolver: StreamResolver::new(),
            primary_is_reconcile: false,
            cmd_tx,
            outcome_rx,
            pending: VecDeque::new(),
            store,
            logger,
            _worker: worker,
        }
    }

    /// The desired configuration resolved against the current catalog.
    #[must_use]
    pub fn configuration(&self) -> InputConfiguration {
        sanitize_configuration(&self.desired, self.catalog.current())
    }

    pub fn set_configuration(&mut self, config: InputConfiguration) {
        self.desired = config;
        self.store.set(CONFIG_KEY, &self.desired.to_json());
        self.pending
            .push_back(InputEvent::ConfigurationChanged(self.configuration()));
        self.apply_configuration();
    }

    pub fn set_device_id(&mut self, kind: TrackKind, device_id: Option<String>, force_enable: bool) {
        let mut config = self.desired.clone();
        match kind {
            TrackKind::Audio => {
                config.audio.device_id = device_id;
                if force_enable {
                    config.audio.enabled = true;
                }
            }
            TrackKind::Video => {
                config.video.device_id = device_id;
                if force_enable {
                    config.video.enabled = true;
                }
            }
        }
        self.set_configuration(config);
    }

    pub fn set_enabled(&mut self, kind: TrackKind, enabled: bool) {
        let mut config = self.desired.clone();
        match kind {
            TrackKind::Audio => config.audio.enabled = enabled,
            TrackKind::Video => config.video.enabled = enabled,
        }
        self.set_configuration(config);
    }

    pub fn set_resolution(&mut self, resolution: ResolutionKey) {
        let mut config = self.desired.clone();
        config.video.resolution = resolution;
        self.set_configuration(config);
    }

    #[must_use]
    pub fn stream(&self) -> Option<StreamHandle> {
        self.resolver.stream().cloned()
    }

    #[must_use]
    pub fn devices(&self) -> Option<DeviceMap> {
        self.catalog.current().cloned()
    }

    /// Asks the catalog for a fresh enumeration.
    pub fn refresh_devices(&mut self) {
        self.catalog.refresh();
    }

    pub fn start_screenshare(&mut self) {
        if self.screenshare_resolver.is_active() {
            return;
        }
        sink_info!(self.logger, "starting screenshare");
        let generation = self.screenshare_resolver.begin();
        self.pending
            .push_back(InputEvent::ScreensharingChanged(true));
        let _ = self.cmd_tx.send(AcquireCommand::Screenshare { generation });
    }

    pub fn stop_screenshare(&mut self) {
        if !self.screenshare_resolver.is_active() {
            return;
        }
        if let Some(stream) = self.screenshare_resolver.clear() {
            stream.stop();
        }
        self.pending.push_back(InputEvent::ScreenshareChanged(None));
        self.pending
            .push_back(InputEvent::ScreensharingChanged(false));
    }

    pub fn toggle_screenshare(&mut self) {
        if self.is_screensharing() {
            self.stop_screenshare();
        } else {
            self.start_screenshare();
        }
    }

    #[must_use]
    pub fn is_screensharing(&self) -> bool {
        self.screenshare_resolver.is_active()
    }

    #[must_use]
    pub fn screenshare(&self) -> Option<StreamHandle> {
        self.screenshare_resolver.stream().cloned()
    }

    /// Drains device, acquisition and screenshare completions. Returned
    /// events are in commit order, even when the underlying operations
    /// settled out of order.
    pub fn poll(&mut self) -> Vec<InputEvent> {
        if let Some(map) = self.catalog.poll() {
            self.pending.push_back(InputEvent::DevicesChanged(map));
            self.pending
                .push_back(InputEvent::ConfigurationChanged(self.configuration()));
            self.apply_configuration();
        } else if self.requested.is_none() && self.catalog.last_refresh_failed() {
            // enumeration failed at startup; reconcile against no catalog
            self.apply_configuration();
        }

        while let Ok(outcome) = self.outcome_rx.try_recv() {
            match outcome {
                AcquireOutcome::Primary { generation, stream } => {
                    if self.resolver.try_commit(generation, stream.clone()) {
                        self.pending.push_back(InputEvent::StreamChanged(stream));
                        if self.primary_is_reconcile && !self.catalog.fully_resolved() {
                            // labels open up once permission was granted
                            self.catalog.refresh();
                        }
                    } else {
                        // superseded; the worker already owns track cleanup
                        sink_debug!(self.logger, "discarding superseded acquisition");
                    }
                }
                AcquireOutcome::Screenshare { generation, stream } => {
                    if self.screenshare_resolver.try_commit(generation, stream.clone()) {
                        self.pending
                            .push_back(InputEvent::ScreenshareChanged(stream));
                    } else if let Some(stream) = stream {
                        // a discarded screen capture is ours to release
                        stream.stop();
                    }
                }
            }
        }

        self.pending.drain(..).collect()
    }

    /// Stops everything and abandons any in-flight acquisition.
    pub fn close(&mut self) {
        self.resolver.clear();
        // generation 0 is never current, so this can only ever stop tracks
        let _ = self.cmd_tx.send(AcquireCommand::Clear { generation: 0 });
        self.stop_screenshare();
    }

    /// Computes the sanitized target and hands the minimal per-kind change
    /// set to the worker. Structurally equal targets are skipped entirely:
    /// repeated reconciliation with no effective change touches no device.
    fn apply_configuration(&mut self) {
        let sanitized = self.configuration();

        if self.requested.as_ref() == Some(&sanitized) {
            return;
        }

        if !sanitized.audio.enabled && !sanitized.video.enabled {
            self.resolver.clear();
            self.pending.push_back(InputEvent::StreamChanged(None));
            self.primary_is_reconcile = false;
            let generation = 0; // never commits; the worker just stops tracks
            let _ = self.cmd_tx.send(AcquireCommand::Clear { generation });
            self.requested = Some(sanitized);
            return;
        }

        let audio_changed = self
            .requested
            .as_ref()
            .is_none_or(|requested| requested.audio != sanitized.audio);
        let video_changed = self
            .requested
            .as_ref()
            .is_none_or(|requested| requested.video != sanitized.video);

        let generation = self.resolver.begin();
        self.primary_is_reconcile = true;
        let _ = self.cmd_tx.send(AcquireCommand::Reconcile {
            generation,
            config: sanitized.clone(),
            audio_changed,
            video_changed,
        });
        self.requested = Some(sanitized);
    }
}
