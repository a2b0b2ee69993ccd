use std::sync::{
    Arc,
    mpsc::{self, Receiver, Sender},
};
use std::thread;

use crate::device_catalog::{
    device_map::DeviceMap,
    enumerator::{DeviceEnumerator, EnumerateError},
};
use crate::log::log_sink::LogSink;
use crate::{sink_debug, sink_warn};

type RefreshResult = (u64, Result<DeviceMap, EnumerateError>);

/// Owns the deduplicated device list and its refresh lifecycle.
///
/// `refresh` runs the enumerator on a worker thread and tags the result with
/// a generation token; `poll` commits only results that still carry the
/// current generation, so a refresh superseded by a newer one is discarded
/// without ever being observed.
pub struct DeviceCatalog {
    enumerator: Arc<dyn DeviceEnumerator>,
    devices: Option<DeviceMap>,
    generation: u64,
    result_tx: Sender<RefreshResult>,
    result_rx: Receiver<RefreshResult>,
    hotplug_rx: Receiver<()>,
    /// Set when the current generation failed to enumerate (initial-load
    /// fallback signal for the owner).
    failed: bool,
    logger: Arc<dyn LogSink>,
}

impl DeviceCatalog {
    pub fn new(enumerator: Arc<dyn DeviceEnumerator>, logger: Arc<dyn LogSink>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let (hotplug_tx, hotplug_rx) = mpsc::channel();

        enumerator.watch(hotplug_tx);

        Self {
            enumerator,
            devices: None,
            generation: 0,
            result_tx,
            result_rx,
            hotplug_rx,
            failed: false,
            logger,
        }
    }

    /// Starts a new enumeration, superseding any still in flight.
    pub fn refresh(&mut self) {
        self.generation += 1;
        self.failed = false;
        let generation = self.generation;
        let enumerator = Arc::clone(&self.enumerator);
        let tx = self.result_tx.clone();

        thread::spawn(move || {
            let result = enumerator.enumerate().map(|raw| DeviceMap::from_raw(&raw));
            let _ = tx.send((generation, result));
        });
    }

    /// Drains hot-plug signals and pending results. Returns the new map if
    /// the catalog changed.
    pub fn poll(&mut self) -> Option<DeviceMap> {
        if self.hotplug_rx.try_recv().is_ok() {
            // collapse a burst of change signals into one refresh
            while self.hotplug_rx.try_recv().is_ok() {}
            sink_debug!(self.logger, "device change signalled, re-enumerating");
            self.refresh();
        }

        let mut committed = None;
        while let Ok((generation, result)) = self.result_rx.try_recv() {
            if generation != self.generation {
                sink_debug!(self.logger, "discarding superseded enumeration");
                continue;
            }
            match result {
                Ok(map) => {
                    committed = Some(map);
                }
                Err(e) => {
                    sink_warn!(self.logger, "{e}");
                    self.failed = true;
                }
            }
        }

        if let Some(map) = committed {
            self.devices = Some(map.clone());
            return Some(map);
        }
        None
    }

    #[must_use]
    pub fn current(&self) -> Option<&DeviceMap> {
        self.devices.as_ref()
    }

    /// True once the current map carries at least one device label.
    #[must_use]
    pub fn fully_resolved(&self) -> bool {
        self.devices.as_ref().is_some_and(DeviceMap::fully_resolved)
    }

    /// True when the newest refresh failed and nothing newer is in flight.
    #[must_use]
    pub fn last_refresh_failed(&self) -> bool {
        self.failed
    }
}
