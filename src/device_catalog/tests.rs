#[cfg(test)]
#[allow(clippy::module_inception)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::{Arc, Mutex, mpsc};
    use std::time::{Duration, Instant};

    use crate::device_catalog::{
        descriptor::DeviceDescriptor,
        device_catalog::DeviceCatalog,
        device_map::DeviceMap,
        enumerator::{DeviceEnumerator, EnumerateError},
    };
    use crate::log::NoopLogSink;
    use crate::media::track_kind::TrackKind;

    #[derive(Default)]
    struct EnumeratorInner {
        /// Each enumeration claims the front entry; the last entry repeats
        /// once the script is exhausted.
        script: Vec<Vec<DeviceDescriptor>>,
        /// Claimed together with the script entry; a claimed gate blocks the
        /// call until the paired sender fires.
        gates: Vec<mpsc::Receiver<()>>,
        started: usize,
    }

    struct ScriptedEnumerator {
        inner: Mutex<EnumeratorInner>,
    }

    impl ScriptedEnumerator {
        fn new(script: Vec<Vec<DeviceDescriptor>>) -> Self {
            Self {
                inner: Mutex::new(EnumeratorInner {
                    script,
                    ..EnumeratorInner::default()
                }),
            }
        }

        fn gate_next_call(&self) -> mpsc::Sender<()> {
            let (tx, rx) = mpsc::channel();
            self.inner.lock().unwrap().gates.push(rx);
            tx
        }

        fn calls_started(&self) -> usize {
            self.inner.lock().unwrap().started
        }
    }

    impl DeviceEnumerator for ScriptedEnumerator {
        fn enumerate(&self) -> Result<Vec<DeviceDescriptor>, EnumerateError> {
            let (devices, gate) = {
                let mut inner = self.inner.lock().unwrap();
                inner.started += 1;
                let devices = if inner.script.len() > 1 {
                    inner.script.remove(0)
                } else {
                    inner.script.first().cloned().unwrap_or_default()
                };
                let gate = if inner.gates.is_empty() {
                    None
                } else {
                    Some(inner.gates.remove(0))
                };
                (devices, gate)
            };

            if let Some(gate) = gate {
                let _ = gate.recv_timeout(Duration::from_secs(2));
            }
            Ok(devices)
        }
    }

    fn audio(id: &str, label: &str) -> DeviceDescriptor {
        DeviceDescriptor::new(id, TrackKind::Audio, label)
    }

    fn video(id: &str, label: &str) -> DeviceDescriptor {
        DeviceDescriptor::new(id, TrackKind::Video, label)
    }

    fn poll_until_changed(catalog: &mut DeviceCatalog) -> DeviceMap {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(map) = catalog.poll() {
                return map;
            }
            assert!(Instant::now() < deadline, "no catalog change within deadline");
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    fn wait_for_calls(enumerator: &ScriptedEnumerator, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while enumerator.calls_started() < count {
            assert!(Instant::now() < deadline, "enumeration never started");
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn deduplicates_ids_within_a_kind() {
        let raw = vec![
            audio("mic1", "Mic"),
            audio("mic1", "Mic (again)"),
            audio("mic2", ""),
            video("cam1", "Cam"),
            video("cam1", "Cam"),
        ];
        let map = DeviceMap::from_raw(&raw);

        assert_eq!(map.audio.len(), 2);
        assert_eq!(map.video.len(), 1);
        assert_eq!(map.audio[0].label, "Mic");
    }

    #[test]
    fn fully_resolved_requires_a_label() {
        let unlabeled = DeviceMap::from_raw(&[audio("mic1", ""), video("cam1", "")]);
        assert!(!unlabeled.fully_resolved());

        let labeled = DeviceMap::from_raw(&[audio("mic1", ""), video("cam1", "Cam")]);
        assert!(labeled.fully_resolved());

        assert!(!DeviceMap::default().fully_resolved());
    }

    #[test]
    fn refresh_commits_and_signals_change() {
        let enumerator = Arc::new(ScriptedEnumerator::new(vec![vec![audio("mic1", "Mic")]]));
        let mut catalog = DeviceCatalog::new(enumerator, Arc::new(NoopLogSink));

        assert!(catalog.current().is_none());
        catalog.refresh();

        let map = poll_until_changed(&mut catalog);
        assert_eq!(map.audio.len(), 1);
        assert_eq!(catalog.current(), Some(&map));
        assert!(catalog.fully_resolved());
    }

    #[test]
    fn superseded_refresh_is_never_observed() {
        let enumerator = Arc::new(ScriptedEnumerator::new(vec![
            vec![audio("stale", "")],
            vec![audio("fresh", "")],
        ]));
        let first_gate = enumerator.gate_next_call();

        let mut catalog = DeviceCatalog::new(
            Arc::clone(&enumerator) as Arc<dyn DeviceEnumerator>,
            Arc::new(NoopLogSink),
        );

        // first refresh claims "stale" and blocks on the gate
        catalog.refresh();
        wait_for_calls(&enumerator, 1);

        // second refresh supersedes it, then the first is released
        catalog.refresh();
        first_gate.send(()).unwrap();

        let map = poll_until_changed(&mut catalog);
        assert_eq!(map.audio[0].id, "fresh");

        // the stale result must not surface later either
        std::thread::sleep(Duration::from_millis(20));
        assert!(catalog.poll().is_none());
        assert_eq!(catalog.current().unwrap().audio[0].id, "fresh");
    }
}
