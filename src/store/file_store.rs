use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::log::log_sink::LogSink;
use crate::sink_warn;
use crate::store::kv_store::KeyValueStore;

/// Line-based `KEY=VALUE` preference file.
///
/// Values must not contain newlines (the stored payloads here are compact
/// JSON strings and display names). Unparseable lines are skipped on load.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
    logger: Arc<dyn LogSink>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>, logger: Arc<dyn LogSink>) -> Self {
        let path = path.into();
        let mut entries = HashMap::new();

        if let Ok(content) = fs::read_to_string(&path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some(pos) = line.find('=') {
                    let key = line[..pos].trim().to_string();
                    let value = line[pos + 1..].trim().to_string();
                    entries.insert(key, value);
                }
            }
        }

        Self {
            path,
            entries: Mutex::new(entries),
            logger,
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort();

        let mut content = String::new();
        for key in keys {
            if let Some(value) = entries.get(key) {
                content.push_str(key);
                content.push('=');
                content.push_str(value);
                content.push('\n');
            }
        }

        if let Err(e) = fs::write(&self.path, content) {
            sink_warn!(
                self.logger,
                "failed to persist preferences to {}: {e}",
                self.path.display()
            );
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if value.contains('\n') {
            sink_warn!(self.logger, "dropping preference {key}: value contains newline");
            return;
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
            self.persist(&entries);
        }
    }
}
