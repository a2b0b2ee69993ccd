use std::{
    io::Write,
    sync::mpsc::{self, SyncSender},
    thread,
};

use crate::log::{log_level::LogLevel, log_msg::LogMsg, log_sink::LogSink};
use crate::util::now_millis;

/// Bounded, non-blocking sink that writes log lines to stderr.
///
/// Producers enqueue `LogMsg` into a bounded channel; a background worker
/// drains it and writes. If the queue is full the message is dropped —
/// logging never blocks a caller.
pub struct StdoutLogSink {
    tx: SyncSender<LogMsg>,
    _thread: Option<thread::JoinHandle<()>>,
}

impl StdoutLogSink {
    #[must_use]
    pub fn start(cap: usize) -> Self {
        let (tx, rx) = mpsc::sync_channel::<LogMsg>(cap.max(1));

        let _thread = thread::Builder::new()
            .name("log-worker".into())
            .spawn(move || {
                let stderr = std::io::stderr();
                while let Ok(m) = rx.recv() {
                    let mut out = stderr.lock();
                    let _ = writeln!(out, "[{:?}] {} {} | {}", m.level, m.ts_ms, m.target, m.text);
                }
            })
            .ok();

        Self { tx, _thread }
    }
}

impl LogSink for StdoutLogSink {
    fn log(&self, level: LogLevel, msg: &str, target: &'static str) {
        // Full or disconnected queue both mean the line is dropped.
        let _ = self.tx.try_send(LogMsg::new(level, msg, target, now_millis()));
    }
}
