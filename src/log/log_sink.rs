use crate::log::log_level::LogLevel;

/// Destination for log lines. Components hold an `Arc<dyn LogSink>` and
/// emit through the `sink_*` macros; implementations must never block.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str, target: &'static str);
}
