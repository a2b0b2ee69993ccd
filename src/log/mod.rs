pub mod log_level;
pub mod log_macros;
pub mod log_msg;
pub mod log_sink;
pub mod noop_log_sink;
pub mod stdout_log_sink;
pub use noop_log_sink::NoopLogSink;
pub use stdout_log_sink::StdoutLogSink;
