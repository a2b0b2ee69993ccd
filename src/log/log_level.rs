/// Severity of a log message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Very fine-grained events, normally compiled out.
    Trace,
    /// Diagnostic detail for tracking down misbehavior.
    Debug,
    /// Coarse progress of the application.
    Info,
    /// Something unexpected that the application recovered from.
    Warn,
    /// A failure the application survives in degraded form.
    Error,
}
