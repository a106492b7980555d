//! Logging collaborator interface.
//!
//! The engine reports diagnostics through an injected capability instead of
//! global macros, so embedders decide where messages go. The default
//! implementation forwards to [`tracing`]; tests that want silence inject
//! [`NoopLogger`].

use std::fmt;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Unusable engine state or a failed pattern compilation.
    Error,
    /// Rejected input; the operation was a no-op.
    Warn,
    /// Notable lifecycle events.
    Info,
    /// Match traces and state transitions.
    Debug,
}

/// Capability through which the engine emits diagnostics.
///
/// Implementations must be cheap to call: the engine logs on hot paths at
/// debug level and assumes the sink does its own filtering.
pub trait CompletionLogger: fmt::Debug + Send + Sync {
    /// Record `message` at `level`.
    fn log(&self, level: LogLevel, message: &str);
}

/// Forwards engine diagnostics to the `tracing` ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl CompletionLogger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => tracing::error!(target: "tabmatch", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "tabmatch", "{message}"),
            LogLevel::Info => tracing::info!(target: "tabmatch", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "tabmatch", "{message}"),
        }
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl CompletionLogger for NoopLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct RecordingLogger {
        messages: Mutex<Vec<(LogLevel, String)>>,
    }

    impl CompletionLogger for RecordingLogger {
        fn log(&self, level: LogLevel, message: &str) {
            self.messages
                .lock()
                .unwrap()
                .push((level, message.to_owned()));
        }
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Debug);
    }

    #[test]
    fn custom_sink_receives_messages() {
        let logger = Arc::new(RecordingLogger::default());
        logger.log(LogLevel::Warn, "rejected empty input");

        let messages = logger.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, LogLevel::Warn);
    }

    #[test]
    fn noop_logger_accepts_anything() {
        NoopLogger.log(LogLevel::Error, "dropped");
    }
}
