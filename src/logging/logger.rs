//! Producer facade for the log relay.

use crate::logging::{to_notification, Level, LogRecord, LogSink};
use std::fmt::Display;
use tracing::warn;

/// Clonable entry point used by every code path that logs.
///
/// Each call mirrors the record to the process sink via `tracing` and
/// enqueues the formatted notification for the drain loop. The error and
/// critical methods take the payload as a parameter, so well-typed call
/// sites cannot produce a record that violates the payload invariant.
/// Failures inside this pipeline are reported to the process sink only;
/// nothing here ever escapes into application logic.
#[derive(Clone)]
pub struct ChannelLogger {
    sink: LogSink,
}

impl ChannelLogger {
    pub fn new(sink: LogSink) -> Self {
        Self { sink }
    }

    pub fn debug(&self, context: &str, message: impl Into<String>) {
        self.dispatch(LogRecord::new(Level::Debug, context, message));
    }

    pub fn info(&self, context: &str, message: impl Into<String>) {
        self.dispatch(LogRecord::new(Level::Info, context, message));
    }

    /// Audit record for an invoked command.
    pub fn command(&self, context: &str, message: impl Into<String>) {
        self.dispatch(LogRecord::new(Level::Command, context, message));
    }

    pub fn warning(&self, context: &str, message: impl Into<String>) {
        self.dispatch(LogRecord::new(Level::Warning, context, message));
    }

    pub fn error(&self, context: &str, message: impl Into<String>, error: &dyn Display) {
        self.dispatch(LogRecord::with_error(
            Level::Error,
            context,
            message,
            error.to_string(),
        ));
    }

    pub fn critical(&self, context: &str, message: impl Into<String>, error: &dyn Display) {
        self.dispatch(LogRecord::with_error(
            Level::Critical,
            context,
            message,
            error.to_string(),
        ));
    }

    fn dispatch(&self, record: LogRecord) {
        match record.level {
            Level::Debug => tracing::debug!("({}) {}", record.context, record.message),
            Level::Info | Level::Command => {
                tracing::info!("({}) {}", record.context, record.message)
            }
            Level::Warning => tracing::warn!("({}) {}", record.context, record.message),
            Level::Error | Level::Critical => tracing::error!(
                "({}) {} {}",
                record.context,
                record.message,
                record.error.as_deref().unwrap_or_default()
            ),
        }

        match to_notification(&record) {
            Ok(notification) => self.sink.push(notification),
            // programmer error; report locally instead of failing the caller
            Err(e) => warn!("Not relaying malformed log record: {}", e),
        }
    }
}
