use crate::logging::Level;
use chrono::{DateTime, Utc};

/// A structured event reported by some part of the bot.
///
/// Invariant: `error` is present if and only if the level is `Error` or
/// `Critical`. The constructors make the common cases correct by shape;
/// the formatter enforces the invariant for records built by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: Level,

    /// Originating function or context name, e.g. "grant_role".
    pub context: String,

    pub message: String,

    /// Event creation time, not send time.
    pub timestamp: DateTime<Utc>,

    /// Error/stack payload, only for `Error` and `Critical` records.
    pub error: Option<String>,
}

impl LogRecord {
    /// Build a record without an error payload.
    pub fn new(level: Level, context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            context: context.into(),
            message: message.into(),
            timestamp: Utc::now(),
            error: None,
        }
    }

    /// Build an `Error`/`Critical` record carrying its payload.
    pub fn with_error(
        level: Level,
        context: impl Into<String>,
        message: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(level, context, message)
        }
    }
}

/// Display-ready artifact derived from one [`LogRecord`], destined for the
/// log channel. One notification per record, no merging.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub color: u32,
    pub icon_url: &'static str,
    pub timestamp: DateTime<Utc>,
    pub traceback: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_payload() {
        let record = LogRecord::new(Level::Info, "main", "Bot running.");
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.context, "main");
        assert!(record.error.is_none());
    }

    #[test]
    fn test_with_error_carries_payload() {
        let record = LogRecord::with_error(Level::Error, "drain", "Send failed.", "stack trace");
        assert_eq!(record.error.as_deref(), Some("stack trace"));
    }

    #[test]
    fn test_timestamp_is_creation_time() {
        let before = Utc::now();
        let record = LogRecord::new(Level::Debug, "x", "y");
        let after = Utc::now();
        assert!(record.timestamp >= before && record.timestamp <= after);
    }
}
