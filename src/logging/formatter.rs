//! Deterministic mapping from [`LogRecord`] to [`Notification`].

use crate::logging::{Level, LogRecord, Notification};
use thiserror::Error;

/// Contract violations in the calling code. These indicate bugs, not
/// runtime conditions to recover from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// An `Error`/`Critical` record arrived without its error payload.
    #[error("record at level {0} carries no error payload")]
    MissingErrorPayload(Level),

    /// A record below `Error` arrived with an error payload attached.
    #[error("record at level {0} unexpectedly carries an error payload")]
    UnexpectedErrorPayload(Level),
}

/// Convert a record into its display-ready notification.
///
/// The three branches are keyed on severity and are mutually exclusive and
/// exhaustive over the closed [`Level`] enumeration:
///
/// - `Command`: plain body, no traceback.
/// - `Error`/`Critical`: body plus a traceback block from the payload.
/// - everything else: body wrapped as a monospace block, no traceback.
pub fn to_notification(record: &LogRecord) -> Result<Notification, FormatError> {
    let base = |body: String, traceback: Option<String>| Notification {
        title: record.context.clone(),
        body,
        color: record.level.color(),
        icon_url: record.level.icon_url(),
        timestamp: record.timestamp,
        traceback,
    };

    match record.level {
        Level::Command => match record.error {
            Some(_) => Err(FormatError::UnexpectedErrorPayload(record.level)),
            None => Ok(base(record.message.clone(), None)),
        },
        Level::Error | Level::Critical => {
            let payload = record
                .error
                .as_ref()
                .ok_or(FormatError::MissingErrorPayload(record.level))?;
            Ok(base(
                record.message.clone(),
                Some(format!("```\n{payload}\n```")),
            ))
        }
        Level::Debug | Level::Info | Level::Warning => match record.error {
            Some(_) => Err(FormatError::UnexpectedErrorPayload(record.level)),
            None => Ok(base(format!("```\n{}\n```", record.message), None)),
        },
    }
}
