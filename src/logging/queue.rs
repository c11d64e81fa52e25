//! The log delivery queue.
//!
//! A multi-producer, single-consumer FIFO of [`Notification`]s. Producers
//! push without blocking from any task; the drain loop is the only
//! consumer. Order is enqueue order, ties broken by enqueue sequence, and
//! nothing is dropped or duplicated while the consumer is alive.

use crate::logging::Notification;
use tokio::sync::mpsc;
use tracing::warn;

/// Create a connected sink/receiver pair.
pub fn log_queue() -> (LogSink, LogReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (LogSink { tx }, LogReceiver { rx })
}

/// Clonable producer handle. Safe to use from any task.
#[derive(Clone)]
pub struct LogSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl LogSink {
    /// Enqueue a notification. Never blocks and never fails the caller: if
    /// the consumer is gone the notification is recorded to the process
    /// sink and discarded.
    pub fn push(&self, notification: Notification) {
        if let Err(e) = self.tx.send(notification) {
            warn!("Log queue consumer gone, dropping notification '{}'", e.0.title);
        }
    }
}

/// Consumer side, owned by the drain loop.
pub struct LogReceiver {
    rx: mpsc::UnboundedReceiver<Notification>,
}

impl LogReceiver {
    /// Dequeue the next notification if one is waiting.
    pub fn try_next(&mut self) -> Option<Notification> {
        self.rx.try_recv().ok()
    }
}
