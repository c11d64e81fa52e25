//! Structured log relay into the platform log channel.
//!
//! Pipeline: a [`LogRecord`] is formatted into a display-ready
//! [`Notification`], pushed onto a multi-producer FIFO and eventually sent
//! by the periodic [`DrainLoop`]. Delivery is strictly best-effort: a
//! failed send drops that notification and is reported only to the process
//! sink (`tracing`), never back into the queue.

mod drain;
mod formatter;
mod level;
mod logger;
mod queue;
mod record;

pub use drain::DrainLoop;
pub use formatter::{to_notification, FormatError};
pub use level::Level;
pub use logger::ChannelLogger;
pub use queue::{log_queue, LogReceiver, LogSink};
pub use record::{LogRecord, Notification};
