//! The periodic consumer that empties the log delivery queue.

use crate::logging::queue::LogReceiver;
use crate::platform::PlatformClient;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::warn;

const DRAIN_PERIOD: Duration = Duration::from_secs(10);

/// Dequeues notifications and forwards them to the log channel.
///
/// Sends are serialized: each one completes before the next is issued, so
/// the destination's rate limits are respected at the cost of delivery
/// latency. A hung send stalls the loop until the transport gives up; no
/// secondary timeout is layered on top.
pub struct DrainLoop {
    rx: LogReceiver,
    platform: Arc<dyn PlatformClient>,
    log_channel: u64,
    period: Duration,
}

impl DrainLoop {
    pub fn new(rx: LogReceiver, platform: Arc<dyn PlatformClient>, log_channel: u64) -> Self {
        Self {
            rx,
            platform,
            log_channel,
            period: DRAIN_PERIOD,
        }
    }

    /// Override the wake interval (used by tests).
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Run forever, draining the queue once per wake interval.
    pub async fn run(mut self) {
        let mut timer = interval(self.period);
        loop {
            timer.tick().await;
            self.drain_cycle().await;
        }
    }

    /// One drain cycle: dequeue and send until the queue is empty.
    ///
    /// A failed send drops that notification only. The failure is reported
    /// to the process sink, never back into the queue, so logging cannot
    /// recursively fail itself.
    pub async fn drain_cycle(&mut self) {
        while let Some(notification) = self.rx.try_next() {
            if let Err(e) = self
                .platform
                .send_log_embed(self.log_channel, &notification)
                .await
            {
                warn!(
                    "Dropping log notification '{}' after failed send: {}",
                    notification.title, e
                );
            }
        }
    }
}
