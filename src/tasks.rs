//! Periodic background tasks.
//!
//! The platform ready signal can fire more than once over the process
//! lifetime (e.g. after a transient reconnect), so every periodic task is
//! started through a [`TaskSlot`]: starting an already-running task is a
//! no-op, not an error.

use crate::logging::ChannelLogger;
use crate::platform::PlatformClient;
use rand::seq::IndexedRandom;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::warn;

const STATUS_PERIOD: Duration = Duration::from_secs(30 * 60);

/// One-shot guard for a process-lifetime periodic task.
#[derive(Default)]
pub struct TaskSlot {
    running: AtomicBool,
}

impl TaskSlot {
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
        }
    }

    /// Spawn the task built by `make` unless one is already running.
    ///
    /// Returns `true` if this call actually spawned the task. The closure
    /// is only invoked when the slot is acquired.
    pub fn start<F, Fut>(&self, make: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return false;
        }
        tokio::spawn(make());
        true
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Rotate the bot's displayed activity through the configured game list.
pub async fn status_rotation(
    platform: Arc<dyn PlatformClient>,
    games: Vec<String>,
    logger: ChannelLogger,
) {
    status_rotation_with_period(platform, games, logger, STATUS_PERIOD).await
}

pub async fn status_rotation_with_period(
    platform: Arc<dyn PlatformClient>,
    games: Vec<String>,
    logger: ChannelLogger,
    period: Duration,
) {
    let mut timer = interval(period);
    loop {
        timer.tick().await;
        let Some(game) = games.choose(&mut rand::rng()).cloned() else {
            continue;
        };
        logger.info("status_rotation", format!("Changing activity to {game}."));
        if let Err(e) = platform.set_activity(&game).await {
            warn!("Failed to update activity: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::log_queue;
    use crate::platform::testutil::RecordingPlatform;
    use std::sync::atomic::AtomicUsize;

    // ==================== TaskSlot Tests ====================

    #[tokio::test]
    async fn test_double_start_spawns_once() {
        let slot = TaskSlot::new();
        let spawned = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let spawned = spawned.clone();
            slot.start(move || async move {
                spawned.fetch_add(1, Ordering::SeqCst);
                // park forever like a real periodic task
                std::future::pending::<()>().await;
            });
        }
        tokio::task::yield_now().await;

        assert_eq!(spawned.load(Ordering::SeqCst), 1);
        assert!(slot.is_running());
    }

    #[tokio::test]
    async fn test_start_reports_whether_it_spawned() {
        let slot = TaskSlot::new();
        assert!(slot.start(|| async {}));
        assert!(!slot.start(|| async {}));
    }

    #[tokio::test]
    async fn test_closure_not_invoked_when_running() {
        let slot = TaskSlot::new();
        slot.start(|| async { std::future::pending::<()>().await });

        let invoked = Arc::new(AtomicBool::new(false));
        let flag = invoked.clone();
        slot.start(move || {
            flag.store(true, Ordering::SeqCst);
            async {}
        });

        assert!(!invoked.load(Ordering::SeqCst));
    }

    // ==================== Status Rotation Tests ====================

    #[tokio::test]
    async fn test_status_rotation_sets_configured_game() {
        tokio::time::pause();
        let platform = Arc::new(RecordingPlatform::new());
        let (sink, mut rx) = log_queue();
        let logger = ChannelLogger::new(sink);

        let handle = tokio::spawn(status_rotation_with_period(
            platform.clone(),
            vec!["Schafkopf".to_string()],
            logger,
            Duration::from_secs(1),
        ));

        tokio::time::advance(Duration::from_millis(1100)).await;
        tokio::time::sleep(Duration::from_millis(1)).await;

        let activities = platform.activities.lock().unwrap().clone();
        assert!(!activities.is_empty());
        assert_eq!(activities[0], "Schafkopf");
        assert!(rx.try_next().is_some(), "activity change should be logged");
        handle.abort();
    }

    #[tokio::test]
    async fn test_status_rotation_with_empty_game_list() {
        tokio::time::pause();
        let platform = Arc::new(RecordingPlatform::new());
        let (sink, _rx) = log_queue();

        let handle = tokio::spawn(status_rotation_with_period(
            platform.clone(),
            Vec::new(),
            ChannelLogger::new(sink),
            Duration::from_secs(1),
        ));

        tokio::time::advance(Duration::from_millis(2100)).await;
        tokio::time::sleep(Duration::from_millis(1)).await;

        assert!(platform.activities.lock().unwrap().is_empty());
        handle.abort();
    }
}
