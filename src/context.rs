//! Application context: everything that used to be process-global state,
//! constructed once at startup and passed by reference into the components
//! that need it.

use crate::config::{BotConfig, Secrets};
use crate::i18n::{DirStore, Translator};
use crate::logging::{log_queue, ChannelLogger, DrainLoop, LogReceiver};
use crate::platform::PlatformClient;
use crate::tasks::{status_rotation, TaskSlot};
use std::sync::Arc;

pub struct AppContext {
    pub secrets: Secrets,
    pub bot: BotConfig,
    pub translator: Translator<DirStore>,
    pub platform: Arc<dyn PlatformClient>,
    pub logger: ChannelLogger,

    /// Guards for the two process-lifetime periodic tasks.
    pub drain_slot: TaskSlot,
    pub status_slot: TaskSlot,
}

impl AppContext {
    /// Build the context and its log queue. The returned receiver feeds
    /// the drain loop started by [`start_background_tasks`].
    pub fn new(
        secrets: Secrets,
        bot: BotConfig,
        platform: Arc<dyn PlatformClient>,
    ) -> (Arc<Self>, LogReceiver) {
        let (sink, receiver) = log_queue();
        let translator = Translator::new(DirStore::new(&bot.locales_dir), bot.fallback_locale.clone());
        let ctx = Arc::new(Self {
            secrets,
            bot,
            translator,
            platform,
            logger: ChannelLogger::new(sink),
            drain_slot: TaskSlot::new(),
            status_slot: TaskSlot::new(),
        });
        (ctx, receiver)
    }
}

/// Start the drain loop and the status rotation.
///
/// Safe to call on every ready signal: the receiver is consumed on the
/// first call and each task slot refuses a second start, so reconnects do
/// not duplicate running loops.
pub fn start_background_tasks(ctx: &Arc<AppContext>, log_rx: &mut Option<LogReceiver>) {
    if let Some(receiver) = log_rx.take() {
        let drain = DrainLoop::new(receiver, ctx.platform.clone(), ctx.secrets.log_channel);
        ctx.drain_slot.start(|| drain.run());
    }

    let platform = ctx.platform.clone();
    let games = ctx.bot.games.clone();
    let logger = ctx.logger.clone();
    ctx.status_slot
        .start(move || status_rotation(platform, games, logger));
}
