use anyhow::Result;
use boardgame_bot::config::{BotConfig, Secrets};
use boardgame_bot::context::{start_background_tasks, AppContext};
use boardgame_bot::platform::HttpPlatformClient;
use boardgame_bot::scheduler;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("boardgame_bot=info".parse()?),
        )
        .init();

    info!("Starting boardgame bot v{}", env!("CARGO_PKG_VERSION"));

    let secrets = Secrets::from_env()?;
    let bot = BotConfig::load("config.json")?;
    let platform = Arc::new(HttpPlatformClient::new(
        secrets.api_base_url.clone(),
        secrets.bot_token.clone(),
    ));

    let (ctx, log_rx) = AppContext::new(secrets, bot, platform);

    // The platform's ready signal can fire again after a reconnect, so
    // the start is guarded; calling it here covers the first readiness.
    let mut log_rx = Some(log_rx);
    start_background_tasks(&ctx, &mut log_rx);

    ctx.logger.info(
        "main",
        format!("Bot v{} is up and running.", env!("CARGO_PKG_VERSION")),
    );

    let sched = scheduler::start_scheduler(Arc::clone(&ctx)).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    let mut sched = sched;
    sched.shutdown().await?;

    Ok(())
}
