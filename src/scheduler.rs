use crate::context::AppContext;
use crate::poll;
use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::info;

/// Initialize and start the scheduler with the weekly poll job.
pub async fn start_scheduler(ctx: Arc<AppContext>) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    info!("Scheduling weekly poll (cron: {})", ctx.bot.poll_cron);

    let ctx_clone = Arc::clone(&ctx);
    let job = Job::new_async(ctx.bot.poll_cron.as_str(), move |_uuid, _l| {
        let ctx = Arc::clone(&ctx_clone);
        Box::pin(async move {
            info!("⏰ Weekly poll job triggered");
            if let Err(e) = run_poll_job(&ctx).await {
                ctx.logger.error("poll_job", "Weekly poll failed.", &e);
            }
        })
    })?;
    scheduler.add(job).await?;

    scheduler.start().await?;
    info!("✓ Scheduler started");

    Ok(scheduler)
}

/// Run the weekly poll job: post the poll into the configured channel.
pub async fn run_poll_job(ctx: &AppContext) -> Result<()> {
    let week = poll::post_poll(ctx, ctx.bot.poll_channel, None).await?;
    ctx.logger.info(
        "poll_job",
        format!("Weekly poll for KW{week} posted in <#{}>.", ctx.bot.poll_channel),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testutil::test_context;
    use crate::logging::Level;

    // ==================== Poll Job Tests ====================

    #[tokio::test]
    async fn test_run_poll_job_posts_to_configured_channel() {
        let (ctx, platform, mut rx, _dir) = test_context(&[]);

        run_poll_job(&ctx).await.expect("Should post poll");

        let polls = platform.polls.lock().unwrap().clone();
        assert_eq!(polls.len(), 1);
        let (channel, question, answers, duration) = &polls[0];
        assert_eq!(*channel, 55);
        assert!(question.contains("KW"));
        assert_eq!(answers.len(), 5);
        assert!(*duration >= 1 && *duration <= poll::MAX_POLL_HOURS);

        // unreachable holiday service degrades to a warning, then success
        let warning = rx.try_next().expect("Should warn about holiday lookup");
        assert_eq!(warning.color, Level::Warning.color());
        let success = rx.try_next().expect("Should log the posted poll");
        assert_eq!(success.color, Level::Info.color());
    }

    #[tokio::test]
    async fn test_poll_job_failure_is_reported() {
        let (ctx, platform, _rx, _dir) = test_context(&[]);
        platform.fail_polls();

        assert!(run_poll_job(&ctx).await.is_err());
    }
}
