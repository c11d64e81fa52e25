//! Admin command handlers and the interaction error boundary.
//!
//! Handlers return the localized reply text for the invoking user; the
//! platform glue is responsible for delivering it as an ephemeral
//! response. Every failure that belongs to one interaction is converted
//! into a localized message here and never crosses the boundary.

use crate::context::AppContext;
use crate::i18n::TranslateError;
use crate::poll;
use thiserror::Error;
use tracing::warn;

/// The slice of an incoming interaction the handlers care about.
#[derive(Debug, Clone)]
pub struct Interaction {
    pub user: u64,
    pub channel: u64,
    pub guild: Option<u64>,
    pub locale: String,
}

#[derive(Debug, Error)]
pub enum CommandError {
    /// A non-owner invoked an owner-only command.
    #[error("caller is not the bot owner")]
    NotAuthorized,

    /// The caller lacks the named platform permissions.
    #[error("missing permissions: {}", .0.join(", "))]
    MissingPermissions(Vec<String>),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<TranslateError> for CommandError {
    fn from(e: TranslateError) -> Self {
        CommandError::Internal(anyhow::Error::new(e))
    }
}

fn require_owner(ctx: &AppContext, interaction: &Interaction) -> Result<(), CommandError> {
    if interaction.user == ctx.secrets.owner_id {
        Ok(())
    } else {
        Err(CommandError::NotAuthorized)
    }
}

/// Owner-only: grant a role to a guild member.
pub async fn grant_role(
    ctx: &AppContext,
    interaction: &Interaction,
    guild: u64,
    user: u64,
    role: u64,
) -> Result<String, CommandError> {
    ctx.logger.command(
        "grant_role",
        format!(
            "<@{}> used /ascend in <#{}>.",
            interaction.user, interaction.channel
        ),
    );
    require_owner(ctx, interaction)?;

    ctx.platform.grant_role(guild, user, role).await?;
    Ok(ctx.translator.translate(
        "ascend_success",
        &interaction.locale,
        &[("role", &format!("<@&{role}>")), ("member", &format!("<@{user}>"))],
    )?)
}

/// Owner-only: remove a role from a guild member.
pub async fn revoke_role(
    ctx: &AppContext,
    interaction: &Interaction,
    guild: u64,
    user: u64,
    role: u64,
) -> Result<String, CommandError> {
    ctx.logger.command(
        "revoke_role",
        format!(
            "<@{}> used /descend in <#{}>.",
            interaction.user, interaction.channel
        ),
    );
    require_owner(ctx, interaction)?;

    ctx.platform.revoke_role(guild, user, role).await?;
    Ok(ctx.translator.translate(
        "descend_success",
        &interaction.locale,
        &[("role", &format!("<@&{role}>")), ("member", &format!("<@{user}>"))],
    )?)
}

/// Post the scheduling poll into the interaction's channel.
pub async fn post_poll(
    ctx: &AppContext,
    interaction: &Interaction,
    hours: Option<u32>,
) -> Result<String, CommandError> {
    ctx.logger.command(
        "post_poll",
        format!(
            "<@{}> used /poll in <#{}>.",
            interaction.user, interaction.channel
        ),
    );

    poll::post_poll(ctx, interaction.channel, hours).await?;
    Ok(ctx
        .translator
        .translate("poll_posted", &interaction.locale, &[])?)
}

/// Turn a command failure into the localized, ephemeral-style reply for
/// the invoking user. Internal errors are additionally relayed to the log
/// channel; nothing here can fail the caller.
pub fn reply_for_error(
    ctx: &AppContext,
    interaction: &Interaction,
    error: &CommandError,
) -> String {
    let owner_id = ctx.secrets.owner_id.to_string();
    let rendered = match error {
        CommandError::NotAuthorized => {
            ctx.logger.warning(
                "on_error",
                format!(
                    "<@{}> tried to use an owner-only command in <#{}>.",
                    interaction.user, interaction.channel
                ),
            );
            ctx.translator
                .translate("error_owner", &interaction.locale, &[("OWNER", &owner_id)])
        }
        CommandError::MissingPermissions(permissions) => {
            let joined = permissions.join(", ");
            ctx.logger.warning(
                "on_error",
                format!(
                    "<@{}> used a command in <#{}> while missing permissions: {}.",
                    interaction.user, interaction.channel, joined
                ),
            );
            ctx.translator.translate(
                "error_perm",
                &interaction.locale,
                &[("permissions", &joined)],
            )
        }
        CommandError::Internal(e) => {
            ctx.logger.error("on_error", "A command failed.", e);
            ctx.translator
                .translate("error", &interaction.locale, &[("OWNER", &owner_id)])
        }
    };

    rendered.unwrap_or_else(|e| {
        warn!("Failed to render error reply: {}", e);
        "error".to_string()
    })
}
