//! Phrase-triggered message reactions.

use crate::config::ReactionRule;
use crate::context::AppContext;
use anyhow::Result;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Find the first rule whose phrase occurs in `text` (case-insensitive).
pub fn match_rule<'a>(text: &str, rules: &'a [ReactionRule]) -> Option<&'a ReactionRule> {
    let lowered = text.to_lowercase();
    rules
        .iter()
        .find(|rule| lowered.contains(&rule.phrase.to_lowercase()))
}

/// Pick one of the rule's candidate emojis that exists in the guild, or
/// the fallback glyph when none do.
pub fn pick_emoji<'a>(
    rule: &'a ReactionRule,
    guild_emoji_names: &[String],
    rng: &mut impl Rng,
) -> &'a str {
    let available: Vec<&String> = rule
        .guild_emojis
        .iter()
        .filter(|name| guild_emoji_names.contains(name))
        .collect();
    available
        .choose(rng)
        .map(|name| name.as_str())
        .unwrap_or(&rule.fallback_emoji)
}

/// React to a guild message if a configured phrase matches.
pub async fn handle_message(
    ctx: &AppContext,
    channel: u64,
    message_id: u64,
    text: &str,
    guild_emoji_names: &[String],
) -> Result<()> {
    let Some(rule) = match_rule(text, &ctx.bot.reactions) else {
        return Ok(());
    };
    let emoji = pick_emoji(rule, guild_emoji_names, &mut rand::rng()).to_string();
    ctx.logger.info(
        "on_message",
        format!("Reacting with {emoji} to phrase \"{}\".", rule.phrase),
    );
    ctx.platform.add_reaction(channel, message_id, &emoji).await
}
