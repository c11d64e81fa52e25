use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Secrets read once from the environment at startup, immutable thereafter.
#[derive(Debug, Clone)]
pub struct Secrets {
    /// Bot authentication token.
    pub bot_token: String,

    /// User ID of the bot owner.
    pub owner_id: u64,

    /// Channel ID that receives relayed log notifications.
    pub log_channel: u64,

    /// Base URL of the platform REST API.
    pub api_base_url: String,
}

impl Secrets {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bot_token: std::env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
            owner_id: std::env::var("OWNER_ID")
                .context("OWNER_ID not set")?
                .parse()
                .context("OWNER_ID is not a valid user ID")?,
            log_channel: std::env::var("LOG_CHANNEL")
                .context("LOG_CHANNEL not set")?
                .parse()
                .context("LOG_CHANNEL is not a valid channel ID")?,
            api_base_url: std::env::var("PLATFORM_API_URL")
                .unwrap_or_else(|_| "https://discord.com/api/v10".to_string()),
        })
    }
}

/// One phrase-triggered reaction rule.
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionRule {
    /// Phrase that triggers the reaction (matched case-insensitively).
    pub phrase: String,

    /// Candidate custom emoji names; one is picked at random if present
    /// in the guild.
    pub guild_emojis: Vec<String>,

    /// Unicode glyph used when no candidate emoji exists in the guild.
    pub fallback_emoji: String,
}

/// Bot configuration loaded from `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Locale used when the requested locale or key is unavailable.
    #[serde(default = "default_fallback_locale")]
    pub fallback_locale: String,

    /// Directory holding one `<locale-tag>.json` file per locale.
    #[serde(default = "default_locales_dir")]
    pub locales_dir: String,

    /// Channel the weekly poll is posted to.
    pub poll_channel: u64,

    /// Cron expression for the weekly poll job.
    #[serde(default = "default_poll_cron")]
    pub poll_cron: String,

    /// URL of the public-holiday lookup service.
    pub holiday_api_url: String,

    /// Poll question template; accepts a `{kw}` week-number substitution.
    pub question_text: String,

    /// Display names for the five poll weekdays.
    pub weekday_names: Vec<String>,

    /// Rotating activity status strings.
    pub games: Vec<String>,

    /// Phrase-triggered reaction rules.
    pub reactions: Vec<ReactionRule>,
}

fn default_fallback_locale() -> String {
    "en-GB".to_string()
}

fn default_locales_dir() -> String {
    "locales".to_string()
}

fn default_poll_cron() -> String {
    // Sunday 18:00 UTC
    "0 0 18 * * Sun".to_string()
}

impl BotConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
