//! Weekly scheduling poll construction.
//!
//! The poll asks which weekdays of the coming week work for a boardgame
//! night. Rows are the configured weekday names with their dates; days
//! that are public holidays get the holiday name appended.

use crate::context::AppContext;
use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::HashMap;

/// Longest allowed poll duration in hours (platform limit).
pub const MAX_POLL_HOURS: u32 = 768;

/// The monday of the week after `date`.
pub fn next_monday(date: NaiveDate) -> NaiveDate {
    let days_ahead = 7 - date.weekday().num_days_from_monday() as i64;
    date + Duration::days(days_ahead)
}

/// The coming sunday at 18:00 (today at 18:00 if `date` is a sunday).
pub fn next_sunday_1800(date: NaiveDate) -> NaiveDateTime {
    let days_ahead = 6 - date.weekday().num_days_from_monday() as i64;
    (date + Duration::days(days_ahead))
        .and_hms_opt(18, 0, 0)
        .expect("18:00 is a valid time")
}

/// ISO week number of the week the poll is about.
// TODO: this wraps past the final ISO week at the turn of the year
pub fn next_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week() + 1
}

/// Poll duration in hours: the caller's value if within platform limits,
/// otherwise the time remaining until the coming sunday 18:00.
pub fn poll_duration_hours(hours: Option<u32>, now: NaiveDateTime) -> u32 {
    match hours {
        Some(h) if h >= 1 && h <= MAX_POLL_HOURS => h,
        _ => {
            let remaining = next_sunday_1800(now.date()) - now;
            remaining.num_hours().max(1) as u32
        }
    }
}

/// Render the question template, substituting the `{kw}` week number.
pub fn build_question(template: &str, week: u32) -> String {
    template.replace("{kw}", &week.to_string())
}

/// One poll row per weekday name: "Montag, 05.01." plus the holiday name
/// in parentheses when that date is a holiday.
pub fn build_answers(
    monday: NaiveDate,
    weekday_names: &[String],
    holidays: &HashMap<String, String>,
) -> Vec<String> {
    weekday_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let date = monday + Duration::days(i as i64);
            let mut text = format!("{}, {}", name, date.format("%d.%m."));
            if let Some(holiday) = holidays.get(&date.format("%Y-%m-%d").to_string()) {
                text.push_str(&format!(" ({holiday})"));
            }
            text
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct HolidayEntry {
    datum: String,
}

/// Fetch public holidays from the lookup service.
///
/// The service answers `{"<name>": {"datum": "YYYY-MM-DD", ...}, ...}`;
/// the result is inverted to date → name for row lookup.
pub async fn fetch_holidays(
    client: &reqwest::Client,
    url: &str,
) -> Result<HashMap<String, String>> {
    let entries: HashMap<String, HolidayEntry> = client
        .get(url)
        .timeout(std::time::Duration::from_secs(10))
        .send()
        .await
        .context("Failed to reach holiday service")?
        .error_for_status()
        .context("Holiday service returned an error")?
        .json()
        .await
        .context("Failed to parse holiday response")?;

    Ok(entries
        .into_iter()
        .map(|(name, entry)| (entry.datum, name))
        .collect())
}

/// Build and post the scheduling poll into `channel`.
///
/// An unreachable holiday service downgrades the rows, not the poll:
/// the failure is logged as a warning and the answers go out without
/// holiday hints. Returns the week number the poll is about.
pub async fn post_poll(ctx: &AppContext, channel: u64, hours: Option<u32>) -> Result<u32> {
    let now = chrono::Utc::now().naive_utc();
    let week = next_week_number(now.date());

    let client = reqwest::Client::new();
    let holidays = match fetch_holidays(&client, &ctx.bot.holiday_api_url).await {
        Ok(holidays) => holidays,
        Err(e) => {
            ctx.logger.warning(
                "poll",
                format!("Holiday lookup failed, posting without holiday hints: {e:#}"),
            );
            HashMap::new()
        }
    };

    let question = build_question(&ctx.bot.question_text, week);
    let answers = build_answers(next_monday(now.date()), &ctx.bot.weekday_names, &holidays);
    let duration = poll_duration_hours(hours, now);

    ctx.platform
        .send_poll(channel, &question, &answers, duration)
        .await?;
    Ok(week)
}
