//! Boardgame night bot.
//!
//! The bot reacts to configured phrases in chat messages, posts a weekly
//! scheduling poll, offers a couple of owner-only admin commands and relays
//! its own structured log events into a dedicated log channel.
//!
//! The interesting machinery lives in two places:
//!
//! - [`i18n`]: locale tables loaded fresh from disk on every lookup, with a
//!   fallback-locale resolution chain.
//! - [`logging`]: log records formatted into channel notifications, queued
//!   through a multi-producer FIFO and drained by a periodic task that
//!   serializes outbound sends.
//!
//! Everything platform-facing goes through the [`platform::PlatformClient`]
//! trait so the HTTP client can be swapped for a fake in tests.

pub mod commands;
pub mod config;
pub mod context;
pub mod i18n;
pub mod logging;
pub mod platform;
pub mod poll;
pub mod reactions;
pub mod scheduler;
pub mod tasks;
