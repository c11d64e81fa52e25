//! Internationalization (i18n) module for multi-language support.
//!
//! All user-facing text is resolved through a message key and a locale tag
//! (e.g. "de-DE"). Lookups go through a three-step chain: the requested
//! locale's table, then the fallback locale's table, then the key itself as
//! a last-resort degradation.
//!
//! # Architecture
//!
//! - `store`: loads locale tables from their persisted source; the
//!   [`LocaleStore`] trait makes the loading policy swappable
//! - `translator`: key + locale resolution and placeholder substitution
//!
//! Locale sources are re-read on every lookup, so edits to the translation
//! files take effect without a restart. Call volume is human-triggered, not
//! a hot path.

mod store;
mod translator;

pub use store::{DirStore, LocaleRegistry, LocaleStore, LocaleTable};
pub use translator::{TranslateError, Translator};
