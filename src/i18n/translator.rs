//! Message key resolution with fallback-locale policy.

use crate::i18n::LocaleStore;
use thiserror::Error;

/// Errors surfaced by [`Translator::translate`].
///
/// A key missing from every table is deliberately not an error: the caller
/// gets the raw key back, which signals a missing-translation bug to
/// whoever reads the rendered text without failing the interaction.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// A template requires a substitution value that was not supplied.
    /// Silently dropping a placeholder would corrupt user-facing text, so
    /// this propagates to the caller.
    #[error("no value supplied for placeholder '{placeholder}' in key '{key}'")]
    MissingSubstitution { key: String, placeholder: String },

    /// The locale registry itself could not be loaded.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Resolves (key, locale) pairs through a [`LocaleStore`].
///
/// The store is consulted fresh on every call; the translator holds no
/// cache and no mutable state.
pub struct Translator<S> {
    store: S,
    fallback: String,
}

impl<S: LocaleStore> Translator<S> {
    pub fn new(store: S, fallback: impl Into<String>) -> Self {
        Self {
            store,
            fallback: fallback.into(),
        }
    }

    /// Resolve `key` for `locale`, substituting `{name}` placeholders from
    /// `args`.
    ///
    /// Resolution order: the requested locale's table, then the fallback
    /// locale's table, then the key itself verbatim.
    ///
    /// # Arguments
    /// * `key` - Stable message key (e.g. "poll_desc")
    /// * `locale` - Requested locale tag (e.g. "de-DE")
    /// * `args` - Placeholder name/value pairs
    pub fn translate(
        &self,
        key: &str,
        locale: &str,
        args: &[(&str, &str)],
    ) -> Result<String, TranslateError> {
        let registry = self.store.load()?;

        if let Some(template) = registry.get(locale).and_then(|table| table.get(key)) {
            return render(key, template, args);
        }
        if let Some(template) = registry.get(&self.fallback).and_then(|table| table.get(key)) {
            return render(key, template, args);
        }
        Ok(key.to_string())
    }
}

/// Substitute `{name}` placeholders in `template` from `args`.
///
/// `{{` and `}}` escape to literal braces.
fn render(key: &str, template: &str, args: &[(&str, &str)]) -> Result<String, TranslateError> {
    let placeholder_regex = regex::Regex::new(r"\{\{|\}\}|\{([A-Za-z0-9_-]+)\}").unwrap();

    let mut result = String::with_capacity(template.len());
    let mut last_end = 0;

    for cap in placeholder_regex.captures_iter(template) {
        let whole_match = cap.get(0).unwrap();
        result.push_str(&template[last_end..whole_match.start()]);

        match whole_match.as_str() {
            "{{" => result.push('{'),
            "}}" => result.push('}'),
            _ => {
                let name = cap.get(1).unwrap().as_str();
                let value = args
                    .iter()
                    .find(|(arg, _)| *arg == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| TranslateError::MissingSubstitution {
                        key: key.to_string(),
                        placeholder: name.to_string(),
                    })?;
                result.push_str(value);
            }
        }

        last_end = whole_match.end();
    }

    result.push_str(&template[last_end..]);
    Ok(result)
}
