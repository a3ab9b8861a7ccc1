//! Storefront library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod content;
pub mod core;
pub mod view;

#[cfg(test)]
pub mod test_support;

/// Content language. Catalog documents are keyed by [`Language::key`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    De,
}

impl Language {
    /// Top-level key used by localized JSON documents.
    pub fn key(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }

    /// Maps a browser or POSIX locale string to a supported language.
    ///
    /// Anything that isn't recognizably English falls back to German.
    pub fn from_locale(locale: &str) -> Language {
        let tag = locale
            .split(['.', '@'])
            .next()
            .unwrap_or("")
            .to_ascii_lowercase()
            .replace('_', "-");
        let primary = tag.split('-').next().unwrap_or("");
        match primary {
            "en" => Language::En,
            _ => Language::De,
        }
    }

    pub fn parse(s: &str) -> Option<Language> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "de" => Some(Language::De),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_locales() {
        assert_eq!(Language::from_locale("en"), Language::En);
        assert_eq!(Language::from_locale("en-US"), Language::En);
        assert_eq!(Language::from_locale("en-us"), Language::En);
        assert_eq!(Language::from_locale("en_GB.UTF-8"), Language::En);
    }

    #[test]
    fn test_unknown_locale_defaults_to_german() {
        assert_eq!(Language::from_locale("de"), Language::De);
        assert_eq!(Language::from_locale("fr-FR"), Language::De);
        assert_eq!(Language::from_locale(""), Language::De);
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(Language::parse("EN"), Some(Language::En));
        assert_eq!(Language::parse("de"), Some(Language::De));
        assert_eq!(Language::parse("it"), None);
        assert_eq!(Language::En.key(), "en");
    }
}
