//! Supported UI/content languages

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A content language; each one owns its own subtree under the content root
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Pt];

    /// Two-letter code, also the name of the content subdirectory
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    /// Value for the `lang` attribute of the html element
    pub fn html_lang(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt-BR",
        }
    }

    /// The language offered by the language switcher
    pub fn other(self) -> Language {
        match self {
            Language::En => Language::Pt,
            Language::Pt => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a language code is not supported
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0:?}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "pt" | "pt-br" => Ok(Language::Pt),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}
