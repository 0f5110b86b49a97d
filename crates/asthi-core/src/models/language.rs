use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Display and conversation language for a single request.
///
/// Passed explicitly into every bundle lookup and vendor call; there is no
/// process-wide language setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    /// Two-letter tag as sent by the web client.
    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// ISO 639-3 code expected by the speech vendor.
    pub fn iso639_3(self) -> &'static str {
        match self {
            Language::En => "eng",
            Language::Hi => "hin",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            other => Err(CoreError::UnsupportedLanguage(other.to_string())),
        }
    }
}
