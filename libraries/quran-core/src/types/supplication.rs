use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A single supplication from the Hisnul Muslim collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dua {
    /// Identifier within the collection
    pub id: String,
    /// Arabic text
    pub arabic: String,
    /// English translation
    pub translation: String,
    /// Recitation audio, if provided
    pub audio_url: Option<String>,
}

/// A titled group of supplications (e.g. "When waking up")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuaCategory {
    /// Category title
    pub name: String,
    /// Supplications in collection order
    pub duas: Vec<Dua>,
}

// ===== husn_en.json shape =====

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "English", default)]
    english: Vec<RawCategory>,
}

#[derive(Deserialize)]
struct RawCategory {
    #[serde(rename = "TITLE")]
    title: String,
    #[serde(rename = "TEXT", default)]
    text: Value,
}

#[derive(Deserialize)]
struct RawDua {
    #[serde(rename = "ID")]
    id: Value,
    #[serde(rename = "ARABIC_TEXT", default)]
    arabic_text: String,
    #[serde(rename = "TRANSLATED_TEXT", default)]
    translated_text: String,
    #[serde(rename = "AUDIO", default)]
    audio: Option<String>,
}

impl From<RawDua> for Dua {
    fn from(raw: RawDua) -> Self {
        let id = match raw.id {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Self {
            id,
            arabic: raw.arabic_text,
            translation: raw.translated_text,
            audio_url: raw.audio.filter(|url| !url.trim().is_empty()),
        }
    }
}

impl DuaCategory {
    /// Parse a Hisnul Muslim collection (`{"English": [{"TITLE", "TEXT": [...]}]}`)
    ///
    /// A category whose `TEXT` is missing or not an array yields an empty list.
    pub fn parse_collection(json: &str) -> Result<Vec<DuaCategory>> {
        let raw: RawCollection = serde_json::from_str(json)?;

        raw.english
            .into_iter()
            .map(|cat| {
                let duas = match cat.text {
                    Value::Array(items) => items
                        .into_iter()
                        .map(|item| serde_json::from_value::<RawDua>(item).map(Dua::from))
                        .collect::<std::result::Result<Vec<_>, _>>()?,
                    _ => Vec::new(),
                };
                Ok(DuaCategory {
                    name: cat.title,
                    duas,
                })
            })
            .collect()
    }

    /// Categories whose title, or any of whose translations, contain `query` (case-insensitive)
    pub fn search<'a>(categories: &'a [DuaCategory], query: &str) -> Vec<&'a DuaCategory> {
        let term = query.trim().to_lowercase();
        categories
            .iter()
            .filter(|c| {
                term.is_empty()
                    || c.name.to_lowercase().contains(&term)
                    || c.duas
                        .iter()
                        .any(|d| d.translation.to_lowercase().contains(&term))
            })
            .collect()
    }
}
