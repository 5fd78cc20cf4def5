use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Translation edition shown alongside the Arabic text
///
/// Codes not in the built-in menu are carried through as [`Translation::Other`]
/// so any edition the API supports can still be requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Translation {
    /// Saheeh International
    #[default]
    EnglishSahih,
    /// Muhiuddin Khan
    Bengali,
    /// Fateh Muhammad Jalandhry
    UrduJalandhry,
    /// Muhammad Hamidullah
    FrenchHamidullah,
    /// Abu Rida Muhammad ibn Ahmad ibn Rassoul
    GermanAburida,
    /// Diyanet Isleri
    TurkishDiyanet,
    /// Muntakhab
    IndonesianMuntakhab,
    /// Abdullah Muhammad Basmeih
    MalayBasmeih,
    /// Suhel Farooq Khan and Saifur Rahman Nadwi
    Hindi,
    /// Jan Turst Foundation
    Tamil,
    /// Elmir Kuliev
    RussianKuliev,
    /// Ma Jian
    ChineseJian,
    /// Julio Cortes
    SpanishCortes,
    /// Samir El-Hayek
    PortugueseElhayek,
    /// Mahdi Elahi Ghomshei
    PersianGhomshei,
    /// Any other edition code
    Other(String),
}

impl Translation {
    /// Built-in translation menu
    pub const BUILT_IN: [Translation; 15] = [
        Translation::EnglishSahih,
        Translation::Bengali,
        Translation::UrduJalandhry,
        Translation::FrenchHamidullah,
        Translation::GermanAburida,
        Translation::TurkishDiyanet,
        Translation::IndonesianMuntakhab,
        Translation::MalayBasmeih,
        Translation::Hindi,
        Translation::Tamil,
        Translation::RussianKuliev,
        Translation::ChineseJian,
        Translation::SpanishCortes,
        Translation::PortugueseElhayek,
        Translation::PersianGhomshei,
    ];

    /// Edition code (e.g. `en.sahih`)
    pub fn code(&self) -> &str {
        match self {
            Translation::EnglishSahih => "en.sahih",
            Translation::Bengali => "bn.bengali",
            Translation::UrduJalandhry => "ur.jalandhry",
            Translation::FrenchHamidullah => "fr.hamidullah",
            Translation::GermanAburida => "de.aburida",
            Translation::TurkishDiyanet => "tr.diyanet",
            Translation::IndonesianMuntakhab => "id.muntakhab",
            Translation::MalayBasmeih => "ms.basmeih",
            Translation::Hindi => "hi.hindi",
            Translation::Tamil => "ta.tamil",
            Translation::RussianKuliev => "ru.kuliev",
            Translation::ChineseJian => "zh.jian",
            Translation::SpanishCortes => "es.cortes",
            Translation::PortugueseElhayek => "pt.elhayek",
            Translation::PersianGhomshei => "fa.ghomshei",
            Translation::Other(code) => code,
        }
    }

    /// Menu label
    pub fn display_name(&self) -> &str {
        match self {
            Translation::EnglishSahih => "English",
            Translation::Bengali => "Bengali",
            Translation::UrduJalandhry => "Urdu",
            Translation::FrenchHamidullah => "French",
            Translation::GermanAburida => "German",
            Translation::TurkishDiyanet => "Turkish",
            Translation::IndonesianMuntakhab => "Indonesian",
            Translation::MalayBasmeih => "Malay",
            Translation::Hindi => "Hindi",
            Translation::Tamil => "Tamil",
            Translation::RussianKuliev => "Russian",
            Translation::ChineseJian => "Chinese",
            Translation::SpanishCortes => "Spanish",
            Translation::PortugueseElhayek => "Portuguese",
            Translation::PersianGhomshei => "Persian",
            Translation::Other(code) => code,
        }
    }

    /// Parse an edition code, falling back to [`Translation::Other`]
    pub fn from_code(code: &str) -> Self {
        let code = code.trim();
        Self::BUILT_IN
            .iter()
            .find(|t| t.code().eq_ignore_ascii_case(code))
            .cloned()
            .unwrap_or_else(|| Translation::Other(code.to_string()))
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Translation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl From<String> for Translation {
    fn from(value: String) -> Self {
        Self::from_code(&value)
    }
}

impl From<Translation> for String {
    fn from(value: Translation) -> Self {
        value.code().to_string()
    }
}
