use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{QuranError, Result};

/// How a reciter's per-verse audio URL is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlStrategy {
    /// Use the `audio` field returned by the recitation edition endpoint
    DirectFromApi,

    /// Build `{base}/{surah}{verse}.mp3` with both numbers zero-padded to `zero_pad` digits
    ComputedFromCdnTemplate {
        /// Base URL without trailing slash
        base: &'static str,
        /// Digits per number (3 for `002255.mp3`)
        zero_pad: usize,
    },
}

impl UrlStrategy {
    /// Build the CDN file URL for a verse, if this strategy computes URLs locally
    pub fn compute(self, surah: u16, verse: u16) -> Option<String> {
        match self {
            Self::DirectFromApi => None,
            Self::ComputedFromCdnTemplate { base, zero_pad } => Some(cdn_file_url(
                base, zero_pad, surah, verse,
            )),
        }
    }
}

/// `{base}/{surah:0pad}{verse:0pad}.mp3`
pub(crate) fn cdn_file_url(base: &str, zero_pad: usize, surah: u16, verse: u16) -> String {
    format!(
        "{}/{:0width$}{:0width$}.mp3",
        base.trim_end_matches('/'),
        surah,
        verse,
        width = zero_pad
    )
}

/// Selectable reciters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Reciter {
    /// Mishary Rashid Alafasy
    #[default]
    Alafasy,
    /// Mohamed Siddiq al-Minshawi
    Minshawi,
    /// Mahmoud Khalil Al-Hussary
    Husary,
    /// Abdul Basit Abdus-Samad (murattal)
    AbdulBasitMurattal,
    /// Saood ash-Shuraym
    SaoodShuraym,
    /// Abdullah Basfar
    AbdullahBasfar,
    /// Abdul Samad
    AbdulSamad,
    /// Abu Bakr Ash-Shaatree
    Shaatree,
    /// Ahmed ibn Ali al-Ajamy
    AhmedAjamy,
    /// Hani Rifai
    HaniRifai,
    /// Ibrahim Akhdar
    IbrahimAkhdar,
    /// Maher al-Muaiqly
    MaherMuaiqly,
    /// Muhammad Ayyoub
    MuhammadAyyoub,
    /// Muhammad Jibreel
    MuhammadJibreel,
    /// Abdur-Rahman as-Sudais (CDN-hosted, not exposed by the edition endpoint)
    Sudais,
}

const VERSE_CDN: &str = "https://verses.quran.com";

impl Reciter {
    /// Every selectable reciter, in menu order
    pub const ALL: [Reciter; 15] = [
        Reciter::Alafasy,
        Reciter::Minshawi,
        Reciter::Husary,
        Reciter::AbdulBasitMurattal,
        Reciter::SaoodShuraym,
        Reciter::AbdullahBasfar,
        Reciter::AbdulSamad,
        Reciter::Shaatree,
        Reciter::AhmedAjamy,
        Reciter::HaniRifai,
        Reciter::IbrahimAkhdar,
        Reciter::MaherMuaiqly,
        Reciter::MuhammadAyyoub,
        Reciter::MuhammadJibreel,
        Reciter::Sudais,
    ];

    /// Edition code used by the recitation API (e.g. `ar.alafasy`)
    pub fn code(self) -> &'static str {
        match self {
            Reciter::Alafasy => "ar.alafasy",
            Reciter::Minshawi => "ar.minshawi",
            Reciter::Husary => "ar.husary",
            Reciter::AbdulBasitMurattal => "ar.abdulbasitmurattal",
            Reciter::SaoodShuraym => "ar.saoodshuraym",
            Reciter::AbdullahBasfar => "ar.abdullahbasfar",
            Reciter::AbdulSamad => "ar.abdulsamad",
            Reciter::Shaatree => "ar.shaatree",
            Reciter::AhmedAjamy => "ar.ahmedajamy",
            Reciter::HaniRifai => "ar.hanirifai",
            Reciter::IbrahimAkhdar => "ar.ibrahimakhbar",
            Reciter::MaherMuaiqly => "ar.mahermuaiqly",
            Reciter::MuhammadAyyoub => "ar.muhammadayyoub",
            Reciter::MuhammadJibreel => "ar.muhammadjibreel",
            Reciter::Sudais => "ar.sudais",
        }
    }

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            Reciter::Alafasy => "Mishary Alafasy",
            Reciter::Minshawi => "Al-Minshawi",
            Reciter::Husary => "Mahmoud Al-Hussary",
            Reciter::AbdulBasitMurattal => "Abdul Basit",
            Reciter::SaoodShuraym => "Saood Shuraym",
            Reciter::AbdullahBasfar => "Abdullah Basfar",
            Reciter::AbdulSamad => "Abdul Samad",
            Reciter::Shaatree => "Abu Bakr Ash-Shaatree",
            Reciter::AhmedAjamy => "Ahmed ibn Ali al-Ajamy",
            Reciter::HaniRifai => "Hani Rifai",
            Reciter::IbrahimAkhdar => "Ibrahim Akhdar",
            Reciter::MaherMuaiqly => "Maher al-Muaiqly",
            Reciter::MuhammadAyyoub => "Muhammad Ayyoub",
            Reciter::MuhammadJibreel => "Muhammad Jibreel",
            Reciter::Sudais => "Abdur-Rahman as-Sudais",
        }
    }

    /// Folder of this reciter on the per-verse CDN
    fn cdn_folder(self) -> &'static str {
        match self {
            Reciter::Alafasy => "Alafasy",
            Reciter::Minshawi => "Minshawy",
            Reciter::Husary => "Husary",
            Reciter::AbdulBasitMurattal => "AbdulBasetMurattal",
            Reciter::SaoodShuraym => "Shuraym",
            Reciter::AbdullahBasfar => "Basfar",
            Reciter::AbdulSamad => "AbdulSamad",
            Reciter::Shaatree => "Shaatree",
            Reciter::AhmedAjamy => "AhmedIbnAliAlAjami",
            Reciter::HaniRifai => "HaniRifai",
            Reciter::IbrahimAkhdar => "IbrahimAkhdar",
            Reciter::MaherMuaiqly => "MaherAlMuaiqly",
            Reciter::MuhammadAyyoub => "MuhammadAyyoub",
            Reciter::MuhammadJibreel => "MuhammadJibreel",
            Reciter::Sudais => "Sudais",
        }
    }

    /// How verse audio URLs are obtained for this reciter
    pub fn url_strategy(self) -> UrlStrategy {
        match self {
            Reciter::Sudais => UrlStrategy::ComputedFromCdnTemplate {
                base: "https://verses.quran.com/Sudais/mp3",
                zero_pad: 3,
            },
            _ => UrlStrategy::DirectFromApi,
        }
    }

    /// URL of the standalone opening Bismillah clip, if one is known for this reciter
    ///
    /// The clip is verse 1:1 from the reciter's CDN folder. Only folders whose
    /// 1:1 file is a clean standalone Bismillah are listed.
    pub fn bismillah_url(self) -> Option<String> {
        match self {
            Reciter::Alafasy | Reciter::Sudais => Some(cdn_file_url(
                &format!("{}/{}/mp3", VERSE_CDN, self.cdn_folder()),
                3,
                1,
                1,
            )),
            _ => None,
        }
    }

    /// Parse an edition code (e.g. `ar.husary`)
    pub fn from_code(code: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.code().eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| QuranError::invalid_input(format!("unknown reciter: {}", code)))
    }
}

impl fmt::Display for Reciter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Reciter {
    type Err = QuranError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

impl TryFrom<String> for Reciter {
    type Error = QuranError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_code(&value)
    }
}

impl From<Reciter> for String {
    fn from(value: Reciter) -> Self {
        value.code().to_string()
    }
}
