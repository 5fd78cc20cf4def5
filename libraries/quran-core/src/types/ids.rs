/// Identifier types for surahs, verses and mushaf pages
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{QuranError, Result};
use crate::tables::{MUSHAF_PAGE_COUNT, SURAH_COUNT, SURAH_START_PAGES, VERSE_COUNTS};

/// Surah (chapter) number, always in `1..=114`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct SurahNumber(u16);

impl SurahNumber {
    /// Al-Fatihah, the opening surah
    pub const FIRST: Self = Self(1);

    /// An-Nas, the last surah
    pub const LAST: Self = Self(SURAH_COUNT);

    /// At-Tawbah, the only surah recited without a Bismillah
    pub const AT_TAWBAH: Self = Self(9);

    /// Create a surah number, validating the range
    pub fn new(number: u16) -> Result<Self> {
        if (1..=SURAH_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(QuranError::invalid_input(format!(
                "surah number {} is outside 1..={}",
                number, SURAH_COUNT
            )))
        }
    }

    /// Get the inner number
    pub fn get(self) -> u16 {
        self.0
    }

    /// Number of verses in this surah
    pub fn verse_count(self) -> u16 {
        VERSE_COUNTS[usize::from(self.0 - 1)]
    }

    /// Mushaf page on which this surah starts
    pub fn start_page(self) -> PageNumber {
        PageNumber(SURAH_START_PAGES[usize::from(self.0 - 1)])
    }

    /// Next surah, wrapping 114 to 1
    pub fn next(self) -> Self {
        if self.0 == SURAH_COUNT {
            Self::FIRST
        } else {
            Self(self.0 + 1)
        }
    }

    /// Previous surah, wrapping 1 to 114
    pub fn previous(self) -> Self {
        if self.0 == 1 {
            Self::LAST
        } else {
            Self(self.0 - 1)
        }
    }

    /// Whether recitation of this surah is conventionally preceded by a Bismillah
    /// that is not itself part of verse numbering.
    ///
    /// False for Al-Fatihah (where it is verse 1) and At-Tawbah (where it is omitted).
    pub fn has_bismillah_prefix(self) -> bool {
        self != Self::FIRST && self != Self::AT_TAWBAH
    }

    /// Check whether a verse number exists in this surah
    pub fn contains(self, verse: VerseNumber) -> bool {
        verse.0 <= self.verse_count()
    }
}

impl TryFrom<u16> for SurahNumber {
    type Error = QuranError;

    fn try_from(value: u16) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SurahNumber> for u16 {
    fn from(value: SurahNumber) -> Self {
        value.0
    }
}

impl fmt::Display for SurahNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Verse (ayah) number within a surah, always `>= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct VerseNumber(u16);

impl VerseNumber {
    /// The first verse of any surah
    pub const FIRST: Self = Self(1);

    /// Create a verse number (must be at least 1)
    pub fn new(number: u16) -> Result<Self> {
        if number >= 1 {
            Ok(Self(number))
        } else {
            Err(QuranError::invalid_input("verse numbers start at 1"))
        }
    }

    /// Get the inner number
    pub fn get(self) -> u16 {
        self.0
    }

    /// The following verse number
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// The preceding verse number, `None` for verse 1
    pub fn previous(self) -> Option<Self> {
        (self.0 > 1).then(|| Self(self.0 - 1))
    }

    /// Zero-based index of this verse within its surah
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Verse number from a zero-based index
    pub fn from_index(index: usize) -> Result<Self> {
        index
            .checked_add(1)
            .and_then(|n| u16::try_from(n).ok())
            .map(Self)
            .ok_or_else(|| QuranError::invalid_input(format!("verse index {} too large", index)))
    }
}

impl TryFrom<u16> for VerseNumber {
    type Error = QuranError;

    fn try_from(value: u16) -> Result<Self> {
        Self::new(value)
    }
}

impl From<VerseNumber> for u16 {
    fn from(value: VerseNumber) -> Self {
        value.0
    }
}

impl fmt::Display for VerseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Page of the printed mushaf, always in `1..=604`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct PageNumber(u16);

impl PageNumber {
    /// Create a page number, validating the range
    pub fn new(number: u16) -> Result<Self> {
        if (1..=MUSHAF_PAGE_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(QuranError::invalid_input(format!(
                "page number {} is outside 1..={}",
                number, MUSHAF_PAGE_COUNT
            )))
        }
    }

    /// Get the inner number
    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for PageNumber {
    type Error = QuranError;

    fn try_from(value: u16) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PageNumber> for u16 {
    fn from(value: PageNumber) -> Self {
        value.0
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A verse address: surah plus verse number (rendered as `surah:verse`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerseRef {
    /// Surah number
    pub surah: SurahNumber,
    /// Verse number within the surah
    pub verse: VerseNumber,
}

impl VerseRef {
    /// Create a verse reference, checking the verse exists in the surah
    pub fn new(surah: SurahNumber, verse: VerseNumber) -> Result<Self> {
        if surah.contains(verse) {
            Ok(Self { surah, verse })
        } else {
            Err(QuranError::invalid_input(format!(
                "surah {} has only {} verses (got {})",
                surah,
                surah.verse_count(),
                verse
            )))
        }
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah, self.verse)
    }
}

impl FromStr for VerseRef {
    type Err = QuranError;

    /// Parse `surah:verse` (e.g. `2:255`)
    fn from_str(s: &str) -> Result<Self> {
        let (surah, verse) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| QuranError::invalid_input(format!("expected surah:verse, got {}", s)))?;

        let number = |part: &str| {
            part.trim()
                .parse::<u16>()
                .map_err(|_| QuranError::invalid_input(format!("not a number: {}", part)))
        };

        Self::new(
            SurahNumber::new(number(surah)?)?,
            VerseNumber::new(number(verse)?)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surah_number_validation() {
        assert!(SurahNumber::new(0).is_err());
        assert!(SurahNumber::new(1).is_ok());
        assert!(SurahNumber::new(114).is_ok());
        assert!(SurahNumber::new(115).is_err());
    }

    #[test]
    fn surah_navigation_wraps() {
        assert_eq!(SurahNumber::LAST.next(), SurahNumber::FIRST);
        assert_eq!(SurahNumber::FIRST.previous(), SurahNumber::LAST);
        assert_eq!(SurahNumber::new(2).unwrap().next().get(), 3);
        assert_eq!(SurahNumber::new(2).unwrap().previous().get(), 1);
    }

    #[test]
    fn bismillah_prefix_excludes_fatihah_and_tawbah() {
        assert!(!SurahNumber::new(1).unwrap().has_bismillah_prefix());
        assert!(!SurahNumber::new(9).unwrap().has_bismillah_prefix());
        assert!(SurahNumber::new(2).unwrap().has_bismillah_prefix());
        assert!(SurahNumber::new(114).unwrap().has_bismillah_prefix());
    }

    #[test]
    fn verse_ref_bounds() {
        let fatihah = SurahNumber::FIRST;
        assert!(VerseRef::new(fatihah, VerseNumber::new(7).unwrap()).is_ok());
        assert!(VerseRef::new(fatihah, VerseNumber::new(8).unwrap()).is_err());
        assert_eq!(
            VerseRef::new(SurahNumber::new(2).unwrap(), VerseNumber::new(255).unwrap())
                .unwrap()
                .to_string(),
            "2:255"
        );
    }

    #[test]
    fn verse_stepping() {
        assert_eq!(VerseNumber::FIRST.previous(), None);
        assert_eq!(VerseNumber::FIRST.next().unwrap().get(), 2);
        assert_eq!(VerseNumber::new(2).unwrap().previous(), Some(VerseNumber::FIRST));
        assert_eq!(VerseNumber::new(u16::MAX).unwrap().next(), None);
    }

    #[test]
    fn verse_ref_parsing() {
        let verse: VerseRef = "2:255".parse().unwrap();
        assert_eq!(verse.surah.get(), 2);
        assert_eq!(verse.verse.get(), 255);
        assert_eq!(" 112 : 4 ".parse::<VerseRef>().unwrap().to_string(), "112:4");

        assert!("2".parse::<VerseRef>().is_err());
        assert!("2:x".parse::<VerseRef>().is_err());
        assert!("1:8".parse::<VerseRef>().is_err());
        assert!("115:1".parse::<VerseRef>().is_err());
    }

    #[test]
    fn serde_rejects_out_of_range() {
        let ok: SurahNumber = serde_json::from_str("18").unwrap();
        assert_eq!(ok.get(), 18);
        assert!(serde_json::from_str::<SurahNumber>("0").is_err());
        assert!(serde_json::from_str::<PageNumber>("605").is_err());
        assert!(serde_json::from_str::<VerseNumber>("0").is_err());
    }

    #[test]
    fn start_page_lookup() {
        assert_eq!(SurahNumber::new(2).unwrap().start_page().get(), 2);
        assert_eq!(SurahNumber::new(18).unwrap().start_page().get(), 293);
        assert_eq!(SurahNumber::LAST.start_page().get(), 604);
    }
}
