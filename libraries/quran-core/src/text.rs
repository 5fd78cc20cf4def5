//! Arabic text helpers
//!
//! The API returns verse 1 of most surahs with the Basmalah prepended. Readers
//! show the Basmalah as a separate header, so it is stripped from the verse.
//! Matching works on the consonantal skeleton of the phrase and tolerates the
//! diacritic, tatweel, whitespace and alef-wasla variations seen across
//! editions (`quran-uthmani`, `quran-simple`, page editions).

use crate::types::{SurahNumber, VerseNumber};

/// Letters of "بسم الله الرحمن الرحيم" with marks and spaces removed
const BASMALAH_SKELETON: &str = "بسماللهالرحمنالرحيم";

/// Marks that carry no letter: harakat, Quranic annotation signs, tatweel, direction marks
fn is_mark(c: char) -> bool {
    matches!(c,
        '\u{064B}'..='\u{065F}'
        | '\u{0670}'
        | '\u{06D6}'..='\u{06ED}'
        | '\u{0640}'
        | '\u{200C}'..='\u{200F}'
    )
}

fn is_skippable(c: char) -> bool {
    is_mark(c) || c.is_whitespace()
}

/// Fold letter variants that different editions use interchangeably
fn fold_letter(c: char) -> char {
    match c {
        '\u{0671}' | '\u{0622}' | '\u{0623}' | '\u{0625}' => '\u{0627}',
        '\u{0649}' => '\u{064A}',
        other => other,
    }
}

/// Remove a leading Basmalah from `text`
///
/// Returns the remainder with leading whitespace, marks and commas trimmed.
/// Text that does not start with the Basmalah is returned trimmed but otherwise
/// unchanged.
pub fn strip_leading_basmalah(text: &str) -> &str {
    let text = text.trim();
    let mut chars = text.char_indices().peekable();

    for expected in BASMALAH_SKELETON.chars() {
        while chars.peek().is_some_and(|&(_, c)| is_skippable(c)) {
            chars.next();
        }
        match chars.next() {
            Some((_, c)) if fold_letter(c) == expected => {}
            _ => return text,
        }
    }

    // Marks on the final letter still belong to the Basmalah
    while chars.peek().is_some_and(|&(_, c)| is_mark(c)) {
        chars.next();
    }

    let rest = match chars.peek() {
        None => return "",
        Some(&(idx, c)) if c.is_whitespace() || c == ',' || c == '\u{060C}' => &text[idx..],
        // The skeleton matched the start of a longer word
        Some(_) => return text,
    };

    rest.trim_start_matches(|c: char| is_skippable(c) || c == ',' || c == '\u{060C}')
}

/// Arabic text of a verse as displayed under a separate Basmalah header
///
/// Only verse 1 of surahs that carry a Basmalah prefix is stripped. In
/// Al-Fatihah the Basmalah is verse 1 itself, and At-Tawbah has none.
pub fn verse_display_text(surah: SurahNumber, verse: VerseNumber, text: &str) -> &str {
    if verse == VerseNumber::FIRST && surah.has_bismillah_prefix() {
        strip_leading_basmalah(text)
    } else {
        text.trim()
    }
}
