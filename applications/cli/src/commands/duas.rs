/// Hisnul Muslim supplications
use std::io::Write;
use std::path::Path;

use quran_core::{DuaCategory, QuranError};
use tracing::debug;

use crate::error::Result;

/// Load the collection file
pub fn load_collection(path: &Path) -> Result<Vec<DuaCategory>> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        QuranError::not_found("supplication collection", format!("{} ({})", path.display(), e))
    })?;
    let categories = DuaCategory::parse_collection(&json)?;
    debug!(path = %path.display(), categories = categories.len(), "Loaded supplications");
    Ok(categories)
}

/// Print category titles matching `query`, or every dua of the category numbered `category`
///
/// Categories are numbered from 1 in collection order.
pub fn run<W: Write>(
    categories: &[DuaCategory],
    query: &str,
    category: Option<usize>,
    out: &mut W,
) -> Result<()> {
    if let Some(index) = category {
        let chosen = index
            .checked_sub(1)
            .and_then(|i| categories.get(i))
            .ok_or_else(|| {
                QuranError::not_found("supplication category", index.to_string())
            })?;
        return write_category(out, chosen);
    }

    let matched = DuaCategory::search(categories, query);
    if matched.is_empty() {
        writeln!(out, "No supplication matches \"{}\"", query.trim())?;
        return Ok(());
    }

    for (number, cat) in categories.iter().enumerate() {
        if matched.iter().any(|m| std::ptr::eq(*m, cat)) {
            writeln!(out, "{:>3}. {} ({})", number + 1, cat.name, cat.duas.len())?;
        }
    }
    Ok(())
}

fn write_category<W: Write>(out: &mut W, category: &DuaCategory) -> Result<()> {
    writeln!(out, "{}", category.name)?;
    if category.duas.is_empty() {
        writeln!(out, "  (no entries)")?;
    }
    for dua in &category.duas {
        writeln!(out)?;
        writeln!(out, "#{}", dua.id)?;
        writeln!(out, "{}", dua.arabic.trim())?;
        writeln!(out, "{}", dua.translation.trim())?;
        if let Some(url) = &dua.audio_url {
            writeln!(out, "Audio: {}", url)?;
        }
    }
    Ok(())
}
