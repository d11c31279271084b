//! Worksheet name derivation

use htmlentity::entity::{decode, ICodedDataTrait};
use log::warn;
use sheetmark_core::MAX_SHEET_NAME_LEN;
use unicode_normalization::UnicodeNormalization;

use crate::dom::trim_markup;

/// Characters spreadsheet applications refuse in sheet names
const FORBIDDEN: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];

/// Name used when nothing is left after cleaning
pub const FALLBACK_SHEET_NAME: &str = "Sheet";

/// Turn a `data-xls-sheet` value into a valid sheet name
///
/// Entities are decoded, the text is NFC-normalized, forbidden characters are
/// dropped and the result is trimmed and cut to 31 code points.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let decoded = match decode(raw.as_bytes()).to_string() {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("Failed to decode entities in sheet name '{}': {}", raw, e);
            raw.to_string()
        }
    };

    let cleaned: String = decoded
        .nfc()
        .filter(|c| !FORBIDDEN.contains(c))
        .collect();

    let trimmed = trim_markup(&cleaned);
    let name = if trimmed.is_empty() {
        FALLBACK_SHEET_NAME
    } else {
        trimmed
    };

    name.chars().take(MAX_SHEET_NAME_LEN).collect()
}

/// Make `name` unique among `existing` by appending ` (2)`, ` (3)`, ...
///
/// The suffix is kept inside the 31 code point limit.
pub fn dedupe_sheet_name<'a, I>(name: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<String> = existing.into_iter().map(str::to_lowercase).collect();
    let is_taken = |candidate: &str| taken.contains(&candidate.to_lowercase());

    if !is_taken(name) {
        return name.to_string();
    }

    let mut n = 2;
    loop {
        let suffix = format!(" ({n})");
        let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
        let base: String = name.chars().take(keep).collect();
        let candidate = format!("{}{}", base.trim_end(), suffix);
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_forbidden_characters_removed() {
        assert_eq!(sanitize_sheet_name("Sales: Q1/Q2 [draft]?*"), "Sales Q1Q2 draft");
        assert_eq!(sanitize_sheet_name("a\\b"), "ab");
    }

    #[test]
    fn test_truncated_to_31_code_points() {
        let name = sanitize_sheet_name(&"é".repeat(40));
        assert_eq!(name.chars().count(), 31);

        let name = sanitize_sheet_name("This is a very long sheet name that exceeds limit");
        assert_eq!(name, "This is a very long sheet name ");
    }

    #[test]
    fn test_fallback_name() {
        assert_eq!(sanitize_sheet_name(""), "Sheet");
        assert_eq!(sanitize_sheet_name("  "), "Sheet");
        assert_eq!(sanitize_sheet_name("[]:?"), "Sheet");
    }

    #[test]
    fn test_entities_and_normalization() {
        assert_eq!(sanitize_sheet_name("R&amp;D"), "R&D");
        assert_eq!(sanitize_sheet_name("Caf&eacute;"), "Café");
        // e + combining acute composes to a single code point
        assert_eq!(sanitize_sheet_name("Cafe\u{0301}"), "Caf\u{00E9}");
    }

    #[test]
    fn test_trim() {
        assert_eq!(sanitize_sheet_name("  Data \t\n"), "Data");
    }

    #[test]
    fn test_dedupe() {
        assert_eq!(dedupe_sheet_name("Data", ["Other"]), "Data");
        assert_eq!(dedupe_sheet_name("Data", ["data"]), "Data (2)");
        assert_eq!(dedupe_sheet_name("Data", ["Data", "Data (2)"]), "Data (3)");

        let long = "x".repeat(31);
        let deduped = dedupe_sheet_name(&long, [long.as_str()]);
        assert_eq!(deduped.chars().count(), 31);
        assert!(deduped.ends_with(" (2)"));
    }
}
