//! UK postcode standardisation and validation.

use std::sync::LazyLock;

use regex::Regex;

/// Canonical UK postcode shape: outward code (area + district), one space,
/// inward code (sector + unit).
static UK_POSTCODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{1,2}\d{1,2}[A-Z]?) (\d[A-Z]{2})$").unwrap()
});

/// Standardises and validates a UK postcode.
///
/// Uppercases, strips all internal spacing, re-inserts the single space
/// before the final three characters, and checks the canonical
/// outward+inward shape. Returns the `AA9 9AA`-format postcode, or `None`
/// if invalid.
pub fn clean_postcode(postcode: &str) -> Option<String> {
    let compact: String = postcode
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    // The canonical shape is ASCII-only; rejecting here also keeps the
    // inward-code split on a character boundary.
    if !compact.is_ascii() || compact.len() < 5 {
        return None;
    }

    let (outward, inward) = compact.split_at(compact.len() - 3);
    let formatted = format!("{outward} {inward}");

    UK_POSTCODE_PATTERN.is_match(&formatted).then_some(formatted)
}

/// Returns true if the postcode matches the canonical UK shape, ignoring
/// case and internal spacing.
pub fn is_valid_postcode(postcode: &str) -> bool {
    clean_postcode(postcode).is_some()
}
