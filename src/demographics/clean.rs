//! Lenient cleaners for names, sex codes, and dates of birth.

use chrono::{NaiveDate, Utc};

/// Standardises a name: trims, then title-cases each word and hyphenated
/// segment. Empty or whitespace-only input becomes `None`.
pub fn clean_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Capitalise any letter that follows a non-letter, lowercase the rest.
    // This preserves multi-word and hyphenated segments (e.g. "anne-marie
    // o'brien" becomes "Anne-Marie O'Brien").
    let mut standardised = String::with_capacity(trimmed.len());
    let mut at_segment_start = true;
    for c in trimmed.chars() {
        if c.is_alphabetic() {
            if at_segment_start {
                standardised.extend(c.to_uppercase());
            } else {
                standardised.extend(c.to_lowercase());
            }
            at_segment_start = false;
        } else {
            standardised.push(c);
            at_segment_start = true;
        }
    }
    Some(standardised)
}

/// Standardises a sex code: trims and lowercases. Empty input becomes
/// `None`. Free-text pass-through otherwise.
pub fn clean_sex(sex: &str) -> Option<String> {
    let trimmed = sex.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Validates a date of birth: any date strictly after today is invalid.
pub fn clean_date_of_birth(dob: NaiveDate) -> Option<NaiveDate> {
    if dob > Utc::now().date_naive() {
        return None;
    }
    Some(dob)
}
