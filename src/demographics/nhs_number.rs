//! NHS number standardisation and modulus-11 validation.

/// Standardises and validates an NHS number.
///
/// Strips whitespace, then requires exactly 10 digits whose 10th digit
/// matches the modulus-11 check over the first 9. Returns the standardised
/// number, or `None` if invalid.
pub fn clean_nhs_number(nhs_number: &str) -> Option<String> {
    let cleaned: String = nhs_number.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.len() != 10 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits: Vec<u32> = cleaned.chars().filter_map(|c| c.to_digit(10)).collect();

    // Weighted sum of the first 9 digits, weights 10 down to 2.
    let total: u32 = digits[..9]
        .iter()
        .enumerate()
        .map(|(i, d)| d * (10 - i as u32))
        .sum();

    let remainder = total % 11;
    let check_digit = match 11 - remainder {
        11 => 0,
        // A computed check digit of 10 means the number can never be valid.
        10 => return None,
        d => d,
    };

    if check_digit != digits[9] {
        return None;
    }

    Some(cleaned)
}

/// Returns true if the NHS number passes the modulus-11 check after
/// standardisation.
pub fn is_valid_nhs_number(nhs_number: &str) -> bool {
    clean_nhs_number(nhs_number).is_some()
}
