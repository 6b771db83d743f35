//! Strict single-record validation for the linking entry point.
//!
//! Unlike the lenient bulk cleaners, this policy raises on the first
//! invalid field with a descriptive message, and additionally requires a
//! minimum-information threshold before a record may be linked.

use crate::error::ValidationError;
use crate::types::DemographicQuery;

use super::{clean_date_of_birth, is_valid_nhs_number, is_valid_postcode};

/// Validates a single record for patient linking.
///
/// Every present field must be individually valid, and the record must meet
/// the minimum-information threshold: (NHS number AND date of birth) OR
/// (given name AND family name AND sex AND postcode AND date of birth).
/// Absent fields are valid in themselves; only the threshold constrains
/// which combinations suffice.
pub fn validate_for_linking(query: &DemographicQuery) -> Result<(), ValidationError> {
    if let Some(nhs_number) = &query.nhs_number
        && !is_valid_nhs_number(nhs_number)
    {
        return Err(ValidationError::InvalidNhsNumber {
            value: nhs_number.clone(),
        });
    }

    if let Some(postcode) = &query.postcode
        && !is_valid_postcode(postcode)
    {
        return Err(ValidationError::InvalidPostcode {
            value: postcode.clone(),
        });
    }

    if let Some(given_name) = &query.given_name
        && given_name.trim().is_empty()
    {
        return Err(ValidationError::EmptyName {
            field: "given_name",
        });
    }

    if let Some(family_name) = &query.family_name
        && family_name.trim().is_empty()
    {
        return Err(ValidationError::EmptyName {
            field: "family_name",
        });
    }

    if let Some(dob) = query.date_of_birth
        && clean_date_of_birth(dob).is_none()
    {
        return Err(ValidationError::DateOfBirthInFuture { value: dob });
    }

    let has_nhs_and_dob = query.nhs_number.is_some() && query.date_of_birth.is_some();
    let has_full_demographics = query.given_name.is_some()
        && query.family_name.is_some()
        && query.sex.is_some()
        && query.date_of_birth.is_some()
        && query.postcode.is_some();

    if !has_nhs_and_dob && !has_full_demographics {
        return Err(ValidationError::InsufficientDemographics);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate, Utc};

    fn minimal_query() -> DemographicQuery {
        DemographicQuery {
            nhs_number: Some("9434765919".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 5, 15),
            ..Default::default()
        }
    }

    #[test]
    fn test_nhs_and_dob_suffice() {
        assert!(validate_for_linking(&minimal_query()).is_ok());
    }

    #[test]
    fn test_full_demographics_suffice() {
        let query = DemographicQuery {
            given_name: Some("Alice".to_string()),
            family_name: Some("Johnson".to_string()),
            sex: Some("female".to_string()),
            postcode: Some("M1 2AB".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1992, 4, 18),
            ..Default::default()
        };
        assert!(validate_for_linking(&query).is_ok());
    }

    #[test]
    fn test_invalid_nhs_number_rejected_first() {
        let mut query = minimal_query();
        query.nhs_number = Some("9434765910".to_string());
        assert_eq!(
            validate_for_linking(&query),
            Err(ValidationError::InvalidNhsNumber {
                value: "9434765910".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_postcode_rejected() {
        let mut query = minimal_query();
        query.postcode = Some("XYZ".to_string());
        assert!(matches!(
            validate_for_linking(&query),
            Err(ValidationError::InvalidPostcode { .. })
        ));
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let mut query = minimal_query();
        query.given_name = Some("   ".to_string());
        assert_eq!(
            validate_for_linking(&query),
            Err(ValidationError::EmptyName {
                field: "given_name"
            })
        );
    }

    #[test]
    fn test_future_dob_rejected() {
        let mut query = minimal_query();
        let tomorrow = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(1))
            .unwrap();
        query.date_of_birth = Some(tomorrow);
        assert!(matches!(
            validate_for_linking(&query),
            Err(ValidationError::DateOfBirthInFuture { .. })
        ));
    }

    #[test]
    fn test_insufficient_data_rejected() {
        let query = DemographicQuery {
            nhs_number: Some("9434765919".to_string()),
            ..Default::default()
        };
        assert_eq!(
            validate_for_linking(&query),
            Err(ValidationError::InsufficientDemographics)
        );
    }
}
