//! Patient record and demographic query types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::demographics;

/// A patient row as persisted in the `patient` table.
///
/// The surrogate `id` is assigned by the store on insert and is immutable.
/// Records created via zero-match resolution always carry `verified = false`
/// until the external trace-confirmation loop verifies them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    /// Store-assigned surrogate identifier.
    pub id: i64,
    /// 10-digit NHS number, if known and valid.
    pub nhs_number: Option<String>,
    /// Given (first) name.
    pub given_name: Option<String>,
    /// Family (last) name.
    pub family_name: Option<String>,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Canonical-format UK postcode.
    pub postcode: Option<String>,
    /// Free-text sex code, lower-cased.
    pub sex: Option<String>,
    /// Whether the record has been confirmed against an authoritative source.
    pub verified: bool,
    /// When the record was inserted.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl PatientRecord {
    /// Returns true if this record has enough fields for a trace request:
    /// NHS number + date of birth, or the full fallback quintuple
    /// (family name, given name, sex, postcode, date of birth).
    pub fn is_traceable(&self) -> bool {
        let has_nhs_trace = self.nhs_number.is_some() && self.date_of_birth.is_some();
        let has_fallback_trace = self.family_name.is_some()
            && self.given_name.is_some()
            && self.sex.is_some()
            && self.postcode.is_some()
            && self.date_of_birth.is_some();
        has_nhs_trace || has_fallback_trace
    }
}

/// A patient record destined for insertion, before the store assigns an id
/// and timestamps.
///
/// `save` always persists these with `verified = false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[allow(missing_docs)] // fields mirror PatientRecord
pub struct NewPatient {
    pub nhs_number: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub postcode: Option<String>,
    pub sex: Option<String>,
}

/// Search criteria for patient matching: the demographic fields of a
/// [`PatientRecord`] minus id, verified flag, and timestamps.
///
/// Empty-string values normalise to absent during cleaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[allow(missing_docs)] // fields mirror PatientRecord
pub struct DemographicQuery {
    pub nhs_number: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub postcode: Option<String>,
    pub sex: Option<String>,
}

impl DemographicQuery {
    /// Applies the lenient bulk cleaner to every field.
    ///
    /// Invalid fields are nulled, never rejected, so one bad record cannot
    /// fail a whole batch.
    pub fn cleaned(&self) -> DemographicQuery {
        DemographicQuery {
            nhs_number: self
                .nhs_number
                .as_deref()
                .and_then(demographics::clean_nhs_number),
            given_name: self.given_name.as_deref().and_then(demographics::clean_name),
            family_name: self
                .family_name
                .as_deref()
                .and_then(demographics::clean_name),
            date_of_birth: self
                .date_of_birth
                .and_then(demographics::clean_date_of_birth),
            postcode: self.postcode.as_deref().and_then(demographics::clean_postcode),
            sex: self.sex.as_deref().and_then(demographics::clean_sex),
        }
    }

    /// Returns true if this (cleaned) query carries enough data to search:
    /// NHS number + date of birth, or date of birth + postcode + both names
    /// + sex.
    pub fn is_searchable(&self) -> bool {
        let cross_check_trace = self.nhs_number.is_some() && self.date_of_birth.is_some();
        let trace = self.date_of_birth.is_some()
            && self.postcode.is_some()
            && self.given_name.is_some()
            && self.family_name.is_some()
            && self.sex.is_some();
        cross_check_trace || trace
    }

    /// Converts the query into an insertable record with the same fields.
    pub fn to_new_patient(&self) -> NewPatient {
        NewPatient {
            nhs_number: self.nhs_number.clone(),
            given_name: self.given_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: self.date_of_birth,
            postcode: self.postcode.clone(),
            sex: self.sex.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_query() -> DemographicQuery {
        DemographicQuery {
            nhs_number: Some("9434765919".to_string()),
            given_name: Some("john".to_string()),
            family_name: Some("doe".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 5, 15),
            postcode: Some("sw1a1aa".to_string()),
            sex: Some("Male".to_string()),
        }
    }

    #[test]
    fn test_cleaned_standardises_all_fields() {
        let cleaned = full_query().cleaned();
        assert_eq!(cleaned.nhs_number.as_deref(), Some("9434765919"));
        assert_eq!(cleaned.given_name.as_deref(), Some("John"));
        assert_eq!(cleaned.family_name.as_deref(), Some("Doe"));
        assert_eq!(cleaned.postcode.as_deref(), Some("SW1A 1AA"));
        assert_eq!(cleaned.sex.as_deref(), Some("male"));
    }

    #[test]
    fn test_cleaned_nulls_invalid_fields() {
        let query = DemographicQuery {
            nhs_number: Some("9434765910".to_string()), // wrong check digit
            postcode: Some("not a postcode".to_string()),
            given_name: Some("   ".to_string()),
            ..Default::default()
        };
        let cleaned = query.cleaned();
        assert!(cleaned.nhs_number.is_none());
        assert!(cleaned.postcode.is_none());
        assert!(cleaned.given_name.is_none());
    }

    #[test]
    fn test_searchable_via_nhs_and_dob() {
        let query = DemographicQuery {
            nhs_number: Some("9434765919".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 5, 15),
            ..Default::default()
        };
        assert!(query.is_searchable());
    }

    #[test]
    fn test_searchable_via_full_demographics() {
        let mut query = full_query().cleaned();
        query.nhs_number = None;
        assert!(query.is_searchable());
        query.sex = None;
        assert!(!query.is_searchable());
    }

    #[test]
    fn test_not_searchable_with_nhs_alone() {
        let query = DemographicQuery {
            nhs_number: Some("9434765919".to_string()),
            ..Default::default()
        };
        assert!(!query.is_searchable());
    }

    #[test]
    fn test_traceable_record() {
        let record = PatientRecord {
            id: 1,
            nhs_number: None,
            given_name: None,
            family_name: None,
            date_of_birth: NaiveDate::from_ymd_opt(1980, 5, 15),
            postcode: Some("SW1A 1AA".to_string()),
            sex: None,
            verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        // Postcode + DOB alone fails both sufficiency rules.
        assert!(!record.is_traceable());
    }
}
