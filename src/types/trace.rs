//! Trace status and outbound MESH batch request types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::PatientRecord;

/// A row in the `trace_status` side table.
///
/// A patient has zero or one of these. An absent `submitted_at` means the
/// patient was never submitted (or is eligible for resubmission).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceStatusRecord {
    /// The patient this status belongs to.
    pub patient_id: i64,
    /// When the patient was last submitted for external tracing.
    pub submitted_at: Option<DateTime<Utc>>,
    /// When the trace response confirmed completion, if it has.
    pub completed_at: Option<DateTime<Utc>>,
}

/// The result of one trace-submission run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceSubmission {
    /// Ids actually included in the outbound batch.
    pub patient_ids: Vec<i64>,
    /// When the batch was stamped, or absent if nothing was submitted.
    pub submission_time: Option<DateTime<Utc>>,
}

impl TraceSubmission {
    /// A run that submitted nothing and mutated no state.
    pub fn empty() -> Self {
        Self {
            patient_ids: Vec::new(),
            submission_time: None,
        }
    }
}

/// One record of the outbound PDS MESH batch request file.
///
/// Column names and order follow the PDS MESH request data dictionary.
/// Only the demographic columns are populated; the rest are always blank
/// but must be present for downstream bit-compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[allow(missing_docs)] // field names are the serde renames, one per column
pub struct MeshTraceRequest {
    /// Internal patient id, echoed back by the trace response.
    #[serde(rename = "UNIQUE REFERENCE")]
    pub unique_reference: i64,
    #[serde(rename = "NHS_NO")]
    pub nhs_number: Option<String>,
    #[serde(rename = "FAMILY_NAME")]
    pub family_name: Option<String>,
    #[serde(rename = "GIVEN_NAME")]
    pub given_name: Option<String>,
    #[serde(rename = "OTHER_GIVEN_NAME")]
    pub other_given_name: Option<String>,
    #[serde(rename = "GENDER")]
    pub gender: Option<String>,
    #[serde(rename = "DATE_OF_BIRTH")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(rename = "POSTCODE")]
    pub postcode: Option<String>,
    #[serde(rename = "DATE_OF_DEATH")]
    pub date_of_death: Option<NaiveDate>,
    #[serde(rename = "ADDRESS_LINE1")]
    pub address_line1: Option<String>,
    #[serde(rename = "ADDRESS_LINE2")]
    pub address_line2: Option<String>,
    #[serde(rename = "ADDRESS_LINE3")]
    pub address_line3: Option<String>,
    #[serde(rename = "ADDRESS_LINE4")]
    pub address_line4: Option<String>,
    #[serde(rename = "ADDRESS_LINE5")]
    pub address_line5: Option<String>,
    #[serde(rename = "ADDRESS_DATE")]
    pub address_date: Option<NaiveDate>,
    #[serde(rename = "GP_PRACTICE_CODE")]
    pub gp_practice_code: Option<String>,
    #[serde(rename = "NHAIS_POSTING_ID")]
    pub nhais_posting_id: Option<String>,
    #[serde(rename = "AS_AT_DATE")]
    pub as_at_date: Option<NaiveDate>,
    #[serde(rename = "LOCAL_PATIENT_ID")]
    pub local_patient_id: Option<String>,
    #[serde(rename = "INTERNAL_ID")]
    pub internal_id: Option<String>,
    #[serde(rename = "TELEPHONE_NUMBER")]
    pub telephone_number: Option<String>,
    #[serde(rename = "MOBILE_NUMBER")]
    pub mobile_number: Option<String>,
    #[serde(rename = "EMAIL_ADDRESS")]
    pub email_address: Option<String>,
}

impl MeshTraceRequest {
    /// The fixed column set in file order.
    pub const COLUMNS: [&'static str; 23] = [
        "UNIQUE REFERENCE",
        "NHS_NO",
        "FAMILY_NAME",
        "GIVEN_NAME",
        "OTHER_GIVEN_NAME",
        "GENDER",
        "DATE_OF_BIRTH",
        "POSTCODE",
        "DATE_OF_DEATH",
        "ADDRESS_LINE1",
        "ADDRESS_LINE2",
        "ADDRESS_LINE3",
        "ADDRESS_LINE4",
        "ADDRESS_LINE5",
        "ADDRESS_DATE",
        "GP_PRACTICE_CODE",
        "NHAIS_POSTING_ID",
        "AS_AT_DATE",
        "LOCAL_PATIENT_ID",
        "INTERNAL_ID",
        "TELEPHONE_NUMBER",
        "MOBILE_NUMBER",
        "EMAIL_ADDRESS",
    ];

    /// Builds a request record from a patient. Pure field renaming, with
    /// every unmapped column left blank.
    pub fn from_patient(patient: &PatientRecord) -> Self {
        Self {
            unique_reference: patient.id,
            nhs_number: patient.nhs_number.clone(),
            family_name: patient.family_name.clone(),
            given_name: patient.given_name.clone(),
            gender: patient.sex.clone(),
            date_of_birth: patient.date_of_birth,
            postcode: patient.postcode.clone(),
            ..Default::default()
        }
    }
}
