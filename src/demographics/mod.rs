//! Demographic field cleaning and validation.
//!
//! Two coexisting policies serve the two entry points:
//!
//! - The **lenient cleaners** in this module null invalid fields and never
//!   reject, so a single bad record cannot fail a whole matching batch.
//! - The **strict validator** in [`validate`] raises on the first invalid
//!   field and enforces the minimum-information threshold used by the
//!   linking entry point.

mod clean;
mod nhs_number;
mod postcode;
pub mod validate;

pub use clean::{clean_date_of_birth, clean_name, clean_sex};
pub use nhs_number::{clean_nhs_number, is_valid_nhs_number};
pub use postcode::{clean_postcode, is_valid_postcode};
