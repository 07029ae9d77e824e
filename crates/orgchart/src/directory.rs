//! Loading employee lists from the HR directory's JSON export.
//!
//! Two shapes are accepted: a bare array of employee objects, or an object
//! with the array under `employees`.
//!
//! ```json
//! { "employees": [ { "id": 1, "first_name": "Ada", "email": "ada@corp.com" } ] }
//! ```

use std::io::Read;

use log::{debug, info};
use serde::Deserialize;

use orgchart_core::employee::EmployeeRecord;

use crate::error::OrgChartError;

#[derive(Deserialize)]
#[serde(untagged)]
enum Directory {
    List(Vec<EmployeeRecord>),
    Envelope { employees: Vec<EmployeeRecord> },
}

impl Directory {
    fn into_records(self) -> Vec<EmployeeRecord> {
        match self {
            Self::List(records) | Self::Envelope { employees: records } => records,
        }
    }
}

/// Parses an employee list from JSON text.
///
/// # Errors
///
/// Returns [`OrgChartError::Input`] carrying the source text when the JSON is
/// malformed or has an unexpected shape.
///
/// # Examples
///
/// ```
/// use orgchart::directory::employees_from_json;
///
/// let records = employees_from_json(r#"[{"id": 7, "prenom": "Zoé", "poste": "Chef"}]"#).unwrap();
/// assert_eq!(records[0].id(), "7");
/// assert_eq!(records[0].first_name(), "Zoé");
/// assert_eq!(records[0].job_title(), "Chef");
/// ```
pub fn employees_from_json(source: &str) -> Result<Vec<EmployeeRecord>, OrgChartError> {
    info!(bytes = source.len(); "Parsing employee directory");

    let directory: Directory = serde_json::from_str(source).map_err(|err| {
        // The untagged enum hides the position, so reparse as the plain
        // array to report where the input went wrong.
        let err = serde_json::from_str::<Vec<EmployeeRecord>>(source)
            .err()
            .unwrap_or(err);
        OrgChartError::new_input_error(err, source)
    })?;
    let records = directory.into_records();

    debug!(records = records.len(); "Employee directory parsed");
    Ok(records)
}

/// Reads and parses an employee list from `reader`.
///
/// # Errors
///
/// Returns [`OrgChartError::Io`] when reading fails and
/// [`OrgChartError::Input`] when the content is not a valid directory.
pub fn employees_from_reader(mut reader: impl Read) -> Result<Vec<EmployeeRecord>, OrgChartError> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    employees_from_json(&source)
}
