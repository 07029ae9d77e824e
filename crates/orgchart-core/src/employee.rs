//! Employee records as delivered by the HR directory.
//!
//! [`EmployeeRecord`] is the read-only input of the hierarchy resolver. Managers
//! are referenced by email rather than by a foreign key; [`EmployeeRecord::email_key`]
//! and [`EmployeeRecord::manager_key`] expose the normalized join keys.
//!
//! Records deserialize from the directory's JSON shape. Field aliases cover the
//! camelCase and French spellings the directory has used (`poste`, `prenom`,
//! `manager1`, ...). Blank strings are read as absent values.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::identifier::Id;

/// One employee from the directory.
///
/// # Examples
///
/// ```
/// use orgchart_core::employee::EmployeeRecord;
///
/// let record = EmployeeRecord::new("42", "Ada", "Lovelace")
///     .with_email("ada@corp.com")
///     .with_manager("ceo@corp.com")
///     .with_job_title("Engineering Manager");
///
/// assert_eq!(record.display_name(), "Ada Lovelace");
/// assert_eq!(record.email_key().unwrap(), "ada@corp.com");
/// assert_eq!(record.manager_key().unwrap(), "ceo@corp.com");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    id: String,

    #[serde(default, alias = "firstName", alias = "prenom")]
    first_name: String,

    #[serde(default, alias = "lastName", alias = "nom")]
    last_name: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    email: Option<String>,

    #[serde(
        default,
        alias = "manager1",
        alias = "managerEmail1",
        alias = "email_manager1",
        deserialize_with = "blank_as_none"
    )]
    manager_email_1: Option<String>,

    /// Secondary approver. Never used for placement.
    #[serde(
        default,
        alias = "manager2",
        alias = "managerEmail2",
        alias = "email_manager2",
        deserialize_with = "blank_as_none"
    )]
    manager_email_2: Option<String>,

    #[serde(default, alias = "jobTitle", alias = "poste")]
    job_title: String,

    #[serde(default, alias = "departement")]
    department: String,

    #[serde(default, deserialize_with = "blank_as_none")]
    photo: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    status: Option<String>,
}

impl EmployeeRecord {
    /// Creates a record with an identifier and a display name.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(email.into());
        self
    }

    /// Sets the primary manager email, the only reference used for placement.
    pub fn with_manager(mut self, email: impl Into<String>) -> Self {
        self.manager_email_1 = non_blank(email.into());
        self
    }

    pub fn with_secondary_manager(mut self, email: impl Into<String>) -> Self {
        self.manager_email_2 = non_blank(email.into());
        self
    }

    pub fn with_job_title(mut self, job_title: impl Into<String>) -> Self {
        self.job_title = job_title.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = non_blank(photo.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = non_blank(status.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn manager_email_1(&self) -> Option<&str> {
        self.manager_email_1.as_deref()
    }

    pub fn manager_email_2(&self) -> Option<&str> {
        self.manager_email_2.as_deref()
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns true when the status flag reads "active" (any case).
    ///
    /// Records without a status flag are considered active.
    pub fn is_active(&self) -> bool {
        self.status
            .as_deref()
            .is_none_or(|status| status.trim().eq_ignore_ascii_case("active"))
    }

    /// First and last name joined by a space, trimmed.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Normalized join key of this record's own email.
    pub fn email_key(&self) -> Option<Id> {
        self.email.as_deref().and_then(Id::from_email)
    }

    /// Normalized join key of the primary manager's email.
    pub fn manager_key(&self) -> Option<Id> {
        self.manager_email_1.as_deref().and_then(Id::from_email)
    }
}

impl fmt::Display for EmployeeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{email}>", self.display_name()),
            None => write!(f, "{} (#{})", self.display_name(), self.id),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(non_blank))
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(text)) => text,
        Some(RawId::Integer(number)) => number.to_string(),
        Some(RawId::Float(number)) => number.to_string(),
        None => String::new(),
    })
}
