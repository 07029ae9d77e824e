//! Manager-like classification.
//!
//! Whether a record is "manager-like" decides two things during resolution:
//! it sorts before its non-manager siblings, and only manager-like records
//! get their own subordinates attached. The heuristic is fuzzy business logic,
//! so it sits behind the [`ManagerClassifier`] trait.

use orgchart_core::employee::EmployeeRecord;

use super::collate::fold_text;

/// Title keywords that mark a supervisory role, in English and French.
pub const DEFAULT_MANAGER_KEYWORDS: &[&str] = &[
    "manager",
    "responsable",
    "supervisor",
    "superviseur",
    "director",
    "directeur",
    "directrice",
    "head",
    "chef",
    "chief",
];

/// Decides whether an employee is treated as a manager.
///
/// Any `Fn(&EmployeeRecord) -> bool` closure is a classifier:
///
/// ```
/// use orgchart::hierarchy::ManagerClassifier;
/// use orgchart_core::employee::EmployeeRecord;
///
/// let by_department = |record: &EmployeeRecord| record.department() == "Leadership";
/// let record = EmployeeRecord::new("1", "Ada", "L").with_department("Leadership");
/// assert!(by_department.is_manager_like(&record));
/// ```
pub trait ManagerClassifier {
    fn is_manager_like(&self, record: &EmployeeRecord) -> bool;
}

impl<F> ManagerClassifier for F
where
    F: Fn(&EmployeeRecord) -> bool,
{
    fn is_manager_like(&self, record: &EmployeeRecord) -> bool {
        self(record)
    }
}

/// Case- and accent-insensitive substring match of the job title against a
/// keyword list.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    keywords: Vec<String>,
}

impl KeywordClassifier {
    /// Creates a classifier from custom keywords. Blank keywords are ignored.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|keyword| fold_text(keyword.as_ref().trim()))
            .filter(|keyword| !keyword.is_empty())
            .collect();
        Self { keywords }
    }

    /// Returns the folded keywords.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MANAGER_KEYWORDS)
    }
}

impl ManagerClassifier for KeywordClassifier {
    fn is_manager_like(&self, record: &EmployeeRecord) -> bool {
        let title = fold_text(record.job_title());
        self.keywords
            .iter()
            .any(|keyword| title.contains(keyword.as_str()))
    }
}
