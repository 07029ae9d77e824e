//! Root selection strategies.
//!
//! The directory has no explicit "top of the company" flag, so the root is
//! picked by a pluggable [`RootStrategy`]. [`RootSelector`] is the
//! configuration-facing form of the shipped strategies.

use std::fmt;

use serde::Deserialize;

use super::{collate::fold_text, index::DirectoryIndex};

/// Picks the root record of the hierarchy.
pub trait RootStrategy: fmt::Debug {
    /// Returns the position of the root record, or `None` when no record
    /// qualifies.
    fn select_root(&self, index: &DirectoryIndex<'_>) -> Option<usize>;
}

/// Among records without a primary manager reference, the one with the most
/// direct reports. Ties go to the earliest record.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostDirectReports;

impl RootStrategy for MostDirectReports {
    fn select_root(&self, index: &DirectoryIndex<'_>) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (position, record) in index.records().iter().enumerate() {
            if record.manager_email_1().is_some() {
                continue;
            }
            let reports = index.reports_of(position).len();
            if best.is_none_or(|(_, best_reports)| reports > best_reports) {
                best = Some((position, reports));
            }
        }
        best.map(|(position, _)| position)
    }
}

/// The record owning a given email.
#[derive(Debug, Clone)]
pub struct ByEmail {
    email: String,
}

impl ByEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl RootStrategy for ByEmail {
    fn select_root(&self, index: &DirectoryIndex<'_>) -> Option<usize> {
        index.lookup_email(&self.email)
    }
}

/// The first record whose first and last names match, ignoring case and
/// accents.
#[derive(Debug, Clone)]
pub struct ByName {
    first_name: String,
    last_name: String,
}

impl ByName {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: fold_text(first_name.trim()),
            last_name: fold_text(last_name.trim()),
        }
    }
}

impl RootStrategy for ByName {
    fn select_root(&self, index: &DirectoryIndex<'_>) -> Option<usize> {
        index.records().iter().position(|record| {
            fold_text(record.first_name().trim()) == self.first_name
                && fold_text(record.last_name().trim()) == self.last_name
        })
    }
}

/// Configuration form of the root strategies.
///
/// ```toml
/// root = { strategy = "email", email = "ceo@corp.com" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum RootSelector {
    #[default]
    MostDirectReports,
    Email {
        email: String,
    },
    Name {
        first_name: String,
        last_name: String,
    },
}

impl RootSelector {
    /// Builds the strategy this selector describes.
    pub fn to_strategy(&self) -> Box<dyn RootStrategy> {
        match self {
            Self::MostDirectReports => Box::new(MostDirectReports),
            Self::Email { email } => Box::new(ByEmail::new(email.clone())),
            Self::Name {
                first_name,
                last_name,
            } => Box::new(ByName::new(first_name, last_name)),
        }
    }

    /// Checks that the selector can match anything at all.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::MostDirectReports => Ok(()),
            Self::Email { email } => {
                if email.trim().is_empty() {
                    Err("root email must not be blank".to_string())
                } else {
                    Ok(())
                }
            }
            Self::Name {
                first_name,
                last_name,
            } => {
                if first_name.trim().is_empty() && last_name.trim().is_empty() {
                    Err("root name must not be blank".to_string())
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use orgchart_core::employee::EmployeeRecord;

    use super::*;

    fn directory() -> Vec<EmployeeRecord> {
        vec![
            EmployeeRecord::new("1", "Solo", "Founder").with_email("solo@x.com"),
            EmployeeRecord::new("2", "Émile", "Zola").with_email("ceo@x.com"),
            EmployeeRecord::new("3", "A", "One")
                .with_email("a@x.com")
                .with_manager("ceo@x.com"),
            EmployeeRecord::new("4", "B", "Two")
                .with_email("b@x.com")
                .with_manager("ceo@x.com"),
            EmployeeRecord::new("5", "C", "Three")
                .with_email("c@x.com")
                .with_manager("solo@x.com"),
        ]
    }

    #[test]
    fn test_most_direct_reports_picks_busiest_unmanaged_record() {
        let records = directory();
        let index = DirectoryIndex::build(&records);
        assert_eq!(MostDirectReports.select_root(&index), Some(1));
    }

    #[test]
    fn test_most_direct_reports_tie_goes_to_earliest() {
        let records = vec![
            EmployeeRecord::new("1", "X", "").with_email("x@x.com"),
            EmployeeRecord::new("2", "Y", "").with_email("y@x.com"),
        ];
        let index = DirectoryIndex::build(&records);
        assert_eq!(MostDirectReports.select_root(&index), Some(0));
    }

    #[test]
    fn test_most_direct_reports_none_when_everyone_has_a_manager() {
        let records = vec![
            EmployeeRecord::new("1", "A", "")
                .with_email("a@x.com")
                .with_manager("b@x.com"),
            EmployeeRecord::new("2", "B", "")
                .with_email("b@x.com")
                .with_manager("a@x.com"),
        ];
        let index = DirectoryIndex::build(&records);
        assert_eq!(MostDirectReports.select_root(&index), None);
        assert_eq!(MostDirectReports.select_root(&DirectoryIndex::build(&[])), None);
    }

    #[test]
    fn test_by_email_and_by_name() {
        let records = directory();
        let index = DirectoryIndex::build(&records);
        assert_eq!(ByEmail::new("SOLO@x.com").select_root(&index), Some(0));
        assert_eq!(ByEmail::new("ghost@x.com").select_root(&index), None);
        assert_eq!(ByName::new("emile", "ZOLA").select_root(&index), Some(1));
        assert_eq!(ByName::new("Nobody", "Here").select_root(&index), None);
    }

    #[test]
    fn test_selector_builds_matching_strategy() {
        let records = directory();
        let index = DirectoryIndex::build(&records);
        let selector = RootSelector::Email {
            email: "solo@x.com".to_string(),
        };
        assert_eq!(selector.to_strategy().select_root(&index), Some(0));
        assert_eq!(
            RootSelector::default().to_strategy().select_root(&index),
            Some(1)
        );
    }

    #[test]
    fn test_selector_validation() {
        assert!(RootSelector::MostDirectReports.validate().is_ok());
        assert!(
            RootSelector::Email {
                email: "root.selector.unseen@x.com".to_string()
            }
            .validate()
            .is_ok()
        );
        assert!(
            RootSelector::Email {
                email: "  ".to_string()
            }
            .validate()
            .is_err()
        );
        assert!(
            RootSelector::Name {
                first_name: String::new(),
                last_name: " ".to_string()
            }
            .validate()
            .is_err()
        );
    }
}
