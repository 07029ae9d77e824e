//! Email join index over the flat employee list.
//!
//! Manager references are email strings, not foreign keys. [`DirectoryIndex`]
//! resolves every reference to a record position once, so the rest of the
//! resolver works on plain indices.

use std::collections::HashMap;

use log::trace;

use orgchart_core::{employee::EmployeeRecord, identifier::Id};

/// Two records claimed the same email. The later record owns the index slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateEmail {
    pub email: Id,
    /// Position of the record that owns the email after indexing.
    pub kept: usize,
    /// Position of the record that lost the slot.
    pub replaced: usize,
}

/// Lookup structure built from a slice of records.
#[derive(Debug)]
pub struct DirectoryIndex<'a> {
    records: &'a [EmployeeRecord],
    by_email: HashMap<Id, usize>,
    manager_of: Vec<Option<usize>>,
    reports: Vec<Vec<usize>>,
    duplicates: Vec<DuplicateEmail>,
}

impl<'a> DirectoryIndex<'a> {
    /// Indexes `records` by normalized email and resolves each primary
    /// manager reference.
    ///
    /// A reference resolves to nothing when it is absent, names an unknown
    /// email, or names the record itself.
    pub fn build(records: &'a [EmployeeRecord]) -> Self {
        let mut by_email = HashMap::with_capacity(records.len());
        let mut duplicates = Vec::new();

        for (position, record) in records.iter().enumerate() {
            let Some(key) = record.email_key() else {
                trace!(position, id = record.id(); "Record has no email, not indexed");
                continue;
            };
            if let Some(replaced) = by_email.insert(key, position) {
                duplicates.push(DuplicateEmail {
                    email: key,
                    kept: position,
                    replaced,
                });
            }
        }

        let manager_of: Vec<Option<usize>> = records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                record
                    .manager_key()
                    .and_then(|key| by_email.get(&key).copied())
                    .filter(|&manager| manager != position)
            })
            .collect();

        let mut reports = vec![Vec::new(); records.len()];
        for (position, manager) in manager_of.iter().enumerate() {
            if let Some(manager) = manager {
                reports[*manager].push(position);
            }
        }

        Self {
            records,
            by_email,
            manager_of,
            reports,
            duplicates,
        }
    }

    /// The indexed records, in input order.
    pub fn records(&self) -> &'a [EmployeeRecord] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the record owning `email`, compared case-insensitively.
    pub fn lookup_email(&self, email: &str) -> Option<usize> {
        Id::lookup_email(email).and_then(|key| self.by_email.get(&key).copied())
    }

    /// Position of the resolved primary manager of the record at `position`.
    pub fn manager_of(&self, position: usize) -> Option<usize> {
        self.manager_of.get(position).copied().flatten()
    }

    /// Positions of the records whose primary manager resolves to `position`,
    /// in input order.
    pub fn reports_of(&self, position: usize) -> &[usize] {
        self.reports
            .get(position)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Emails claimed by more than one record.
    pub fn duplicates(&self) -> &[DuplicateEmail] {
        &self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, email: &str, manager: &str) -> EmployeeRecord {
        EmployeeRecord::new(id, id, "")
            .with_email(email)
            .with_manager(manager)
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let records = [employee("a", "Boss@Corp.com", "")];
        let index = DirectoryIndex::build(&records);
        assert_eq!(index.lookup_email("boss@corp.com"), Some(0));
        assert_eq!(index.lookup_email(" BOSS@CORP.COM "), Some(0));
        assert_eq!(index.lookup_email("nobody@corp.com"), None);
    }

    #[test]
    fn test_lookup_of_unknown_email_leaves_no_key() {
        let records = [employee("a", "boss@corp.com", "")];
        let index = DirectoryIndex::build(&records);
        let email = "index.unknown.lookup@corp.com";
        assert_eq!(index.lookup_email(email), None);
        assert!(Id::lookup_email(email).is_none());
    }

    #[test]
    fn test_manager_references_resolve_to_positions() {
        let records = [
            employee("ceo", "ceo@x.com", ""),
            employee("m1", "m1@x.com", "CEO@x.com"),
            employee("e1", "e1@x.com", "m1@x.com"),
            employee("e2", "e2@x.com", "ghost@x.com"),
        ];
        let index = DirectoryIndex::build(&records);
        assert_eq!(index.manager_of(0), None);
        assert_eq!(index.manager_of(1), Some(0));
        assert_eq!(index.manager_of(2), Some(1));
        assert_eq!(index.manager_of(3), None);
        assert_eq!(index.reports_of(0), [1]);
        assert_eq!(index.reports_of(1), [2]);
        assert!(index.reports_of(3).is_empty());
        assert!(index.reports_of(99).is_empty());
    }

    #[test]
    fn test_self_reference_resolves_to_nothing() {
        let records = [employee("loop", "loop@x.com", "loop@x.com")];
        let index = DirectoryIndex::build(&records);
        assert_eq!(index.manager_of(0), None);
    }

    #[test]
    fn test_records_without_email_are_not_indexed() {
        let records = [
            EmployeeRecord::new("anon", "Anon", "").with_manager("m@x.com"),
            employee("m", "m@x.com", ""),
        ];
        let index = DirectoryIndex::build(&records);
        assert_eq!(index.lookup_email(""), None);
        // Still resolvable as a report by its manager reference.
        assert_eq!(index.manager_of(0), Some(1));
    }

    #[test]
    fn test_duplicate_email_later_record_wins() {
        let records = [
            employee("first", "dup@x.com", ""),
            employee("second", "DUP@x.com", ""),
            employee("report", "r@x.com", "dup@x.com"),
        ];
        let index = DirectoryIndex::build(&records);
        assert_eq!(index.lookup_email("dup@x.com"), Some(1));
        assert_eq!(index.manager_of(2), Some(1));
        assert_eq!(
            index.duplicates(),
            [DuplicateEmail {
                email: Id::new("dup@x.com"),
                kept: 1,
                replaced: 0,
            }]
        );
    }
}
