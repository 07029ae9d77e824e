//! Text folding and sibling ordering.
//!
//! Names and job titles are compared after Unicode canonical decomposition
//! with combining marks removed and lower-casing, so "Émilie" sorts next to
//! "Emilie" and a "Directrice Générale" title matches the `directrice` keyword.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use orgchart_core::employee::EmployeeRecord;

/// Folds text for accent- and case-insensitive comparison.
///
/// # Examples
///
/// ```
/// use orgchart::hierarchy::fold_text;
///
/// assert_eq!(fold_text("Émilie"), "emilie");
/// assert_eq!(fold_text("  Chef de Projet "), "  chef de projet ");
/// ```
pub fn fold_text(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Precomputed sort key of one record among its siblings.
#[derive(Debug, Clone)]
pub(super) struct SiblingKey {
    manager_like: bool,
    first_name: String,
    raw_first_name: String,
    last_name: String,
    email: String,
    id: String,
    position: usize,
}

impl SiblingKey {
    pub(super) fn new(record: &EmployeeRecord, manager_like: bool, position: usize) -> Self {
        Self {
            manager_like,
            first_name: fold_text(record.first_name().trim()),
            raw_first_name: record.first_name().trim().to_string(),
            last_name: fold_text(record.last_name().trim()),
            email: record
                .email_key()
                .map(|key| key.to_string())
                .unwrap_or_default(),
            id: record.id().to_string(),
            position,
        }
    }
}

/// Sibling order: manager-like first, then first name, then the remaining
/// fields as tie-breakers so that identical input always yields identical order.
pub(super) fn sibling_order(a: &SiblingKey, b: &SiblingKey) -> Ordering {
    b.manager_like
        .cmp(&a.manager_like)
        .then_with(|| a.first_name.cmp(&b.first_name))
        .then_with(|| a.raw_first_name.cmp(&b.raw_first_name))
        .then_with(|| a.last_name.cmp(&b.last_name))
        .then_with(|| a.email.cmp(&b.email))
        .then_with(|| a.id.cmp(&b.id))
        .then_with(|| a.position.cmp(&b.position))
}
