//! Identifier management using string interning for efficient key comparison
//!
//! Employee records reference their managers by email. Those emails are
//! normalized once and interned as [`Id`] values so that joins are cheap
//! `Copy + Hash` comparisons instead of repeated string work.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> std::sync::MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier.
///
/// # Examples
///
/// ```
/// use orgchart_core::identifier::Id;
///
/// let a = Id::new("ceo@example.com");
/// let b = Id::new("ceo@example.com");
/// assert_eq!(a, b);
///
/// let key = Id::from_email("  CEO@Example.com ").unwrap();
/// assert_eq!(key, "ceo@example.com");
/// assert!(Id::from_email("   ").is_none());
///
/// assert_eq!(Id::lookup_email("Ceo@Example.com"), Some(key));
/// assert!(Id::lookup_email("unknown@example.com").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str without any normalization.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates the join key for an email address.
    ///
    /// Emails compare case-insensitively and ignore surrounding whitespace.
    /// Returns `None` for blank input, which callers treat as "no email".
    pub fn from_email(email: &str) -> Option<Self> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self::new(&trimmed.to_lowercase()))
    }

    /// Returns the join key for an email only if it was interned before.
    ///
    /// Uses the same normalization as [`Id::from_email`] but never grows the
    /// interner, so query paths fed with arbitrary input stay bounded. An
    /// email that was never interned cannot belong to any record.
    pub fn lookup_email(email: &str) -> Option<Self> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return None;
        }
        interner().get(trimmed.to_lowercase()).map(Self)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner.resolve(self.0).unwrap_or_default();
        write!(f, "{str_value}")
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        assert_eq!(Id::new("a@x.com"), Id::new("a@x.com"));
        assert_ne!(Id::new("a@x.com"), Id::new("b@x.com"));
    }

    #[test]
    fn test_from_email_normalizes_case_and_whitespace() {
        let upper = Id::from_email("Jane.Doe@Corp.COM").unwrap();
        let lower = Id::from_email("  jane.doe@corp.com\t").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.to_string(), "jane.doe@corp.com");
    }

    #[test]
    fn test_from_email_rejects_blank() {
        assert!(Id::from_email("").is_none());
        assert!(Id::from_email(" \n ").is_none());
    }

    #[test]
    fn test_lookup_email_finds_interned_keys() {
        let key = Id::from_email("lookup.known@corp.com").unwrap();
        assert_eq!(Id::lookup_email(" LOOKUP.Known@corp.com "), Some(key));
        assert!(Id::lookup_email("  ").is_none());
    }

    #[test]
    fn test_lookup_email_does_not_intern() {
        let email = "lookup.never.interned@corp.com";
        assert!(Id::lookup_email(email).is_none());
        assert!(Id::lookup_email(&email.to_uppercase()).is_none());
        assert!(interner().get(email).is_none());
    }

    #[test]
    fn test_str_comparison() {
        let id: Id = "manager@corp.com".into();
        assert!(id == "manager@corp.com");
        assert!(id != "other@corp.com");
    }
}
