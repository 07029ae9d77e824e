//! Error types for org-chart operations.
//!
//! This module provides the main error type [`OrgChartError`] which wraps
//! the error conditions that can occur while loading, resolving and
//! exporting a chart.

use std::io;

use thiserror::Error;

use crate::hierarchy::ResolveFailure;

/// The main error type for org-chart operations.
///
/// # Diagnostic Variants
///
/// The `Input` variant keeps the JSON text that failed to parse so that
/// callers can point at the failing line and column.
#[derive(Debug, Error)]
pub enum OrgChartError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid employee directory: {source}")]
    Input {
        source: serde_json::Error,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Hierarchy error: {0}")]
    Resolution(#[from] ResolveFailure),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for OrgChartError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl OrgChartError {
    /// Create a new `Input` error with the associated JSON text.
    pub fn new_input_error(source: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Input {
            source,
            src: src.into(),
        }
    }
}
