//! Error adapter for converting OrgChartError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! Malformed directory input is rendered with a snippet of the offending
//! JSON; every other error is reported without source context.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};
use serde_json::error::Category;

use orgchart::OrgChartError;

/// Adapter for a JSON error in the employee directory.
///
/// Wraps the [`serde_json::Error`] together with the text it failed on and
/// implements [`MietteDiagnostic`] to point at the failing location.
pub struct InputAdapter<'a> {
    /// The wrapped JSON error
    error: &'a serde_json::Error,
    /// Source JSON for displaying snippets
    src: &'a str,
}

impl<'a> InputAdapter<'a> {
    /// Create a new input adapter.
    pub fn new(error: &'a serde_json::Error, src: &'a str) -> Self {
        Self { error, src }
    }

    /// Byte offset of the error location in the source.
    fn offset(&self) -> usize {
        let line_start: usize = self
            .src
            .split_inclusive('\n')
            .take(self.error.line().saturating_sub(1))
            .map(str::len)
            .sum();
        let mut offset = (line_start + self.error.column().saturating_sub(1)).min(self.src.len());
        while !self.src.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn label(&self) -> &'static str {
        match self.error.classify() {
            Category::Syntax => "invalid JSON here",
            Category::Eof => "input ends here",
            Category::Data => "unexpected value here",
            Category::Io => "read failed here",
        }
    }
}

impl fmt::Debug for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputAdapter")
            .field("error", &self.error)
            .finish()
    }
}

impl fmt::Display for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid employee directory: {}", self.error)
    }
}

impl std::error::Error for InputAdapter<'_> {}

impl MietteDiagnostic for InputAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("orgchart::input"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "expected a JSON array of employees, or an object with an `employees` array",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let offset = self.offset();
        let len = usize::from(offset < self.src.len());
        let span = SourceSpan::new(offset.into(), len);
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(self.label().to_string()), span),
        )))
    }
}

/// Adapter for [`OrgChartError`] variants without source context.
///
/// This adapter handles I/O errors, configuration errors, hierarchy errors
/// and export errors.
pub struct ErrorAdapter<'a>(pub &'a OrgChartError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            OrgChartError::Io(_) => "orgchart::io",
            OrgChartError::Input { .. } => "orgchart::input",
            OrgChartError::Config(_) => "orgchart::config",
            OrgChartError::Resolution(_) => "orgchart::resolution",
            OrgChartError::Export(_) => "orgchart::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            OrgChartError::Resolution(_) => Some(Box::new(
                "at least one employee must have no manager, or select the root in [hierarchy]",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// Malformed input with source location information.
    Input(InputAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Input(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Input(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Input(i) => i.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Input(i) => i.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert an [`OrgChartError`] into a list of reportable errors.
pub fn to_reportables(err: &OrgChartError) -> Vec<Reportable<'_>> {
    match err {
        OrgChartError::Input { source, src } => {
            vec![Reportable::Input(InputAdapter::new(source, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
