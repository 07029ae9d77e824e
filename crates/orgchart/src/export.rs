//! Export of laid-out charts.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! converting an [`OrgChart`] into an output format. It is the final stage of
//! the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Employee records
//!     ↓ resolve
//! Hierarchy
//!     ↓ layout
//! TreeLayout + initial ViewTransform
//!     ↓ export (this module)
//! Output document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG drawing via [`svg::SvgExporter`]
//! - [`json`]: machine-readable layout dump via [`json::JsonExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`]. [`Error`] converts into
//! [`OrgChartError::Export`] at the crate boundary.
//!
//! [`OrgChartError::Export`]: crate::OrgChartError::Export

/// JSON export backend.
pub mod json;
/// SVG export backend.
pub mod svg;

use std::io;

use log::error;

use crate::OrgChart;

/// Abstraction for chart export backends.
pub trait Exporter {
    /// Renders `chart` to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the chart cannot be converted.
    fn render(&self, chart: &OrgChart) -> Result<String, Error>;

    /// Renders `chart` and writes the result to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if rendering fails, or [`Error::Io`] if
    /// writing the output fails.
    fn export(&self, chart: &OrgChart, writer: &mut dyn io::Write) -> Result<(), Error> {
        let document = self.render(chart)?;
        writer.write_all(document.as_bytes()).map_err(|err| {
            error!(err:err; "Failed to write exported chart");
            Error::Io(err)
        })
    }
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
