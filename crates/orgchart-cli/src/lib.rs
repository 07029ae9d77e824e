//! Orgchart CLI library
//!
//! This module contains the core CLI logic for the org-chart tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::{
    fs::File,
    io::{BufWriter, Write},
};

use log::{info, warn};

use orgchart::{
    ChartBuilder, OrgChartError,
    directory::employees_from_reader,
    export::{Exporter, json::JsonExporter, svg::SvgExporter},
};

/// Run the org-chart CLI application
///
/// Reads the employee directory, resolves and lays out the hierarchy, fits
/// it to the requested viewport and writes the chart to the output file.
///
/// # Errors
///
/// Returns `OrgChartError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed directory input
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), OrgChartError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        format = args.format.to_string();
        "Processing employee directory"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let style = app_config.style().clone();

    let records = employees_from_reader(File::open(&args.input)?)?;

    let chart = ChartBuilder::new(app_config)
        .with_viewport(args.viewport)
        .build(records)?;

    if let Some(failure) = chart.failure() {
        warn!(reason = failure.to_string(); "Writing an empty chart");
    }
    for warning in chart.warnings() {
        warn!(warning = warning.to_string(); "Directory inconsistency");
    }

    let mut writer = BufWriter::new(File::create(&args.output)?);
    match args.format {
        OutputFormat::Svg => SvgExporter::new(&style)?.export(&chart, &mut writer)?,
        OutputFormat::Json => JsonExporter::new()
            .with_pretty(true)
            .export(&chart, &mut writer)?,
    }
    writer.flush()?;

    info!(output_file = args.output; "Chart exported successfully");

    Ok(())
}
