//! Command-line argument definitions for the org-chart CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, output format,
//! viewport size, configuration file selection, and logging verbosity.

use std::fmt;

use clap::{Parser, ValueEnum};

use orgchart::geometry::Size;

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Drawn chart
    Svg,
    /// Positioned nodes, edges and view transform
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg => write!(f, "svg"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Command-line arguments for the org-chart tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the employee directory (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Viewport the initial view is fitted to, as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x800", value_parser = parse_viewport)]
    pub viewport: Size,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Parses `WIDTHxHEIGHT` into a [`Size`].
fn parse_viewport(value: &str) -> Result<Size, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{value}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f32>()
            .ok()
            .filter(|extent| extent.is_finite() && *extent > 0.0)
            .ok_or_else(|| format!("`{part}` is not a positive number"))
    };
    Ok(Size::new(parse(width)?, parse(height)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("1280x800").unwrap(), Size::new(1280.0, 800.0));
        assert_eq!(parse_viewport("640X480").unwrap(), Size::new(640.0, 480.0));
        assert!(parse_viewport("1280").is_err());
        assert!(parse_viewport("0x800").is_err());
        assert!(parse_viewport("wide x tall").is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["orgchart", "people.json"]);
        assert_eq!(args.input, "people.json");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.format, OutputFormat::Svg);
        assert_eq!(args.viewport, Size::new(1280.0, 800.0));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_json_format_and_viewport() {
        let args = Args::parse_from([
            "orgchart",
            "people.json",
            "--format",
            "json",
            "--viewport",
            "800x600",
            "-o",
            "layout.json",
        ]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.viewport, Size::new(800.0, 600.0));
        assert_eq!(args.output, "layout.json");
    }
}
