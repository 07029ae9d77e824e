//! Configuration types for org-chart resolution, layout and rendering.
//!
//! This module provides configuration structures that control how the
//! hierarchy is resolved, how the tree is laid out, how the initial view is
//! fitted and how exported charts are styled. All types implement
//! [`serde::Deserialize`] for loading from external sources, and every field
//! falls back to its default when absent.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`HierarchyConfig`] - Root selection and manager keywords.
//! - [`LayoutConfig`] - Node extents and gaps of the tidy tree.
//! - [`ViewportConfig`] - Zoom range and fit margins.
//! - [`StyleConfig`] - Colors used by the exporters.
//!
//! # Example
//!
//! ```
//! # use orgchart::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.layout().node_width(), 200.0);
//! ```

use serde::Deserialize;

use orgchart_core::{color::Color, geometry::Size};

use crate::{
    error::OrgChartError,
    hierarchy::RootSelector,
    viewport::{FitMargins, ScaleRange},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Hierarchy resolution section.
    #[serde(default)]
    hierarchy: HierarchyConfig,

    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Viewport fit section.
    #[serde(default)]
    viewport: ViewportConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        hierarchy: HierarchyConfig,
        layout: LayoutConfig,
        viewport: ViewportConfig,
        style: StyleConfig,
    ) -> Self {
        Self {
            hierarchy,
            layout,
            viewport,
            style,
        }
    }

    /// Returns the hierarchy configuration.
    pub fn hierarchy(&self) -> &HierarchyConfig {
        &self.hierarchy
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the viewport configuration.
    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks every section for values the pipeline cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`OrgChartError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), OrgChartError> {
        self.hierarchy
            .root()
            .validate()
            .and_then(|()| self.layout.validate())
            .and_then(|()| self.viewport.validate())
            .and_then(|()| self.style.validate())
            .map_err(OrgChartError::Config)
    }
}

/// Hierarchy resolution configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HierarchyConfig {
    /// How the root employee is chosen.
    #[serde(default)]
    root: RootSelector,

    /// Replaces the built-in manager keywords when set.
    #[serde(default)]
    manager_keywords: Option<Vec<String>>,
}

impl HierarchyConfig {
    pub fn new(root: RootSelector, manager_keywords: Option<Vec<String>>) -> Self {
        Self {
            root,
            manager_keywords,
        }
    }

    /// Returns the root selector.
    pub fn root(&self) -> &RootSelector {
        &self.root
    }

    /// Returns the keyword override, or `None` for the built-in list.
    pub fn manager_keywords(&self) -> Option<&[String]> {
        self.manager_keywords.as_deref()
    }
}

/// Tidy-tree extents and spacing, in chart units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_width: f32,
    node_height: f32,
    /// Vertical gap between the boxes of consecutive levels.
    level_gap: f32,
    /// Horizontal gap between siblings sharing a parent.
    sibling_gap: f32,
    /// Horizontal gap between neighbors of different parents.
    subtree_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            node_height: 72.0,
            level_gap: 56.0,
            sibling_gap: 16.0,
            subtree_gap: 48.0,
        }
    }
}

impl LayoutConfig {
    pub fn new(
        node_width: f32,
        node_height: f32,
        level_gap: f32,
        sibling_gap: f32,
        subtree_gap: f32,
    ) -> Self {
        Self {
            node_width,
            node_height,
            level_gap,
            sibling_gap,
            subtree_gap,
        }
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn level_gap(&self) -> f32 {
        self.level_gap
    }

    pub fn sibling_gap(&self) -> f32 {
        self.sibling_gap
    }

    pub fn subtree_gap(&self) -> f32 {
        self.subtree_gap
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.node_width > 0.0 && self.node_height > 0.0) {
            return Err(format!(
                "node size must be positive, got {}x{}",
                self.node_width, self.node_height
            ));
        }
        for (name, gap) in [
            ("level_gap", self.level_gap),
            ("sibling_gap", self.sibling_gap),
            ("subtree_gap", self.subtree_gap),
        ] {
            if !(gap >= 0.0 && gap.is_finite()) {
                return Err(format!("{name} must be a non-negative number, got {gap}"));
            }
        }
        Ok(())
    }
}

/// Zoom range and margins of the initial fit, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    min_scale: f32,
    max_scale: f32,
    /// Clearance kept on the left, right and bottom edges.
    margin: f32,
    /// Distance between the viewport top and the tree top.
    top_margin: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 2.0,
            margin: 40.0,
            top_margin: 24.0,
        }
    }
}

impl ViewportConfig {
    pub fn new(min_scale: f32, max_scale: f32, margin: f32, top_margin: f32) -> Self {
        Self {
            min_scale,
            max_scale,
            margin,
            top_margin,
        }
    }

    /// Returns the allowed scale interval.
    ///
    /// Only meaningful after [`AppConfig::validate`] succeeded.
    pub fn scale_range(&self) -> ScaleRange {
        ScaleRange::new(self.min_scale, self.max_scale).unwrap_or_default()
    }

    pub fn margins(&self) -> FitMargins {
        FitMargins::new(self.margin, self.top_margin)
    }

    fn validate(&self) -> Result<(), String> {
        ScaleRange::new(self.min_scale, self.max_scale)?;
        if !(self.margin >= 0.0 && self.top_margin >= 0.0) {
            return Err(format!(
                "viewport margins must be non-negative, got {} and {}",
                self.margin, self.top_margin
            ));
        }
        Ok(())
    }
}

/// Visual styling of exported charts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] of the chart, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Fill of manager-like nodes.
    #[serde(default)]
    manager_fill: Option<String>,

    /// Fill of every other node.
    #[serde(default)]
    employee_fill: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_optional(self.background_color.as_deref(), "background")
    }

    /// Returns the manager node fill, defaulting to a light blue.
    pub fn manager_fill(&self) -> Result<Color, String> {
        parse_optional(self.manager_fill.as_deref(), "manager fill")
            .map(|color| color.unwrap_or_else(|| default_color("#dbeafe")))
    }

    /// Returns the regular node fill, defaulting to a light gray.
    pub fn employee_fill(&self) -> Result<Color, String> {
        parse_optional(self.employee_fill.as_deref(), "employee fill")
            .map(|color| color.unwrap_or_else(|| default_color("#f3f4f6")))
    }

    fn validate(&self) -> Result<(), String> {
        self.background_color()?;
        self.manager_fill()?;
        self.employee_fill()?;
        Ok(())
    }
}

fn parse_optional(color: Option<&str>, what: &str) -> Result<Option<Color>, String> {
    color
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {what} color in config: {err}"))
}

fn default_color(hex: &str) -> Color {
    Color::new(hex).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.hierarchy().root(), &RootSelector::MostDirectReports);
        assert!(config.hierarchy().manager_keywords().is_none());
        assert_eq!(config.layout().subtree_gap(), 48.0);
        assert_eq!(config.viewport().scale_range().min(), 0.1);
        assert_eq!(config.viewport().scale_range().max(), 2.0);
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let config = AppConfig::new(
            HierarchyConfig::default(),
            LayoutConfig::new(0.0, 72.0, 56.0, 16.0, 48.0),
            ViewportConfig::default(),
            StyleConfig::default(),
        );
        assert!(matches!(config.validate(), Err(OrgChartError::Config(_))));

        let config = AppConfig::new(
            HierarchyConfig::default(),
            LayoutConfig::new(200.0, 72.0, -1.0, 16.0, 48.0),
            ViewportConfig::default(),
            StyleConfig::default(),
        );
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("level_gap"));
    }

    #[test]
    fn test_invalid_scale_range_rejected() {
        let config = AppConfig::new(
            HierarchyConfig::default(),
            LayoutConfig::default(),
            ViewportConfig::new(3.0, 2.0, 40.0, 24.0),
            StyleConfig::default(),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_style_defaults_and_overrides() {
        let style = StyleConfig {
            background_color: Some("white".to_string()),
            manager_fill: Some("not-a-color".to_string()),
            employee_fill: None,
        };
        assert!(style.background_color().unwrap().is_some());
        assert!(style.manager_fill().is_err());
        assert!(style.employee_fill().is_ok());
        assert!(style.validate().is_err());
    }
}
