//! Orgchart - Management hierarchy reconstruction and tree layout.
//!
//! Rebuilds the management tree of an organization from a flat, email-linked
//! employee list, lays it out as a tidy tree and fits it into a viewport for
//! panning and zooming.
//!
//! # Pipeline
//!
//! ```text
//! employee records
//!     ↓ hierarchy::Resolver
//! Hierarchy
//!     ↓ layout::TidyTree
//! TreeLayout (nodes, edges, bounds)
//!     ↓ viewport::compute_initial_transform
//! ViewTransform
//!     ↓ export
//! SVG / JSON
//! ```

pub mod config;
pub mod directory;
pub mod export;
pub mod hierarchy;
pub mod layout;
pub mod viewport;

mod error;

pub use orgchart_core::{color, employee, geometry, identifier};

pub use error::OrgChartError;

use std::fmt;

use log::{debug, info, warn};

use orgchart_core::{employee::EmployeeRecord, geometry::Size};

use config::{AppConfig, StyleConfig};
use export::{Exporter, json::JsonExporter, svg::SvgExporter};
use hierarchy::{
    Hierarchy, ManagerClassifier, Resolution, ResolveFailure, ResolveWarning, Resolver,
    RootStrategy,
};
use layout::{TidyTree, TreeLayout};
use viewport::{ViewTransform, ViewportController};

/// Viewport used when none is given, in screen pixels.
pub const DEFAULT_VIEWPORT: Size = Size::new(1280.0, 800.0);

/// Builder for org charts.
///
/// # Examples
///
/// ```rust
/// use orgchart::{ChartBuilder, config::AppConfig, employee::EmployeeRecord, geometry::Size};
///
/// let records = vec![
///     EmployeeRecord::new("1", "Grace", "Hopper").with_email("grace@corp.com"),
///     EmployeeRecord::new("2", "Alan", "Turing")
///         .with_email("alan@corp.com")
///         .with_manager("grace@corp.com"),
/// ];
///
/// let chart = ChartBuilder::new(AppConfig::default())
///     .with_viewport(Size::new(1024.0, 768.0))
///     .build(records)
///     .expect("Failed to build chart");
///
/// assert_eq!(chart.layout().nodes().len(), 2);
/// let svg = chart.render_svg().expect("Failed to render");
/// assert!(svg.contains("Alan Turing"));
/// ```
#[derive(Default)]
pub struct ChartBuilder {
    config: AppConfig,
    viewport: Option<Size>,
    root_strategy: Option<Box<dyn RootStrategy>>,
    classifier: Option<Box<dyn ManagerClassifier>>,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set the screen size the initial view is fitted to.
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Override the configured root selection.
    pub fn with_root_strategy(mut self, root_strategy: impl RootStrategy + 'static) -> Self {
        self.root_strategy = Some(Box::new(root_strategy));
        self
    }

    /// Override the configured manager keywords.
    pub fn with_classifier(mut self, classifier: impl ManagerClassifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Resolve, lay out and fit `records`.
    ///
    /// A directory without a root candidate still builds: the chart is empty
    /// and [`OrgChart::failure`] reports why.
    ///
    /// # Errors
    ///
    /// Returns [`OrgChartError::Config`] when the configuration is invalid.
    pub fn build(self, records: Vec<EmployeeRecord>) -> Result<OrgChart, OrgChartError> {
        self.config.validate()?;

        let mut resolver = Resolver::from_config(self.config.hierarchy());
        if let Some(root_strategy) = self.root_strategy {
            resolver.set_root_strategy(root_strategy);
        }
        if let Some(classifier) = self.classifier {
            resolver.set_classifier(classifier);
        }

        let mut chart = OrgChart {
            resolver,
            engine: TidyTree::from_config(self.config.layout()),
            style: self.config.style().clone(),
            records: Vec::new(),
            resolution: None,
            layout: TreeLayout::default(),
            view: ViewportController::from_config(self.config.viewport()),
            viewport: self.viewport.unwrap_or(DEFAULT_VIEWPORT),
        };
        chart.refresh(records);
        Ok(chart)
    }
}

/// A resolved, laid-out and fitted org chart.
pub struct OrgChart {
    resolver: Resolver,
    engine: TidyTree,
    style: StyleConfig,
    records: Vec<EmployeeRecord>,
    resolution: Option<Resolution>,
    layout: TreeLayout,
    view: ViewportController,
    viewport: Size,
}

impl fmt::Debug for OrgChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrgChart")
            .field("records", &self.records.len())
            .field("nodes", &self.layout.nodes().len())
            .field("failure", &self.failure())
            .field("view", &self.view)
            .finish()
    }
}

impl OrgChart {
    /// Rebuilds hierarchy, layout and initial fit from a new employee list.
    ///
    /// The selection is kept when the selected employee, matched by email,
    /// is still present.
    pub fn refresh(&mut self, records: Vec<EmployeeRecord>) {
        info!(records = records.len(); "Refreshing chart");

        let selected_email = self
            .view
            .selected_node(self.hierarchy())
            .and_then(|node| node.record().email())
            .map(str::to_string);

        let resolution = self.resolver.resolve(&records);
        if let Some(failure) = resolution.failure() {
            warn!(reason = failure.to_string(); "Nothing to draw");
        }
        self.layout = self.engine.layout(resolution.hierarchy());
        self.view.fit(self.layout.bounds(), self.viewport);
        self.view.select(
            selected_email.and_then(|email| resolution.hierarchy().find_by_email(&email)),
        );
        self.resolution = Some(resolution);
        self.records = records;

        debug!(
            nodes = self.layout.nodes().len(),
            scale = self.view.transform().scale();
            "Chart refreshed"
        );
    }

    /// Refits the view to a new screen size. Pan and zoom are reset.
    pub fn resize(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.view.fit(self.layout.bounds(), viewport);
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        static EMPTY: Hierarchy = Hierarchy::empty();
        self.resolution
            .as_ref()
            .map(Resolution::hierarchy)
            .unwrap_or(&EMPTY)
    }

    pub fn failure(&self) -> Option<&ResolveFailure> {
        self.resolution.as_ref().and_then(Resolution::failure)
    }

    pub fn warnings(&self) -> &[ResolveWarning] {
        self.resolution
            .as_ref()
            .map(Resolution::warnings)
            .unwrap_or_default()
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// The current view transform.
    pub fn transform(&self) -> ViewTransform {
        self.view.transform()
    }

    pub fn view(&self) -> &ViewportController {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewportController {
        &mut self.view
    }

    /// Render the chart as SVG with the configured style.
    ///
    /// # Errors
    ///
    /// Returns [`OrgChartError::Export`] when a configured color is invalid.
    pub fn render_svg(&self) -> Result<String, OrgChartError> {
        let svg = SvgExporter::new(&self.style)?.render(self)?;
        Ok(svg)
    }

    /// Render the layout as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`OrgChartError::Export`] when serialization fails.
    pub fn render_json(&self) -> Result<String, OrgChartError> {
        let json = JsonExporter::new().with_pretty(true).render(self)?;
        Ok(json)
    }
}
