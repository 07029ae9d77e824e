//! SVG drawing of an org chart.
//!
//! The document covers the viewport. Chart content sits in one group carrying
//! the chart's [`ViewTransform`], so the SVG opens exactly like the initial
//! interactive view.
//!
//! [`ViewTransform`]: crate::viewport::ViewTransform

use log::{debug, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use orgchart_core::{
    color::Color,
    geometry::{Bounds, Insets, Point, Size},
};

use super::{Error, Exporter};
use crate::{
    OrgChart,
    config::StyleConfig,
    hierarchy::HierarchyNode,
    layout::{PositionedNode, TreeLayout},
};

const CORNER_RADIUS: f32 = 8.0;
const NAME_FONT_SIZE: f32 = 14.0;
const TITLE_FONT_SIZE: f32 = 12.0;
const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
/// Canvas padding when the chart has no viewport to fill.
const FALLBACK_PADDING: f32 = 40.0;

/// Renders charts as SVG documents.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    background: Option<Color>,
    manager_fill: Color,
    employee_fill: Color,
    stroke: Color,
    text: Color,
}

impl SvgExporter {
    /// Creates an exporter from the `[style]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] when a configured color cannot be parsed.
    pub fn new(style: &StyleConfig) -> Result<Self, Error> {
        Ok(Self {
            background: style.background_color().map_err(Error::Render)?,
            manager_fill: style.manager_fill().map_err(Error::Render)?,
            employee_fill: style.employee_fill().map_err(Error::Render)?,
            stroke: Color::new("#6b7280").map_err(Error::Render)?,
            text: Color::new("#111827").map_err(Error::Render)?,
        })
    }

    /// Builds the SVG document for `chart`.
    pub fn render_document(&self, chart: &OrgChart) -> Document {
        let layout = chart.layout();
        let (canvas, transform) = if chart.viewport().is_degenerate() {
            let canvas = layout
                .bounds()
                .to_size()
                .add_padding(Insets::uniform(FALLBACK_PADDING));
            let offset = layout.bounds().min_point();
            (
                canvas,
                format!(
                    "translate({}, {})",
                    FALLBACK_PADDING - offset.x(),
                    FALLBACK_PADDING - offset.y()
                ),
            )
        } else {
            let view = chart.transform();
            (
                chart.viewport(),
                format!(
                    "translate({}, {}) scale({})",
                    view.translation().x(),
                    view.translation().y(),
                    view.scale()
                ),
            )
        };

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", canvas.width(), canvas.height()))
            .set("width", canvas.width())
            .set("height", canvas.height());

        if let Some(background) = &self.background {
            doc = doc.add(self.render_background(background, canvas));
        }

        let mut content = svg_element::Group::new()
            .set("class", "orgchart")
            .set("transform", transform);
        content = content.add(self.render_edges(layout));
        for positioned in layout.nodes() {
            if let Some(node) = chart.hierarchy().node(positioned.id()) {
                content = content.add(self.render_node(positioned, node));
            }
        }

        debug!(nodes = layout.nodes().len(), edges = layout.edges().len(); "SVG document rendered");
        doc.add(content)
    }

    fn render_background(&self, color: &Color, canvas: Size) -> svg_element::Rectangle {
        let bounds = Bounds::new_from_top_left(Point::default(), canvas);
        svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha())
    }

    /// Elbow links: down from the parent, across, then down into the child.
    fn render_edges(&self, layout: &TreeLayout) -> svg_element::Group {
        let mut group = svg_element::Group::new()
            .set("class", "links")
            .set("fill", "none")
            .set("stroke", self.stroke.to_string())
            .set("stroke-width", 1.5);

        for edge in layout.edges() {
            let Some((start, end)) = layout.edge_endpoints(edge) else {
                continue;
            };
            let middle_y = (start.y() + end.y()) / 2.0;
            let data = format!(
                "M {} {} L {} {} L {} {} L {} {}",
                start.x(),
                start.y(),
                start.x(),
                middle_y,
                end.x(),
                middle_y,
                end.x(),
                end.y()
            );
            group = group.add(svg_element::Path::new().set("d", data));
        }
        group
    }

    fn render_node(&self, positioned: &PositionedNode, node: &HierarchyNode) -> svg_element::Group {
        let bounds = positioned.bounds();
        let center = positioned.center();
        let record = node.record();
        let fill = if node.is_manager_like() {
            &self.manager_fill
        } else {
            &self.employee_fill
        };

        let mut group = svg_element::Group::new()
            .set("class", "node")
            .set("data-id", record.id());
        if let Some(email) = record.email() {
            group = group.set("data-email", email);
        }

        let frame = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", CORNER_RADIUS)
            .set("fill", fill)
            .set("stroke", &self.stroke);
        group = group.add(frame);

        let name = self
            .text_line(center.x(), center.y() - NAME_FONT_SIZE / 2.0, NAME_FONT_SIZE)
            .set("font-weight", "bold")
            .add(SvgText::new(record.display_name()));
        group = group.add(name);

        if !record.job_title().is_empty() {
            let title = self
                .text_line(center.x(), center.y() + TITLE_FONT_SIZE, TITLE_FONT_SIZE)
                .add(SvgText::new(record.job_title()));
            group = group.add(title);
        }

        group
    }

    fn text_line(&self, x: f32, y: f32, font_size: f32) -> svg_element::Text {
        svg_element::Text::new("")
            .set("x", x)
            .set("y", y)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", FONT_FAMILY)
            .set("font-size", font_size)
            .set("fill", self.text.to_string())
    }
}

impl Exporter for SvgExporter {
    fn render(&self, chart: &OrgChart) -> Result<String, Error> {
        info!("Rendering chart to SVG");
        Ok(self.render_document(chart).to_string())
    }
}

#[cfg(test)]
mod tests {
    use orgchart_core::employee::EmployeeRecord;

    use super::*;
    use crate::{ChartBuilder, config::AppConfig};

    fn chart(records: Vec<EmployeeRecord>) -> OrgChart {
        ChartBuilder::new(AppConfig::default())
            .build(records)
            .unwrap()
    }

    #[test]
    fn test_svg_contains_nodes_and_links() {
        let chart = chart(vec![
            EmployeeRecord::new("1", "Grace", "Hopper")
                .with_email("grace@x.com")
                .with_job_title("Chief Executive"),
            EmployeeRecord::new("2", "Alan", "Turing")
                .with_email("alan@x.com")
                .with_manager("grace@x.com")
                .with_job_title("Engineer"),
        ]);
        let svg = SvgExporter::new(&StyleConfig::default())
            .unwrap()
            .render(&chart)
            .unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("Grace Hopper"));
        assert!(svg.contains("Chief Executive"));
        assert!(svg.contains("data-email=\"alan@x.com\""));
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains("scale("));
    }

    #[test]
    fn test_empty_chart_renders_valid_document() {
        let chart = chart(Vec::new());
        let svg = SvgExporter::new(&StyleConfig::default())
            .unwrap()
            .render(&chart)
            .unwrap();
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<rect"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_export_writes_to_writer() {
        let chart = chart(vec![EmployeeRecord::new("1", "Solo", "").with_email("solo@x.com")]);
        let mut buffer = Vec::new();
        SvgExporter::new(&StyleConfig::default())
            .unwrap()
            .export(&chart, &mut buffer)
            .unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("Solo"));
    }
}
