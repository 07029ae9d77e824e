//! JSON dump of a laid-out chart, for renderers living outside this crate.

use log::info;
use serde::Serialize;

use orgchart_core::{
    employee::EmployeeRecord,
    geometry::{Bounds, Size},
};

use super::{Error, Exporter};
use crate::{
    OrgChart,
    hierarchy::NodeId,
    layout::{Edge, PositionedNode},
    viewport::ViewTransform,
};

#[derive(Serialize)]
struct ChartDocument<'a> {
    root: Option<NodeId>,
    viewport: Size,
    transform: ViewTransform,
    bounds: Bounds,
    nodes: Vec<NodeEntry<'a>>,
    edges: &'a [Edge],
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct NodeEntry<'a> {
    #[serde(flatten)]
    position: &'a PositionedNode,
    manager_like: bool,
    employee: &'a EmployeeRecord,
}

/// Writes nodes, edges, bounds and the initial transform as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent the output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Exporter for JsonExporter {
    fn render(&self, chart: &OrgChart) -> Result<String, Error> {
        info!(pretty = self.pretty; "Rendering chart to JSON");

        let layout = chart.layout();
        let nodes = layout
            .nodes()
            .iter()
            .filter_map(|position| {
                chart.hierarchy().node(position.id()).map(|node| NodeEntry {
                    position,
                    manager_like: node.is_manager_like(),
                    employee: node.record(),
                })
            })
            .collect();

        let document = ChartDocument {
            root: chart.hierarchy().root(),
            viewport: chart.viewport(),
            transform: chart.transform(),
            bounds: layout.bounds(),
            nodes,
            edges: layout.edges(),
            warnings: chart.warnings().iter().map(ToString::to_string).collect(),
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        rendered.map_err(|err| Error::Render(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::{ChartBuilder, config::AppConfig};

    #[test]
    fn test_json_dump_shape() {
        let chart = ChartBuilder::new(AppConfig::default())
            .build(vec![
                EmployeeRecord::new("1", "Root", "").with_email("root@x.com"),
                EmployeeRecord::new("2", "Ann", "")
                    .with_email("ann@x.com")
                    .with_manager("root@x.com"),
                EmployeeRecord::new("3", "Lost", "").with_manager("ghost@x.com"),
            ])
            .unwrap();

        let json = JsonExporter::new().with_pretty(true).render(&chart).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["root"], 0);
        assert_eq!(value["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(value["edges"].as_array().unwrap().len(), 2);
        assert_eq!(value["nodes"][0]["center"]["x"], 0.0);
        assert_eq!(value["nodes"][0]["employee"]["first_name"], "Root");
        assert_eq!(value["edges"][0]["parent"], 0);
        assert!(value["transform"]["scale"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_empty_chart() {
        let chart = ChartBuilder::new(AppConfig::default())
            .build(Vec::new())
            .unwrap();
        let value: Value =
            serde_json::from_str(&JsonExporter::new().render(&chart).unwrap()).unwrap();
        assert!(value["root"].is_null());
        assert!(value["nodes"].as_array().unwrap().is_empty());
    }
}
