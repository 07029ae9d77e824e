//! Stateful pan/zoom/selection for one view of a chart.

use log::{debug, trace};

use orgchart_core::geometry::{Bounds, Point, Size};

use super::{
    FitMargins, ScaleRange, ViewTransform, apply_pan, apply_zoom, compute_initial_transform,
};
use crate::{
    config::ViewportConfig,
    hierarchy::{Hierarchy, HierarchyNode, NodeId},
    layout::TreeLayout,
};

/// Current transform, the fit it started from, and the selected node.
///
/// The selection and the transform are independent: zooming keeps the
/// selection and selecting never moves the view.
///
/// # Examples
///
/// ```
/// use orgchart::viewport::ViewportController;
/// use orgchart_core::geometry::{Bounds, Point, Size};
///
/// let mut view = ViewportController::default();
/// let bounds = Bounds::new_from_top_left(Point::new(-100.0, 0.0), Size::new(200.0, 100.0));
/// view.fit(bounds, Size::new(800.0, 600.0));
///
/// view.zoom_at_center(0.5);
/// view.pan(Point::new(10.0, 0.0));
/// assert_eq!(view.transform().scale(), 1.0);
///
/// view.reset();
/// assert_eq!(view.transform(), view.initial_transform());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    range: ScaleRange,
    margins: FitMargins,
    viewport: Size,
    initial: ViewTransform,
    current: ViewTransform,
    selected: Option<NodeId>,
}

impl ViewportController {
    pub fn new(range: ScaleRange, margins: FitMargins) -> Self {
        Self {
            range,
            margins,
            ..Self::default()
        }
    }

    /// Creates a controller from the `[viewport]` configuration section.
    pub fn from_config(config: &ViewportConfig) -> Self {
        Self::new(config.scale_range(), config.margins())
    }

    pub fn transform(&self) -> ViewTransform {
        self.current
    }

    /// The transform produced by the most recent [`fit`](Self::fit).
    pub fn initial_transform(&self) -> ViewTransform {
        self.initial
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn scale_range(&self) -> ScaleRange {
        self.range
    }

    /// Fits `bounds` into `viewport` and makes the result the reset target.
    pub fn fit(&mut self, bounds: Bounds, viewport: Size) -> ViewTransform {
        self.viewport = viewport;
        self.initial = compute_initial_transform(bounds, viewport, self.range, self.margins);
        self.current = self.initial;
        debug!(
            scale = self.current.scale(),
            width = viewport.width(),
            height = viewport.height();
            "View fitted"
        );
        self.current
    }

    /// Zooms by `factor` around the screen point `pivot`.
    pub fn zoom(&mut self, factor: f32, pivot: Point) -> ViewTransform {
        self.current = apply_zoom(self.current, factor, pivot, self.range);
        trace!(factor, scale = self.current.scale(); "Zoomed");
        self.current
    }

    /// Zooms by `factor` around the middle of the viewport.
    pub fn zoom_at_center(&mut self, factor: f32) -> ViewTransform {
        let pivot = Point::new(self.viewport.width() / 2.0, self.viewport.height() / 2.0);
        self.zoom(factor, pivot)
    }

    pub fn pan(&mut self, delta: Point) -> ViewTransform {
        self.current = apply_pan(self.current, delta);
        self.current
    }

    /// Returns to the most recent initial fit.
    pub fn reset(&mut self) -> ViewTransform {
        self.current = self.initial;
        self.current
    }

    pub fn select(&mut self, node: Option<NodeId>) {
        self.selected = node;
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Looks up the selected node in `hierarchy`.
    ///
    /// Returns `None` when nothing is selected or the id is not in this
    /// hierarchy.
    pub fn selected_node<'a>(&self, hierarchy: &'a Hierarchy) -> Option<&'a HierarchyNode> {
        self.selected.and_then(|id| hierarchy.node(id))
    }

    /// Selects the node drawn under `screen_point`. Clicking empty space
    /// clears the selection.
    pub fn select_at(&mut self, screen_point: Point, layout: &TreeLayout) -> Option<NodeId> {
        let chart_point = self.current.invert(screen_point);
        self.selected = layout.hit_test(chart_point);
        trace!(
            x = chart_point.x(),
            y = chart_point.y(),
            selected:? = self.selected;
            "Selection by point"
        );
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use orgchart_core::employee::EmployeeRecord;

    use super::*;
    use crate::{hierarchy::Resolver, layout::TidyTree};

    fn chart() -> (Hierarchy, TreeLayout) {
        let records = vec![
            EmployeeRecord::new("1", "Root", "").with_email("root@x.com"),
            EmployeeRecord::new("2", "Ann", "")
                .with_email("ann@x.com")
                .with_manager("root@x.com"),
        ];
        let hierarchy = Resolver::default().resolve(&records).into_hierarchy();
        let layout = TidyTree::default().layout(&hierarchy);
        (hierarchy, layout)
    }

    #[test]
    fn test_fit_then_reset_after_interaction() {
        let (_, layout) = chart();
        let mut view = ViewportController::default();
        let initial = view.fit(layout.bounds(), Size::new(1280.0, 800.0));

        view.zoom(1.7, Point::new(100.0, 100.0));
        view.pan(Point::new(-50.0, 25.0));
        assert_ne!(view.transform(), initial);

        assert_eq!(view.reset(), initial);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view =
            ViewportController::new(ScaleRange::new(0.5, 1.5).unwrap(), FitMargins::default());
        view.fit(
            Bounds::new_from_top_left(Point::default(), Size::new(100.0, 100.0)),
            Size::new(200.0, 200.0),
        );
        assert!(approx_eq!(f32, view.transform().scale(), 1.2));
        assert_eq!(view.zoom_at_center(10.0).scale(), 1.5);
        assert_eq!(view.zoom_at_center(0.01).scale(), 0.5);
    }

    #[test]
    fn test_select_at_goes_through_inverse_transform() {
        let (hierarchy, layout) = chart();
        let mut view = ViewportController::default();
        view.fit(layout.bounds(), Size::new(1280.0, 800.0));

        let ann = hierarchy.find_by_email("ann@x.com").unwrap();
        let screen = view.transform().apply(layout.node(ann).unwrap().center());
        assert_eq!(view.select_at(screen, &layout), Some(ann));
        assert_eq!(view.selected_node(&hierarchy).unwrap().record().first_name(), "Ann");

        assert_eq!(view.select_at(Point::new(-1000.0, -1000.0), &layout), None);
        assert!(view.selected_node(&hierarchy).is_none());
    }

    #[test]
    fn test_selection_survives_zoom_and_pan() {
        let (hierarchy, _) = chart();
        let mut view = ViewportController::default();
        view.select(hierarchy.root());
        view.zoom_at_center(2.0);
        view.pan(Point::new(5.0, 5.0));
        assert_eq!(view.selected(), hierarchy.root());
    }

    #[test]
    fn test_selected_node_unknown_id() {
        let mut view = ViewportController::default();
        view.select(Some(NodeId(42)));
        assert!(view.selected_node(&Hierarchy::empty()).is_none());
    }
}
