//! Viewport fitting and pan/zoom math.
//!
//! The free functions here are pure: they take the current [`ViewTransform`]
//! and return the next one. [`ViewportController`] keeps the state of one
//! interactive view on top of them.
//!
//! A [`ViewTransform`] maps chart coordinates to screen coordinates:
//!
//! ```text
//! screen = chart * scale + translation
//! ```

mod controller;

pub use controller::ViewportController;

use log::debug;
use serde::Serialize;

use orgchart_core::geometry::{Bounds, Point, Size};

/// Uniform scale followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransform {
    translation: Point,
    scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            translation: Point::default(),
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn new(translation: Point, scale: f32) -> Self {
        Self { translation, scale }
    }

    pub fn translation(&self) -> Point {
        self.translation
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Maps a chart point to the screen.
    pub fn apply(&self, point: Point) -> Point {
        point.scale(self.scale).add_point(self.translation)
    }

    /// Maps a screen point back to the chart.
    pub fn invert(&self, point: Point) -> Point {
        point.sub_point(self.translation).scale(1.0 / self.scale)
    }

    /// Maps chart bounds to screen bounds.
    pub fn apply_bounds(&self, bounds: Bounds) -> Bounds {
        Bounds::new_from_top_left(
            self.apply(bounds.min_point()),
            bounds.to_size().scale(self.scale),
        )
    }
}

/// Allowed zoom interval, `0 < min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    min: f32,
    max: f32,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self { min: 0.1, max: 2.0 }
    }
}

impl ScaleRange {
    /// # Errors
    ///
    /// Returns a message when the bounds are not finite, not positive, or
    /// out of order.
    pub fn new(min: f32, max: f32) -> Result<Self, String> {
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(format!(
                "scale range must satisfy 0 < min_scale <= max_scale, got {min}..{max}"
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Clamps `scale` into the range. NaN maps to `min`.
    pub fn clamp(&self, scale: f32) -> f32 {
        if scale.is_nan() {
            self.min
        } else {
            scale.clamp(self.min, self.max)
        }
    }

    pub fn contains(&self, scale: f32) -> bool {
        scale >= self.min && scale <= self.max
    }
}

/// Screen-space margins kept around the fitted tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitMargins {
    /// Clearance on the left, right and bottom.
    margin: f32,
    /// Offset of the tree top from the viewport top.
    top: f32,
}

impl Default for FitMargins {
    fn default() -> Self {
        Self {
            margin: 40.0,
            top: 24.0,
        }
    }
}

impl FitMargins {
    pub fn new(margin: f32, top: f32) -> Self {
        Self { margin, top }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn top(&self) -> f32 {
        self.top
    }
}

/// Computes the transform that fits `bounds` into `viewport`.
///
/// The scale is the largest one that fits the bounds plus margins on both
/// axes, clamped to `range`. The bounds are centered horizontally and their
/// top is placed at the top margin, unless that pushes their center below the
/// middle of the viewport, in which case the center is held at the middle.
///
/// Zero-area bounds (an empty chart) get the minimum scale with their center
/// in the middle of the viewport. A viewport without area gets the clamped
/// unit scale and no translation.
///
/// # Examples
///
/// ```
/// use orgchart::viewport::{FitMargins, ScaleRange, compute_initial_transform};
/// use orgchart_core::geometry::{Bounds, Point, Size};
///
/// let bounds = Bounds::new_from_top_left(Point::new(-100.0, 0.0), Size::new(200.0, 100.0));
/// let transform = compute_initial_transform(
///     bounds,
///     Size::new(800.0, 600.0),
///     ScaleRange::default(),
///     FitMargins::default(),
/// );
///
/// assert_eq!(transform.scale(), 2.0);
/// assert_eq!(transform.apply(bounds.center()).x(), 400.0);
/// assert_eq!(transform.apply(bounds.min_point()).y(), 24.0);
/// ```
pub fn compute_initial_transform(
    bounds: Bounds,
    viewport: Size,
    range: ScaleRange,
    margins: FitMargins,
) -> ViewTransform {
    let (width, height) = (viewport.width(), viewport.height());
    if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
        debug!(width, height; "Viewport has no area, using unit transform");
        return ViewTransform::new(Point::default(), range.clamp(1.0));
    }

    let center = bounds.center();
    let screen_center_x = width / 2.0;

    if bounds.is_degenerate() {
        let scale = range.min();
        let translation = Point::new(
            screen_center_x - center.x() * scale,
            height / 2.0 - center.y() * scale,
        );
        debug!(scale; "Degenerate bounds, centering at minimum scale");
        return ViewTransform::new(translation, scale);
    }

    let available_width = width - 2.0 * margins.margin();
    let available_height = height - margins.top() - margins.margin();
    let fit = (available_width / bounds.width()).min(available_height / bounds.height());
    let scale = range.clamp(fit);

    let top_aligned_center_y = margins.top() + bounds.height() * scale / 2.0;
    let screen_center_y = top_aligned_center_y.min(height / 2.0);

    let translation = Point::new(
        screen_center_x - center.x() * scale,
        screen_center_y - center.y() * scale,
    );
    debug!(fit, scale, tx = translation.x(), ty = translation.y(); "Initial transform computed");
    ViewTransform::new(translation, scale)
}

/// Multiplies the scale by `factor`, keeping the chart point under the
/// screen point `pivot` fixed.
///
/// The result is clamped to `range`. Non-finite and non-positive factors
/// leave the transform unchanged.
pub fn apply_zoom(
    current: ViewTransform,
    factor: f32,
    pivot: Point,
    range: ScaleRange,
) -> ViewTransform {
    if !(factor.is_finite() && factor > 0.0) {
        return current;
    }
    let scale = range.clamp(current.scale * factor);
    let anchor = current.invert(pivot);
    ViewTransform::new(pivot.sub_point(anchor.scale(scale)), scale)
}

/// Moves the view by a screen-space `delta`. Panning is not bounded.
pub fn apply_pan(current: ViewTransform, delta: Point) -> ViewTransform {
    ViewTransform::new(current.translation.add_point(delta), current.scale)
}
