//! Geometric primitives for tree layout and viewport math.
//!
//! This module provides the value types shared by the layout engine, the
//! viewport controller and the exporters.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in chart or screen space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//!
//! # Coordinate System
//!
//! Coordinates follow the SVG convention:
//!
//! ```text
//!   (0,0) ────────► +X   (sibling axis)
//!     │
//!     │
//!     ▼
//!    +Y                  (depth axis)
//! ```
//!
//! The tree root sits at depth 0 and deeper levels grow toward +Y.

use serde::Serialize;

/// A 2D point in chart coordinate space.
///
/// # Examples
///
/// ```
/// # use orgchart_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orgchart_core::geometry::Point;
    /// let point = Point::new(10.0, 20.0);
    ///
    /// let doubled = point.scale(2.0);
    /// assert_eq!(doubled.x(), 20.0);
    /// assert_eq!(doubled.y(), 40.0);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with padding added to both width and height
    pub fn add_padding(self, insets: Insets) -> Self {
        Self {
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Multiplies both dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    /// Returns true if either dimension is zero or negative.
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Returns true when the bounds enclose no area.
    ///
    /// An empty layout produces `Bounds::default()`, which is degenerate.
    pub fn is_degenerate(self) -> bool {
        self.to_size().is_degenerate()
    }

    /// Checks whether the point lies inside the bounds (edges included).
    pub fn contains_point(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Checks whether `other` lies entirely inside these bounds.
    pub fn contains(self, other: Bounds) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use orgchart_core::geometry::{Bounds, Point, Size};
    /// let root = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let child = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = root.merge(&child);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.min_y(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(10.0, 20.0);
        assert_eq!(point.x(), 10.0);
        assert_eq!(point.y(), 20.0);
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(3.0, 4.0);
        let p2 = Point::new(1.0, -2.0);
        assert_eq!(p1.add_point(p2), Point::new(4.0, 2.0));
        assert_eq!(p1.sub_point(p2), Point::new(2.0, 6.0));
    }

    #[test]
    fn test_point_with_y() {
        let point = Point::new(1.0, 2.0).with_y(7.0);
        assert_eq!(point, Point::new(1.0, 7.0));
    }

    #[test]
    fn test_bounds_new_from_center() {
        let bounds = Bounds::new_from_center(Point::new(10.0, 10.0), Size::new(4.0, 6.0));
        assert_eq!(bounds.min_x(), 8.0);
        assert_eq!(bounds.min_y(), 7.0);
        assert_eq!(bounds.max_x(), 12.0);
        assert_eq!(bounds.max_y(), 13.0);
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(5.0, 10.0), Size::new(20.0, 30.0));
        assert_eq!(bounds.min_point(), Point::new(5.0, 10.0));
        assert_eq!(bounds.width(), 20.0);
        assert_eq!(bounds.height(), 30.0);
        assert_eq!(bounds.center(), Point::new(15.0, 25.0));
    }

    #[test]
    fn test_bounds_default_is_degenerate() {
        let bounds = Bounds::default();
        assert!(bounds.is_degenerate());
        assert_eq!(bounds.to_size(), Size::default());
        assert_eq!(bounds.center(), Point::default());
    }

    #[test]
    fn test_bounds_contains() {
        let outer = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 100.0));
        let inner = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(20.0, 20.0));
        assert!(outer.contains(inner));
        assert!(!inner.contains(outer));
        assert!(outer.contains_point(Point::new(100.0, 0.0)));
        assert!(!outer.contains_point(Point::new(100.1, 0.0)));
    }

    #[test]
    fn test_size_padding_and_scale() {
        let size = Size::new(10.0, 20.0).add_padding(Insets::uniform(5.0));
        assert_eq!(size, Size::new(20.0, 30.0));
        assert_eq!(size.scale(0.5), Size::new(10.0, 15.0));
        assert!(!size.is_degenerate());
        assert!(Size::new(0.0, 10.0).is_degenerate());
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::uniform(3.0);
        assert_eq!(insets.horizontal_sum(), 6.0);
        assert_eq!(insets.vertical_sum(), 6.0);
    }
}
