//! Color handling for rendered org charts
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, so configuration can accept any CSS color string.

use std::str::FromStr;

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#ff0000",
    /// "rgb(255, 0, 0)" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use orgchart_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_string(), "black");
    }

    #[test]
    fn test_color_alpha_from_rgba() {
        let color = Color::new("rgba(255, 0, 0, 0.5)").unwrap();
        assert!((color.alpha() - 0.5).abs() < 0.001);
        assert!((Color::new("red").unwrap().alpha() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_color_error_mentions_input() {
        let err = Color::new("nope").unwrap_err();
        assert!(err.contains("nope"));
    }
}
