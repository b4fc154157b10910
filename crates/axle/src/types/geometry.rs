/*! Geometry types for screen coordinates. */

use serde::{Deserialize, Serialize};

/// A 2D point in screen coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  /// Check if two points match within a margin of error.
  pub fn matches(&self, other: Point, margin: f64) -> bool {
    (self.x - other.x).abs() <= margin && (self.y - other.y).abs() <= margin
  }
}

impl From<(f64, f64)> for Point {
  fn from((x, y): (f64, f64)) -> Self {
    Self { x, y }
  }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Size {
  pub width: f64,
  pub height: f64,
}

impl Size {
  pub const fn new(width: f64, height: f64) -> Self {
    Self { width, height }
  }

  /// Check if two sizes match within a margin of error.
  pub fn matches(&self, other: Size, margin: f64) -> bool {
    (self.width - other.width).abs() <= margin && (self.height - other.height).abs() <= margin
  }
}

impl From<(f64, f64)> for Size {
  fn from((width, height): (f64, f64)) -> Self {
    Self { width, height }
  }
}
