/*!
Decoded attribute values.

A [`Value`] is the closed, host-level representation of whatever the
accessibility service returned for an attribute. Empty strings and empty
arrays both decode to [`Value::None`]: the service does not distinguish
"no value" from "empty collection" at the attribute level.
*/

#![allow(missing_docs)]

use serde::Serialize;

use crate::core::Element;
use crate::types::{Point, Size};

/// Tagged value for an attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
  /// Absent value (also: empty string, empty array).
  None,

  Boolean(bool),

  /// Non-empty UTF-8 text.
  String(String),

  /// Another node in the accessibility tree (windows, children, parents).
  Element(Element),

  Point(Point),

  Size(Size),

  /// Non-empty, possibly heterogeneous at the type level but in practice
  /// homogeneous, sequence of values.
  Array(Vec<Value>),
}

impl Value {
  pub const fn is_none(&self) -> bool {
    matches!(self, Self::None)
  }

  pub fn as_str(&self) -> Option<&str> {
    if let Self::String(s) = self {
      Some(s)
    } else {
      None
    }
  }

  pub const fn as_bool(&self) -> Option<bool> {
    if let Self::Boolean(b) = self {
      Some(*b)
    } else {
      None
    }
  }

  pub const fn as_element(&self) -> Option<&Element> {
    if let Self::Element(e) = self {
      Some(e)
    } else {
      None
    }
  }

  pub const fn as_point(&self) -> Option<Point> {
    if let Self::Point(p) = self {
      Some(*p)
    } else {
      None
    }
  }

  pub const fn as_size(&self) -> Option<Size> {
    if let Self::Size(s) = self {
      Some(*s)
    } else {
      None
    }
  }

  pub fn as_array(&self) -> Option<&[Value]> {
    if let Self::Array(items) = self {
      Some(items)
    } else {
      None
    }
  }

  /// Element references held by this value: itself if it is one, the element
  /// items if it is an array, nothing otherwise.
  pub fn elements(&self) -> Vec<&Element> {
    match self {
      Self::Element(e) => vec![e],
      Self::Array(items) => items.iter().filter_map(Value::as_element).collect(),
      Self::None | Self::Boolean(_) | Self::String(_) | Self::Point(_) | Self::Size(_) => {
        Vec::new()
      }
    }
  }

  /// Short name of the variant, for diagnostics.
  pub const fn kind_name(&self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Boolean(_) => "boolean",
      Self::String(_) => "string",
      Self::Element(_) => "element",
      Self::Point(_) => "point",
      Self::Size(_) => "size",
      Self::Array(_) => "array",
    }
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Self::Boolean(b)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Self::String(s.to_owned())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Self::String(s)
  }
}

impl From<Point> for Value {
  fn from(p: Point) -> Self {
    Self::Point(p)
  }
}

impl From<Size> for Value {
  fn from(s: Size) -> Self {
    Self::Size(s)
  }
}

impl From<Element> for Value {
  fn from(e: Element) -> Self {
    Self::Element(e)
  }
}

impl From<Vec<Value>> for Value {
  fn from(items: Vec<Value>) -> Self {
    Self::Array(items)
  }
}
