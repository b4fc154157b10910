/*!
Attribute names and the subset of attributes with a defined write encoding.
*/

#![allow(missing_docs)]

pub const ROLE: &str = "AXRole";
pub const ROLE_DESCRIPTION: &str = "AXRoleDescription";
pub const SUBROLE: &str = "AXSubrole";
pub const TITLE: &str = "AXTitle";
pub const VALUE: &str = "AXValue";
pub const POSITION: &str = "AXPosition";
pub const SIZE: &str = "AXSize";
pub const HIDDEN: &str = "AXHidden";
pub const WINDOWS: &str = "AXWindows";
pub const CHILDREN: &str = "AXChildren";
pub const PARENT: &str = "AXParent";
pub const FOCUSED_APPLICATION: &str = "AXFocusedApplication";
pub const FOCUSED_WINDOW: &str = "AXFocusedWindow";
pub const MAIN_WINDOW: &str = "AXMainWindow";

/// Attributes whose values this crate knows how to write.
///
/// Anything else is rejected by `Element::set` with `NotImplemented`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
  /// `AXPosition`: a point.
  Position,
  /// `AXSize`: a size.
  Size,
  /// `AXHidden`: a boolean.
  Hidden,
}

impl AttributeKind {
  pub const ALL: &'static [Self] = &[Self::Position, Self::Size, Self::Hidden];

  /// Look up the write encoding for an attribute name.
  pub fn for_attribute(name: &str) -> Option<Self> {
    match name {
      POSITION => Some(Self::Position),
      SIZE => Some(Self::Size),
      HIDDEN => Some(Self::Hidden),
      _ => None,
    }
  }

  pub const fn attribute(self) -> &'static str {
    match self {
      Self::Position => POSITION,
      Self::Size => SIZE,
      Self::Hidden => HIDDEN,
    }
  }

  /// Human description of the value shape this attribute accepts.
  pub const fn expected_shape(self) -> &'static str {
    match self {
      Self::Position | Self::Size => "a pair of exactly two floats",
      Self::Hidden => "a boolean",
    }
  }
}
