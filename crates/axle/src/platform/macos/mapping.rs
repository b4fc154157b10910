/*!
Mappings between macOS `AXError` / `AXValueType` and crate types.
*/

use objc2_application_services::{AXError, AXValueType};

use crate::types::Status;

/// `AXError` to `Result`, keeping the failure as a [`Status`].
pub(super) fn check(error: AXError) -> Result<(), Status> {
  let status = status_from_macos(error);
  if status.is_success() {
    Ok(())
  } else {
    Err(status)
  }
}

pub(super) const fn status_from_macos(error: AXError) -> Status {
  Status::from_code(error.0)
}

/// Geometric wrapper kinds, as far as decoding is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Geometry {
  Point,
  Size,
  Rect,
  Other(u32),
}

pub(super) fn geometry_from_macos(value_type: AXValueType) -> Geometry {
  if value_type == AXValueType::CGPoint {
    Geometry::Point
  } else if value_type == AXValueType::CGSize {
    Geometry::Size
  } else if value_type == AXValueType::CGRect {
    Geometry::Rect
  } else {
    Geometry::Other(value_type.0)
  }
}
