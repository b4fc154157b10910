/*!
Value codec: native attribute values to [`Value`] and back.

Decoding is recursive for arrays with no depth limit. Encoding only exists for
the attributes listed in [`AttributeKind`].

Strings come out of the service through one of two paths: a borrowed UTF-8
view when the native storage already holds one, or a sized copy into an owned
buffer otherwise. Both produce the same text.
*/

use crate::a11y::{AttributeKind, Value};
use crate::core::Element;
use crate::platform::{Native, NativeKind, NativeText, NativeValue};
use crate::types::{AxleError, AxleResult, Point, Size};

/// Decode a native value.
pub(crate) fn decode(native: &Native) -> AxleResult<Value> {
  match native.kind() {
    NativeKind::String(text) => Ok(text_to_string(text)?.map_or(Value::None, Value::String)),
    NativeKind::Boolean(b) => Ok(Value::Boolean(b)),
    NativeKind::Element(handle) => Ok(Value::Element(Element::from_handle(handle))),
    NativeKind::Point(point) => point
      .map(Value::Point)
      .ok_or_else(|| AxleError::DecodeFailure("point".into())),
    NativeKind::Size(size) => size
      .map(Value::Size)
      .ok_or_else(|| AxleError::DecodeFailure("size".into())),
    NativeKind::Rect => Err(AxleError::UnsupportedValueKind("rectangle".into())),
    NativeKind::OtherGeometry(kind) => Err(AxleError::UnsupportedValueKind(format!(
      "geometry wrapper {kind}"
    ))),
    NativeKind::Array(items) => {
      if items.is_empty() {
        return Ok(Value::None);
      }
      items
        .iter()
        .map(decode)
        .collect::<AxleResult<Vec<_>>>()
        .map(Value::Array)
    }
    NativeKind::Unknown(type_id) => Err(AxleError::UnsupportedValueKind(format!(
      "native type {type_id}"
    ))),
  }
}

/// Encode `value` for writing to an attribute of the given kind.
///
/// Fails with `InvalidShape` before anything is written if the value does not
/// have the shape the attribute requires.
pub(crate) fn encode(value: &Value, kind: AttributeKind) -> AxleResult<Native> {
  let invalid = || AxleError::InvalidShape {
    attribute: kind.attribute().to_owned(),
    expected: kind.expected_shape(),
  };
  let native = match kind {
    AttributeKind::Position => {
      let (x, y) = float_pair(value).ok_or_else(invalid)?;
      Native::from_point(Point::new(x, y))
    }
    AttributeKind::Size => {
      let (width, height) = float_pair(value).ok_or_else(invalid)?;
      Native::from_size(Size::new(width, height))
    }
    AttributeKind::Hidden => Native::from_bool(value.as_bool().ok_or_else(invalid)?),
  };
  native.map_err(|status| AxleError::from_status(status, kind.attribute()))
}

/// Both geometric variants are a pair of floats on the write side.
fn float_pair(value: &Value) -> Option<(f64, f64)> {
  match value {
    Value::Point(p) => Some((p.x, p.y)),
    Value::Size(s) => Some((s.width, s.height)),
    Value::None | Value::Boolean(_) | Value::String(_) | Value::Element(_) | Value::Array(_) => {
      None
    }
  }
}

/// Extract UTF-8 text from a native string. Empty strings yield `None`.
pub(crate) fn text_to_string<T: NativeText + ?Sized>(text: &T) -> AxleResult<Option<String>> {
  if text.utf16_len() == 0 {
    return Ok(None);
  }

  if let Some(borrowed) = text.borrowed_utf8() {
    return borrowed
      .to_str()
      .map(|s| Some(s.to_owned()))
      .map_err(|_| AxleError::DecodeFailure("string".into()));
  }

  let mut buffer = vec![0_u8; text.max_utf8_size()];
  if !text.copy_utf8(&mut buffer) {
    return Err(AxleError::DecodeFailure("string".into()));
  }
  let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
  buffer.truncate(end);
  String::from_utf8(buffer)
    .map(Some)
    .map_err(|_| AxleError::DecodeFailure("string".into()))
}
