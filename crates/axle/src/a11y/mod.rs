/*! Accessibility vocabulary: decoded values, attribute and notification names. */

pub mod attribute;
pub mod notification;
mod value;

pub use attribute::AttributeKind;
pub use value::Value;
