/*!
Native status codes reported by the accessibility service.

The numeric values are the platform's `AXError` codes. Codes outside the
known set are carried through untouched as [`Status::Unknown`].
*/

/// Status code returned by an accessibility service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
  Success,
  Failure,
  IllegalArgument,
  /// The handle no longer refers to a live node.
  InvalidElement,
  InvalidObserver,
  CannotComplete,
  AttributeUnsupported,
  ActionUnsupported,
  NotificationUnsupported,
  NotImplemented,
  NotificationAlreadyRegistered,
  NotificationNotRegistered,
  /// The service is disabled or not permitted for this context.
  ApiDisabled,
  NoValue,
  ParameterizedAttributeUnsupported,
  NotEnoughPrecision,
  Unknown(i32),
}

impl Status {
  /// Decode a raw status code.
  pub const fn from_code(code: i32) -> Self {
    match code {
      0 => Self::Success,
      -25200 => Self::Failure,
      -25201 => Self::IllegalArgument,
      -25202 => Self::InvalidElement,
      -25203 => Self::InvalidObserver,
      -25204 => Self::CannotComplete,
      -25205 => Self::AttributeUnsupported,
      -25206 => Self::ActionUnsupported,
      -25207 => Self::NotificationUnsupported,
      -25208 => Self::NotImplemented,
      -25209 => Self::NotificationAlreadyRegistered,
      -25210 => Self::NotificationNotRegistered,
      -25211 => Self::ApiDisabled,
      -25212 => Self::NoValue,
      -25213 => Self::ParameterizedAttributeUnsupported,
      -25214 => Self::NotEnoughPrecision,
      other => Self::Unknown(other),
    }
  }

  /// The raw status code.
  pub const fn code(self) -> i32 {
    match self {
      Self::Success => 0,
      Self::Failure => -25200,
      Self::IllegalArgument => -25201,
      Self::InvalidElement => -25202,
      Self::InvalidObserver => -25203,
      Self::CannotComplete => -25204,
      Self::AttributeUnsupported => -25205,
      Self::ActionUnsupported => -25206,
      Self::NotificationUnsupported => -25207,
      Self::NotImplemented => -25208,
      Self::NotificationAlreadyRegistered => -25209,
      Self::NotificationNotRegistered => -25210,
      Self::ApiDisabled => -25211,
      Self::NoValue => -25212,
      Self::ParameterizedAttributeUnsupported => -25213,
      Self::NotEnoughPrecision => -25214,
      Self::Unknown(code) => code,
    }
  }

  pub const fn is_success(self) -> bool {
    matches!(self, Self::Success)
  }
}
