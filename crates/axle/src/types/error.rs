/*! Error types for axle operations. */

use super::Status;

/// Errors that can occur during axle operations.
///
/// Service statuses are translated by [`AxleError::from_status`]. The codec
/// variants (`InvalidShape`, `UnsupportedValueKind`, `DecodeFailure`) never
/// originate from the service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AxleError {
  #[error("This element does not possess the attribute {0}.")]
  AttributeNotFound(String),

  #[error("This element is no longer valid (perhaps the application has been closed?) [{0}].")]
  InvalidElement(String),

  #[error(
    "This element does not respond to accessibility requests for {0} (perhaps accessibility is not enabled on the system?)."
  )]
  ServiceDisabled(String),

  #[error("{0} is not implemented for this element.")]
  NotImplemented(String),

  #[error("The attribute {0} has no value.")]
  NoValue(String),

  #[error("The request for {0} could not be completed (perhaps the application is not responding?).")]
  CannotComplete(String),

  #[error("Invalid argument sent with the request for {0}.")]
  IllegalArgument(String),

  #[error("The {0} attribute cannot be modified.")]
  NotSettable(String),

  #[error("Setting {attribute} requires {expected}.")]
  InvalidShape {
    attribute: String,
    expected: &'static str,
  },

  #[error("Values of kind {0} cannot be decoded yet.")]
  UnsupportedValueKind(String),

  #[error("The {0} value cannot be retrieved.")]
  DecodeFailure(String),

  #[error("Must have a process id to watch for notifications.")]
  MissingProcessId,

  #[error("Error {code} encountered with {context}.")]
  ServiceError { context: String, code: i32 },
}

impl AxleError {
  /// Translate a native status into an error, keeping `context` (the attribute
  /// or operation name) in the message.
  ///
  /// Total over all statuses: `Success` maps to a `ServiceError` with code 0.
  pub fn from_status(status: Status, context: impl Into<String>) -> Self {
    let context = context.into();
    match status {
      Status::AttributeUnsupported => Self::AttributeNotFound(context),
      Status::InvalidElement => Self::InvalidElement(context),
      Status::ApiDisabled => Self::ServiceDisabled(context),
      Status::NotImplemented => Self::NotImplemented(context),
      Status::NoValue => Self::NoValue(context),
      Status::CannotComplete => Self::CannotComplete(context),
      Status::IllegalArgument => Self::IllegalArgument(context),
      Status::Success
      | Status::Failure
      | Status::InvalidObserver
      | Status::ActionUnsupported
      | Status::NotificationUnsupported
      | Status::NotificationAlreadyRegistered
      | Status::NotificationNotRegistered
      | Status::ParameterizedAttributeUnsupported
      | Status::NotEnoughPrecision
      | Status::Unknown(_) => Self::ServiceError {
        context,
        code: status.code(),
      },
    }
  }

  /// Catch-all service error for calls whose failures are not classified.
  pub fn service(status: Status, context: impl Into<String>) -> Self {
    Self::ServiceError {
      context: context.into(),
      code: status.code(),
    }
  }
}

/// Result type for axle operations.
pub type AxleResult<T> = Result<T, AxleError>;

/// Failures contained at the notification dispatch boundary.
///
/// These are logged by the dispatcher and never returned into the native
/// event loop.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
  #[error("Notification {name:?} arrived but no callback is installed")]
  NoCallback { name: Option<String> },

  #[error("Notification callback failed: {0}")]
  CallbackFailed(Box<dyn std::error::Error + Send + Sync>),

  #[error("Notification callback panicked: {0}")]
  CallbackPanicked(String),
}
