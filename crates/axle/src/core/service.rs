/*!
Entry points: element factories and process-wide permission checks.
*/

use super::Element;
use crate::a11y::attribute;
use crate::platform::{CurrentPlatform, Platform, PlatformHandle};
use crate::types::{AxleError, AxleResult, ProcessId, Status};

/// Messaging timeout that restores the service default.
pub const DEFAULT_TIMEOUT: f32 = 0.0;

/// Whether this process may use the accessibility service.
///
/// With `prompt`, the system asks the user to grant access if it has not
/// been granted yet. The answer reflects the state before any prompt.
pub fn is_enabled(prompt: bool) -> bool {
  CurrentPlatform::is_enabled(prompt)
}

/// Whether this process is trusted by the accessibility service. Never prompts.
pub fn is_trusted() -> bool {
  CurrentPlatform::is_trusted()
}

/// Reference to the application with the given process id.
///
/// The reference is probed before it is returned: a process that does not
/// exist fails with `InvalidElement`, and a service that refuses to talk to
/// it fails with `ServiceDisabled`.
pub fn application(pid: impl Into<ProcessId>) -> AxleResult<Element> {
  let pid = pid.into();
  let handle = CurrentPlatform::application(pid);
  match handle.copy_attribute(attribute::ROLE) {
    Err(status @ (Status::InvalidElement | Status::ApiDisabled)) => {
      Err(AxleError::from_status(status, format!("application {pid}")))
    }
    Ok(_) | Err(_) => Ok(Element::from_handle(handle)),
  }
}

/// Reference to the system-wide element.
pub fn system_wide() -> Element {
  Element::from_handle(CurrentPlatform::system_wide())
}

/// The element at a screen position.
///
/// Hit-tests within `scope` when given, otherwise across the whole system.
pub fn element_at_position(x: f32, y: f32, scope: Option<&Element>) -> AxleResult<Element> {
  let found = match scope {
    Some(element) => element.handle().element_at_position(x, y),
    None => CurrentPlatform::system_wide().element_at_position(x, y),
  };
  found
    .map(Element::from_handle)
    .map_err(|status| AxleError::from_status(status, "(element at position)"))
}

/// Run the calling thread's event loop, delivering notifications for
/// observers created on this thread. Returns when the loop is stopped.
pub fn run_event_loop() {
  CurrentPlatform::run_event_loop();
}
