/*!
Element references.

# Module Structure

- `mod.rs` - `Element` struct, construction, identity, liveness, timeout
- `attributes.rs` - `keys()`, `get()`, `count()`, `can_set()`, `set()`, actions
- `subscriptions.rs` - callback slot, `watch()`/`unwatch()`, lazy observer
- `dispatch.rs` - notification delivery back into application code
- `service.rs` - factories and process-wide permission checks

# Ownership

An [`Element`] owns exactly one native handle. Clones share it (and its
observer and callback slot); the handle is released once, when the last clone
is dropped, and the observer is torn down with it.
*/

mod attributes;
mod dispatch;
mod service;
mod subscriptions;

pub use service::{
  application, element_at_position, is_enabled, is_trusted, run_event_loop, system_wide,
  DEFAULT_TIMEOUT,
};
pub use subscriptions::{CallbackResult, NotificationCallback};

use parking_lot::Mutex;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::a11y::attribute;
use crate::platform::{Handle, Observer, PlatformHandle};
use crate::types::{AxleError, AxleResult, ProcessId, Status};

/// Reference to a node in the accessibility tree.
///
/// Equality is native handle identity: two references to the same node are
/// equal even when obtained independently. There is no ordering.
#[derive(Clone)]
pub struct Element {
  inner: Arc<ElementInner>,
}

pub(crate) struct ElementInner {
  handle: Handle,
  /// Read once at construction.
  pid: Option<ProcessId>,
  /// Created on first `watch`, never recreated.
  observer: Mutex<Option<Observer>>,
  callback: Mutex<Option<NotificationCallback>>,
}

impl Element {
  /// Wrap a native handle, taking ownership of it.
  ///
  /// Never fails: a handle whose process cannot be determined gets no pid.
  pub(crate) fn from_handle(handle: Handle) -> Self {
    let pid = match handle.pid() {
      Ok(pid) => Some(pid),
      Err(status) => {
        log::trace!("No pid for element ({status:?})");
        None
      }
    };
    Self {
      inner: Arc::new(ElementInner {
        handle,
        pid,
        observer: Mutex::new(None),
        callback: Mutex::new(None),
      }),
    }
  }

  pub(crate) fn handle(&self) -> &Handle {
    &self.inner.handle
  }

  pub(crate) fn inner(&self) -> &Arc<ElementInner> {
    &self.inner
  }

  pub(crate) const fn from_inner(inner: Arc<ElementInner>) -> Self {
    Self { inner }
  }

  /// The process that owns this element, if the service reported one.
  pub fn pid(&self) -> Option<ProcessId> {
    self.inner.pid
  }

  /// Whether the handle still refers to a live node.
  ///
  /// Only an invalid-element status counts as dead; any other outcome of the
  /// probe (including a missing role attribute) means alive.
  pub fn is_alive(&self) -> bool {
    !matches!(
      self.inner.handle.copy_attribute(attribute::ROLE),
      Err(Status::InvalidElement)
    )
  }

  /// Set the messaging timeout for requests made through this element.
  ///
  /// `0.0` ([`DEFAULT_TIMEOUT`]) restores the service default. On the
  /// system-wide element this changes the timeout for all elements.
  pub fn set_timeout(&self, seconds: f32) -> AxleResult<()> {
    self
      .inner
      .handle
      .set_messaging_timeout(seconds)
      .map_err(|status| AxleError::service(status, "timeout"))
  }
}

impl PartialEq for Element {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner) || self.inner.handle == other.inner.handle
  }
}

impl Eq for Element {}

impl Hash for Element {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.inner.handle.hash(state);
  }
}

impl std::fmt::Debug for Element {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Element")
      .field("pid", &self.inner.pid)
      .finish_non_exhaustive()
  }
}

/// Elements serialize as their owning process; handles are not portable.
impl Serialize for Element {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut s = serializer.serialize_struct("Element", 1)?;
    s.serialize_field("pid", &self.inner.pid)?;
    s.end()
  }
}

impl Drop for ElementInner {
  fn drop(&mut self) {
    // Observer registrations refer to the handle; tear them down first.
    if self.observer.get_mut().take().is_some() {
      log::debug!("Released observer for element (pid {:?})", self.pid);
    }
    log::trace!("Releasing element handle (pid {:?})", self.pid);
  }
}
