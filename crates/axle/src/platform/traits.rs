/*!
Platform abstraction traits.

These traits define the contract between core code and the accessibility
service. Platform-specific code (e.g., macOS) implements them; core code only
uses these traits, never platform-specific types directly.

Every service call reports failure as a raw [`Status`]. Translation into
[`crate::AxleError`] happens in core code, where the attribute or operation
name is known.
*/

use std::ffi::CStr;
use std::hash::Hash;
use std::sync::Arc;

use crate::types::{Point, ProcessId, Size, Status};

/// Process-global service operations.
pub(crate) trait Platform: 'static {
  /// Element handle type for this platform.
  type Handle: PlatformHandle;
  /// Observer type for this platform.
  type Observer: PlatformObserver<Handle = Self::Handle>;

  /// Whether the calling process may use the service, optionally prompting
  /// the user to grant permission.
  fn is_enabled(prompt: bool) -> bool;

  /// Non-prompting trust check.
  fn is_trusted() -> bool;

  /// Handle for the application with the given process ID.
  fn application(pid: ProcessId) -> Self::Handle;

  /// Handle for the system-wide element.
  fn system_wide() -> Self::Handle;

  /// Create an observer for a process and attach its event source to the
  /// calling thread's event loop (default mode).
  fn create_observer(
    pid: ProcessId,
    sink: Arc<dyn NotificationSink>,
  ) -> Result<Self::Observer, Status>;

  /// Drive the calling thread's event loop until it is stopped.
  fn run_event_loop();
}

/// Per-handle operations.
///
/// `Clone` retains the native handle, `Drop` releases it. Equality and hashing
/// use native identity, so two independently obtained handles to the same node
/// compare equal.
pub(crate) trait PlatformHandle: Clone + Send + Sync + Hash + Eq + 'static {
  /// Native value type returned by attribute reads.
  type Value: NativeValue<Handle = Self>;

  fn pid(&self) -> Result<ProcessId, Status>;

  fn attribute_names(&self) -> Result<Vec<String>, Status>;

  /// Copy an attribute value. A successful read always carries a value.
  fn copy_attribute(&self, name: &str) -> Result<Self::Value, Status>;

  fn attribute_count(&self, name: &str) -> Result<usize, Status>;

  fn is_settable(&self, name: &str) -> Result<bool, Status>;

  fn set_attribute(&self, name: &str, value: &Self::Value) -> Result<(), Status>;

  fn set_messaging_timeout(&self, seconds: f32) -> Result<(), Status>;

  /// Hit-test at a screen position, relative to this handle's scope.
  fn element_at_position(&self, x: f32, y: f32) -> Result<Self, Status>;

  fn action_names(&self) -> Result<Vec<String>, Status>;

  fn perform_action(&self, action: &str) -> Result<(), Status>;
}

/// Notification registrations for one process. Unregisters from its event
/// loop on drop.
pub(crate) trait PlatformObserver: Send + Sync {
  type Handle: PlatformHandle;

  fn add_notification(&self, handle: &Self::Handle, name: &str) -> Result<(), Status>;

  fn remove_notification(&self, handle: &Self::Handle, name: &str) -> Result<(), Status>;
}

/// Receiver for notifications delivered by an observer.
///
/// Called on whichever thread drives the event loop the observer is attached
/// to. Implementations must not unwind.
pub(crate) trait NotificationSink: Send + Sync {
  /// `name` is `None` when the notification name could not be decoded.
  fn deliver(&self, name: Option<String>);
}

/// Runtime type tag of a native value, with its payload where one exists.
pub(crate) enum NativeKind<'a, V: NativeValue> {
  String(&'a V::Text),
  Boolean(bool),
  Element(V::Handle),
  /// Point wrapper; `None` if it refused to yield its components.
  Point(Option<Point>),
  /// Size wrapper; `None` if it refused to yield its components.
  Size(Option<Size>),
  /// Geometric rectangle: recognized, not decoded yet.
  Rect,
  /// Any other geometric wrapper kind (ranges, error wrappers, ...).
  OtherGeometry(u32),
  Array(Vec<V>),
  /// Unrecognized native type identifier.
  Unknown(usize),
}

/// A dynamically typed native value.
pub(crate) trait NativeValue: Sized {
  type Handle: PlatformHandle;
  type Text: NativeText + ?Sized;

  fn kind(&self) -> NativeKind<'_, Self>;

  fn from_point(point: Point) -> Result<Self, Status>;

  fn from_size(size: Size) -> Result<Self, Status>;

  fn from_bool(value: bool) -> Result<Self, Status>;
}

/// Native string with the two UTF-8 extraction paths the service offers.
pub(crate) trait NativeText {
  /// Length in UTF-16 code units. Zero means empty.
  fn utf16_len(&self) -> usize;

  /// Fast path: a borrowed, NUL-terminated UTF-8 view, when the native
  /// storage happens to hold one.
  fn borrowed_utf8(&self) -> Option<&CStr>;

  /// Upper bound, in bytes, of the UTF-8 form including the terminator.
  fn max_utf8_size(&self) -> usize;

  /// Slow path: copy the NUL-terminated UTF-8 form into `buffer`. Returns
  /// false if it does not fit or cannot be converted.
  fn copy_utf8(&self, buffer: &mut [u8]) -> bool;
}
