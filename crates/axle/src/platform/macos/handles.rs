/*! Opaque `AXUIElement` handles with safe accessor methods.

All per-element unsafe code is encapsulated here.
*/

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use objc2_application_services::AXUIElement;
use objc2_core_foundation::{CFArray, CFHash, CFRetained, CFString, CFType};
use std::ffi::c_void;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;

use super::mapping::check;
use super::values::MacValue;
use crate::platform::PlatformHandle;
use crate::types::{ProcessId, Status};

// FFI binding for CFEqual (not exposed by objc2-core-foundation)
extern "C" {
  fn CFEqual(cf1: *const c_void, cf2: *const c_void) -> u8;
}

/// Owned reference to a UI element. Clone retains, drop releases.
#[derive(Clone)]
pub(crate) struct MacHandle {
  inner: CFRetained<AXUIElement>,
  /// Cached `CFHash` (computed once at construction)
  cached_hash: u64,
}

impl MacHandle {
  pub(super) fn new(element: CFRetained<AXUIElement>) -> Self {
    let cached_hash = CFHash(Some(&*element)) as u64;
    Self {
      inner: element,
      cached_hash,
    }
  }

  pub(super) fn inner(&self) -> &AXUIElement {
    &self.inner
  }

  /// Compare with another handle using `CFEqual` (local, no IPC).
  fn cf_equal(&self, other: &Self) -> bool {
    let self_ptr = CFRetained::as_ptr(&self.inner).as_ptr().cast::<c_void>();
    let other_ptr = CFRetained::as_ptr(&other.inner).as_ptr().cast::<c_void>();
    unsafe { CFEqual(self_ptr, other_ptr) != 0 }
  }

  fn copy_string_array(
    &self,
    copy: impl FnOnce(NonNull<*const CFArray>) -> objc2_application_services::AXError,
  ) -> Result<Vec<String>, Status> {
    let mut array_ptr: *const CFArray = std::ptr::null();
    check(copy(NonNull::from(&mut array_ptr)))?;
    let Some(array) = NonNull::new(array_ptr.cast_mut()) else {
      return Ok(Vec::new());
    };
    // SAFETY: name listings are arrays of CFStrings, returned +1
    let names = unsafe { CFRetained::<CFArray<CFString>>::from_raw(array.cast()) };
    Ok((0..names.len()).filter_map(|i| names.get(i)).map(|s| s.to_string()).collect())
  }
}

impl PlatformHandle for MacHandle {
  type Value = MacValue;

  fn pid(&self) -> Result<ProcessId, Status> {
    let mut pid: i32 = 0;
    check(unsafe { self.inner.pid(NonNull::from(&mut pid)) })?;
    Ok(ProcessId(pid))
  }

  fn attribute_names(&self) -> Result<Vec<String>, Status> {
    self.copy_string_array(|out| unsafe { self.inner.copy_attribute_names(out) })
  }

  fn copy_attribute(&self, name: &str) -> Result<MacValue, Status> {
    let attribute = CFString::from_str(name);
    let mut value: *const CFType = std::ptr::null();
    check(unsafe {
      self
        .inner
        .copy_attribute_value(&attribute, NonNull::from(&mut value))
    })?;
    let value = NonNull::new(value.cast_mut()).ok_or(Status::NoValue)?;
    Ok(MacValue::new(unsafe { CFRetained::from_raw(value) }))
  }

  fn attribute_count(&self, name: &str) -> Result<usize, Status> {
    let attribute = CFString::from_str(name);
    let mut count: isize = 0;
    check(unsafe {
      self
        .inner
        .attribute_value_count(&attribute, NonNull::from(&mut count))
    })?;
    Ok(count.max(0) as usize)
  }

  fn is_settable(&self, name: &str) -> Result<bool, Status> {
    let attribute = CFString::from_str(name);
    let mut settable: u8 = 0;
    check(unsafe {
      self
        .inner
        .is_attribute_settable(&attribute, NonNull::from(&mut settable))
    })?;
    Ok(settable != 0)
  }

  fn set_attribute(&self, name: &str, value: &MacValue) -> Result<(), Status> {
    let attribute = CFString::from_str(name);
    check(unsafe { self.inner.set_attribute_value(&attribute, value.as_cf()) })
  }

  fn set_messaging_timeout(&self, seconds: f32) -> Result<(), Status> {
    check(unsafe { self.inner.set_messaging_timeout(seconds) })
  }

  fn element_at_position(&self, x: f32, y: f32) -> Result<Self, Status> {
    let mut element: *const AXUIElement = std::ptr::null();
    check(unsafe {
      self
        .inner
        .copy_element_at_position(x, y, NonNull::from(&mut element))
    })?;
    let element = NonNull::new(element.cast_mut()).ok_or(Status::NoValue)?;
    Ok(Self::new(unsafe { CFRetained::from_raw(element) }))
  }

  fn action_names(&self) -> Result<Vec<String>, Status> {
    self.copy_string_array(|out| unsafe { self.inner.copy_action_names(out) })
  }

  fn perform_action(&self, action: &str) -> Result<(), Status> {
    let action = CFString::from_str(action);
    check(unsafe { self.inner.perform_action(&action) })
  }
}

impl Hash for MacHandle {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.cached_hash.hash(state);
  }
}

impl PartialEq for MacHandle {
  fn eq(&self, other: &Self) -> bool {
    self.cached_hash == other.cached_hash && self.cf_equal(other)
  }
}

impl Eq for MacHandle {}

// AXUIElement is an immutable CF handle; the service serializes requests.
unsafe impl Send for MacHandle {}
unsafe impl Sync for MacHandle {}
