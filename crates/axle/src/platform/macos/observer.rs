/*!
`AXObserver` management and the notification callback.

# Context Design

`AXObserver` callbacks receive a raw `refcon` pointer. Each observer registers
its sink in a global context map under a fresh u64 id and hands macOS a boxed
handle holding only that id, so a callback that races with observer teardown
finds nothing instead of a dangling sink.
*/

#![allow(unsafe_code)]

use objc2_application_services::{AXObserver, AXUIElement};
use objc2_core_foundation::{kCFRunLoopDefaultMode, CFRetained, CFRunLoop, CFString};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, LazyLock};

use super::handles::MacHandle;
use super::mapping::check;
use crate::codec::text_to_string;
use crate::platform::{NotificationSink, PlatformObserver};
use crate::types::{ProcessId, Status};

/// Next available context ID.
static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Global registry mapping context IDs to notification sinks.
static OBSERVER_CONTEXTS: LazyLock<Mutex<HashMap<u64, Arc<dyn NotificationSink>>>> =
  LazyLock::new(|| Mutex::new(HashMap::new()));

/// Opaque handle passed to macOS callbacks.
#[repr(C)]
struct ObserverContextHandle {
  context_id: u64,
}

fn register_context(sink: Arc<dyn NotificationSink>) -> *mut ObserverContextHandle {
  let context_id = NEXT_CONTEXT_ID.fetch_add(1, AtomicOrdering::Relaxed);
  OBSERVER_CONTEXTS.lock().insert(context_id, sink);
  Box::into_raw(Box::new(ObserverContextHandle { context_id }))
}

fn unregister_context(handle_ptr: *mut ObserverContextHandle) {
  if handle_ptr.is_null() {
    return;
  }
  let handle = unsafe { Box::from_raw(handle_ptr) };
  OBSERVER_CONTEXTS.lock().remove(&handle.context_id);
}

/// Clones the sink so the map lock is not held while it runs.
fn lookup_context(handle_ptr: *const ObserverContextHandle) -> Option<Arc<dyn NotificationSink>> {
  if handle_ptr.is_null() {
    return None;
  }
  let handle = unsafe { &*handle_ptr };
  OBSERVER_CONTEXTS.lock().get(&handle.context_id).cloned()
}

/// Observer for one process, attached to the run loop of the thread that
/// created it.
pub(crate) struct MacObserver {
  observer: CFRetained<AXObserver>,
  run_loop: CFRetained<CFRunLoop>,
  context: *mut ObserverContextHandle,
}

impl MacObserver {
  pub(super) fn create(pid: ProcessId, sink: Arc<dyn NotificationSink>) -> Result<Self, Status> {
    let run_loop = CFRunLoop::current().ok_or(Status::Failure)?;

    let mut observer_ptr: *mut AXObserver = std::ptr::null_mut();
    check(unsafe {
      AXObserver::create(
        pid.0,
        Some(observer_callback),
        NonNull::from(&mut observer_ptr),
      )
    })?;
    let observer = NonNull::new(observer_ptr).ok_or(Status::Failure)?;
    let observer = unsafe { CFRetained::from_raw(observer) };

    // Callbacks only fire while this thread's run loop runs
    unsafe {
      let source = observer.run_loop_source();
      run_loop.add_source(Some(&source), kCFRunLoopDefaultMode);
    }

    Ok(Self {
      observer,
      run_loop,
      context: register_context(sink),
    })
  }
}

impl PlatformObserver for MacObserver {
  type Handle = MacHandle;

  fn add_notification(&self, handle: &MacHandle, name: &str) -> Result<(), Status> {
    let notification = CFString::from_str(name);
    check(unsafe {
      self
        .observer
        .add_notification(handle.inner(), &notification, self.context.cast::<c_void>())
    })
  }

  fn remove_notification(&self, handle: &MacHandle, name: &str) -> Result<(), Status> {
    let notification = CFString::from_str(name);
    check(unsafe {
      self
        .observer
        .remove_notification(handle.inner(), &notification)
    })
  }
}

impl Drop for MacObserver {
  fn drop(&mut self) {
    unsafe {
      let source = self.observer.run_loop_source();
      self
        .run_loop
        .remove_source(Some(&source), kCFRunLoopDefaultMode);
    }
    unregister_context(self.context);
  }
}

// The observer and run loop are CF objects; the context pointer is only
// dereferenced through the registry lock.
unsafe impl Send for MacObserver {}
unsafe impl Sync for MacObserver {}

unsafe extern "C-unwind" fn observer_callback(
  _observer: NonNull<AXObserver>,
  _element: NonNull<AXUIElement>,
  notification: NonNull<CFString>,
  refcon: *mut c_void,
) {
  let result = panic::catch_unwind(AssertUnwindSafe(|| {
    let Some(sink) = lookup_context(refcon.cast::<ObserverContextHandle>()) else {
      return;
    };
    let name = match text_to_string(unsafe { notification.as_ref() }) {
      Ok(name) => name,
      Err(err) => {
        log::debug!("Undecodable notification name: {err}");
        None
      }
    };
    sink.deliver(name);
  }));

  if result.is_err() {
    log::error!("Accessibility notification handler panicked");
  }
}
