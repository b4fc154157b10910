/*!
macOS backend: `AXUIElement`, `AXObserver` and CoreFoundation.

- `handles.rs` - element handles and per-element requests
- `values.rs` - native values, geometry wrappers, `CFString` text
- `observer.rs` - observers, run loop attachment, notification callback
- `mapping.rs` - `AXError` / `AXValueType` mappings
*/

#![allow(unsafe_code)]

mod handles;
mod mapping;
mod observer;
mod values;

use objc2_application_services::{
  kAXTrustedCheckOptionPrompt, AXIsProcessTrusted, AXIsProcessTrustedWithOptions, AXUIElement,
};
use objc2_core_foundation::{CFBoolean, CFDictionary, CFRunLoop};
use std::sync::Arc;

use super::{NotificationSink, Platform};
use crate::types::{ProcessId, Status};
use handles::MacHandle;
use observer::MacObserver;

/// The macOS accessibility service.
#[derive(Debug)]
pub(crate) struct MacOS;

impl Platform for MacOS {
  type Handle = MacHandle;
  type Observer = MacObserver;

  fn is_enabled(prompt: bool) -> bool {
    if !prompt {
      return unsafe { AXIsProcessTrustedWithOptions(None) };
    }
    let key = unsafe { kAXTrustedCheckOptionPrompt };
    let options = CFDictionary::from_slices(&[key], &[CFBoolean::new(true)]);
    unsafe { AXIsProcessTrustedWithOptions(Some(options.as_opaque())) }
  }

  fn is_trusted() -> bool {
    unsafe { AXIsProcessTrusted() }
  }

  fn application(pid: ProcessId) -> MacHandle {
    MacHandle::new(unsafe { AXUIElement::new_application(pid.0) })
  }

  fn system_wide() -> MacHandle {
    MacHandle::new(unsafe { AXUIElement::new_system_wide() })
  }

  fn create_observer(
    pid: ProcessId,
    sink: Arc<dyn NotificationSink>,
  ) -> Result<MacObserver, Status> {
    MacObserver::create(pid, sink)
  }

  fn run_event_loop() {
    CFRunLoop::run();
  }
}
