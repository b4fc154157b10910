/*!
Notification delivery from the event loop back into application code.

Observers call [`Dispatcher::deliver`] on whichever thread drives their event
loop. Nothing raised here reaches that loop: a missing callback, a callback
error and a callback panic all end up in the log.
*/

use parking_lot::ReentrantMutex;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Weak;

use super::{Element, ElementInner};
use crate::platform::NotificationSink;
use crate::types::DispatchError;

/// Serializes callback invocations process-wide. Reentrant so that a callback
/// which pumps the event loop itself can receive nested notifications.
static DISPATCH_GATE: ReentrantMutex<()> = parking_lot::const_reentrant_mutex(());

/// Sink handed to an element's observer.
///
/// Holds the element weakly: the element owns the observer, so a strong
/// reference here would keep both alive forever.
pub(super) struct Dispatcher {
  element: Weak<ElementInner>,
}

impl Dispatcher {
  pub(super) const fn new(element: Weak<ElementInner>) -> Self {
    Self { element }
  }
}

impl NotificationSink for Dispatcher {
  fn deliver(&self, name: Option<String>) {
    let Some(inner) = self.element.upgrade() else {
      log::trace!("Dropping notification {name:?} for released element");
      return;
    };
    let element = Element::from_inner(inner);
    match dispatch(&element, name.as_deref()) {
      Ok(()) => {}
      Err(err @ DispatchError::CallbackPanicked(_)) => log::error!("{err}"),
      Err(err) => log::warn!("{err}"),
    }
  }
}

/// Invoke the element's current callback for one notification.
///
/// The callback is captured before the gate is taken, so a callback replaced
/// concurrently only affects later deliveries.
pub(super) fn dispatch(element: &Element, name: Option<&str>) -> Result<(), DispatchError> {
  let callback = element.callback().ok_or_else(|| DispatchError::NoCallback {
    name: name.map(str::to_owned),
  })?;

  let _gate = DISPATCH_GATE.lock();
  match panic::catch_unwind(AssertUnwindSafe(|| callback(element, name))) {
    Ok(Ok(())) => Ok(()),
    Ok(Err(err)) => Err(DispatchError::CallbackFailed(err)),
    Err(payload) => Err(DispatchError::CallbackPanicked(panic_message(&*payload))),
  }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    (*s).to_owned()
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else {
    "non-string panic payload".to_owned()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::scripted::ScriptedHandle;
  use crate::types::ProcessId;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  fn element() -> Element {
    Element::from_handle(ScriptedHandle::node(Some(ProcessId(21))))
  }

  #[test]
  fn no_callback_is_reported_locally() {
    let element = element();
    let err = dispatch(&element, Some("AXMoved")).unwrap_err();
    assert!(matches!(
      err,
      DispatchError::NoCallback { name: Some(ref n) } if n == "AXMoved"
    ));
  }

  #[test]
  fn callback_errors_are_returned_not_raised() {
    let element = element();
    element.set_callback(|_, _| Err("boom".into()));
    let err = dispatch(&element, None).unwrap_err();
    assert!(matches!(err, DispatchError::CallbackFailed(_)));
    assert!(err.to_string().contains("boom"));
  }

  #[test]
  fn callback_panics_are_contained() {
    let element = element();
    element.set_callback(|_, _| panic!("callback exploded"));
    let err = dispatch(&element, Some("AXMoved")).unwrap_err();
    assert!(matches!(
      err,
      DispatchError::CallbackPanicked(ref msg) if msg == "callback exploded"
    ));

    // The gate was released on the unwinding path
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    element.set_callback(move |_, _| {
      counter.fetch_add(1, Ordering::SeqCst);
      Ok(())
    });
    dispatch(&element, None).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn sink_outlived_by_nothing_is_a_no_op() {
    let element = element();
    let sink = Dispatcher::new(Arc::downgrade(element.inner()));
    drop(element);
    sink.deliver(Some("AXMoved".into()));
  }

  #[test]
  fn sink_delivers_the_watched_element() {
    let element = element();
    let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    element.set_callback(move |el, name| {
      log.lock().push((el.pid(), name.map(str::to_owned)));
      Ok(())
    });

    let sink = Dispatcher::new(Arc::downgrade(element.inner()));
    sink.deliver(Some("AXTitleChanged".into()));
    sink.deliver(None);

    assert_eq!(
      *seen.lock(),
      vec![
        (Some(ProcessId(21)), Some("AXTitleChanged".to_owned())),
        (Some(ProcessId(21)), None),
      ]
    );
  }
}
