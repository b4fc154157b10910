/*!
Notification subscriptions: the callback slot and `watch()`/`unwatch()`.

Each element has one callback slot shared by all of its subscriptions, and
one observer created on the first `watch`. The observer is attached to the
event loop of the thread that first calls `watch`; notifications arrive when
that loop runs (see [`crate::run_event_loop`]).
*/

use std::error::Error;
use std::sync::Arc;

use super::dispatch::Dispatcher;
use super::Element;
use crate::platform::{CurrentPlatform, Observer, Platform, PlatformObserver};
use crate::types::{AxleError, AxleResult, Status};

/// What a notification callback returns. Errors are logged, never raised.
pub type CallbackResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Callback invoked with the watched element and the notification name
/// (`None` if the name could not be decoded).
pub type NotificationCallback = Arc<dyn Fn(&Element, Option<&str>) -> CallbackResult + Send + Sync>;

impl Element {
  /// Install the callback for every notification watched on this element,
  /// replacing any previous one.
  pub fn set_callback<F>(&self, callback: F)
  where
    F: Fn(&Element, Option<&str>) -> CallbackResult + Send + Sync + 'static,
  {
    *self.inner().callback.lock() = Some(Arc::new(callback));
  }

  /// Remove the installed callback, returning it.
  pub fn clear_callback(&self) -> Option<NotificationCallback> {
    self.inner().callback.lock().take()
  }

  /// The currently installed callback.
  pub fn callback(&self) -> Option<NotificationCallback> {
    self.inner().callback.lock().clone()
  }

  /// Register for notifications by name.
  ///
  /// Creates this element's observer on first use, which requires a process
  /// id. Stops at the first name the service refuses; names registered
  /// before it stay registered.
  pub fn watch<I>(&self, names: I) -> AxleResult<()>
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    let mut slot = self.inner().observer.lock();
    let observer = match slot.take() {
      Some(observer) => slot.insert(observer),
      None => slot.insert(self.create_observer()?),
    };
    for name in names {
      let name = name.as_ref();
      observer
        .add_notification(self.handle(), name)
        .map_err(|status| AxleError::from_status(status, name))?;
      log::debug!("Watching {name} (pid {:?})", self.pid());
    }
    Ok(())
  }

  /// Remove notification registrations made by [`Element::watch`].
  pub fn unwatch<I>(&self, names: I) -> AxleResult<()>
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    let slot = self.inner().observer.lock();
    for name in names {
      let name = name.as_ref();
      let Some(observer) = slot.as_ref() else {
        return Err(AxleError::from_status(Status::NotificationNotRegistered, name));
      };
      observer
        .remove_notification(self.handle(), name)
        .map_err(|status| AxleError::from_status(status, name))?;
      log::debug!("Unwatched {name} (pid {:?})", self.pid());
    }
    Ok(())
  }

  fn create_observer(&self) -> AxleResult<Observer> {
    let pid = self.pid().ok_or(AxleError::MissingProcessId)?;
    let sink = Arc::new(Dispatcher::new(Arc::downgrade(self.inner())));
    let observer = CurrentPlatform::create_observer(pid, sink)
      .map_err(|status| AxleError::from_status(status, "observer"))?;
    log::debug!("Created observer for pid {pid}");
    Ok(observer)
  }
}
