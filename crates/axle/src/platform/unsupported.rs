/*!
Backend for targets without an accessibility service.

Handles can still be created, but every request on them reports the service
as disabled, and no value, string or observer can ever exist.
*/

use std::ffi::CStr;
use std::sync::Arc;

use super::{
  NativeKind, NativeText, NativeValue, NotificationSink, Platform, PlatformHandle,
  PlatformObserver,
};
use crate::types::{Point, ProcessId, Size, Status};

const DISABLED: Status = Status::ApiDisabled;

#[derive(Debug)]
pub(crate) struct Unsupported;

impl Platform for Unsupported {
  type Handle = UnsupportedHandle;
  type Observer = NoObserver;

  fn is_enabled(_prompt: bool) -> bool {
    false
  }

  fn is_trusted() -> bool {
    false
  }

  fn application(_pid: ProcessId) -> UnsupportedHandle {
    UnsupportedHandle
  }

  fn system_wide() -> UnsupportedHandle {
    UnsupportedHandle
  }

  fn create_observer(
    _pid: ProcessId,
    _sink: Arc<dyn NotificationSink>,
  ) -> Result<NoObserver, Status> {
    Err(DISABLED)
  }

  fn run_event_loop() {
    log::warn!("No accessibility event loop on this platform");
  }
}

/// Handle that answers every request with `ApiDisabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct UnsupportedHandle;

impl PlatformHandle for UnsupportedHandle {
  type Value = NoValue;

  fn pid(&self) -> Result<ProcessId, Status> {
    Err(DISABLED)
  }

  fn attribute_names(&self) -> Result<Vec<String>, Status> {
    Err(DISABLED)
  }

  fn copy_attribute(&self, _name: &str) -> Result<NoValue, Status> {
    Err(DISABLED)
  }

  fn attribute_count(&self, _name: &str) -> Result<usize, Status> {
    Err(DISABLED)
  }

  fn is_settable(&self, _name: &str) -> Result<bool, Status> {
    Err(DISABLED)
  }

  fn set_attribute(&self, _name: &str, value: &NoValue) -> Result<(), Status> {
    match *value {}
  }

  fn set_messaging_timeout(&self, _seconds: f32) -> Result<(), Status> {
    Err(DISABLED)
  }

  fn element_at_position(&self, _x: f32, _y: f32) -> Result<Self, Status> {
    Err(DISABLED)
  }

  fn action_names(&self) -> Result<Vec<String>, Status> {
    Err(DISABLED)
  }

  fn perform_action(&self, _action: &str) -> Result<(), Status> {
    Err(DISABLED)
  }
}

/// Uninhabited: no value is ever read or encoded.
#[derive(Debug)]
pub(crate) enum NoValue {}

impl NativeValue for NoValue {
  type Handle = UnsupportedHandle;
  type Text = NoText;

  fn kind(&self) -> NativeKind<'_, Self> {
    match *self {}
  }

  fn from_point(_point: Point) -> Result<Self, Status> {
    Err(DISABLED)
  }

  fn from_size(_size: Size) -> Result<Self, Status> {
    Err(DISABLED)
  }

  fn from_bool(_value: bool) -> Result<Self, Status> {
    Err(DISABLED)
  }
}

#[derive(Debug)]
pub(crate) enum NoText {}

impl NativeText for NoText {
  fn utf16_len(&self) -> usize {
    match *self {}
  }

  fn borrowed_utf8(&self) -> Option<&CStr> {
    match *self {}
  }

  fn max_utf8_size(&self) -> usize {
    match *self {}
  }

  fn copy_utf8(&self, _buffer: &mut [u8]) -> bool {
    match *self {}
  }
}

#[derive(Debug)]
pub(crate) enum NoObserver {}

impl PlatformObserver for NoObserver {
  type Handle = UnsupportedHandle;

  fn add_notification(&self, _handle: &UnsupportedHandle, _name: &str) -> Result<(), Status> {
    match *self {}
  }

  fn remove_notification(&self, _handle: &UnsupportedHandle, _name: &str) -> Result<(), Status> {
    match *self {}
  }
}
