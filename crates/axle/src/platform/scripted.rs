/*!
In-memory accessibility service used by the test suite.

Nodes are scripted with attribute values, failure statuses and settability;
observers record registrations and let tests deliver notifications by hand.
Process-global state (installed applications, observers, trust) is
thread-local, so each test sees its own service.
*/

#![allow(missing_docs)]

use parking_lot::Mutex;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::ffi::{CStr, CString};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use super::{
  NativeKind, NativeText, NativeValue, NotificationSink, Platform, PlatformHandle,
  PlatformObserver,
};
use crate::a11y::attribute;
use crate::types::{Point, ProcessId, Size, Status};

/// `AXValueType` code for a range wrapper.
const RANGE_WRAPPER: u32 = 4;
/// Type id reported for numbers, which have no decoded form.
const NUMBER_TYPE_ID: usize = 22;

thread_local! {
  static APPLICATIONS: RefCell<HashMap<ProcessId, ScriptedHandle>> = RefCell::new(HashMap::new());
  static SYSTEM_WIDE: ScriptedHandle = system_wide_node();
  static OBSERVERS: RefCell<Vec<Weak<ObserverState>>> = const { RefCell::new(Vec::new()) };
  static OBSERVER_FAILURE: Cell<Option<Status>> = const { Cell::new(None) };
  static TRUSTED: Cell<bool> = const { Cell::new(true) };
}

fn system_wide_node() -> ScriptedHandle {
  let node = ScriptedHandle::node(None);
  node
    .with(attribute::ROLE, ScriptedValue::text("AXSystemWide"))
    .with(attribute::ROLE_DESCRIPTION, ScriptedValue::text("system wide"));
  node
}

/// Make `application(pid)` resolve to `handle` on this thread.
pub(crate) fn install_application(pid: ProcessId, handle: ScriptedHandle) {
  APPLICATIONS.with(|apps| apps.borrow_mut().insert(pid, handle));
}

/// Make the next observer creations on this thread fail with `status`.
pub(crate) fn fail_observer_creation(status: Status) {
  OBSERVER_FAILURE.with(|f| f.set(Some(status)));
}

pub(crate) fn set_trusted(trusted: bool) {
  TRUSTED.with(|t| t.set(trusted));
}

/// Most recently created live observer for a process.
pub(crate) fn observer_for(pid: ProcessId) -> Option<Arc<ObserverState>> {
  OBSERVERS.with(|observers| {
    observers
      .borrow()
      .iter()
      .rev()
      .filter_map(Weak::upgrade)
      .find(|state| state.pid == pid)
  })
}

/// Observers created on this thread, dropped or not.
pub(crate) fn observers_created() -> usize {
  OBSERVERS.with(|observers| observers.borrow().len())
}

/// Observers created on this thread that have not been dropped.
pub(crate) fn live_observers() -> usize {
  OBSERVERS.with(|observers| {
    observers
      .borrow()
      .iter()
      .filter(|state| state.strong_count() > 0)
      .count()
  })
}

#[derive(Debug)]
pub(crate) struct Scripted;

impl Platform for Scripted {
  type Handle = ScriptedHandle;
  type Observer = ScriptedObserver;

  fn is_enabled(_prompt: bool) -> bool {
    TRUSTED.with(Cell::get)
  }

  fn is_trusted() -> bool {
    TRUSTED.with(Cell::get)
  }

  fn application(pid: ProcessId) -> ScriptedHandle {
    APPLICATIONS
      .with(|apps| apps.borrow().get(&pid).cloned())
      .unwrap_or_else(|| {
        let missing = ScriptedHandle::node(Some(pid));
        missing.invalidate(Status::InvalidElement);
        missing
      })
  }

  fn system_wide() -> ScriptedHandle {
    SYSTEM_WIDE.with(Clone::clone)
  }

  fn create_observer(
    pid: ProcessId,
    sink: Arc<dyn NotificationSink>,
  ) -> Result<ScriptedObserver, Status> {
    if let Some(status) = OBSERVER_FAILURE.with(Cell::get) {
      return Err(status);
    }
    let state = Arc::new(ObserverState {
      pid,
      sink,
      registrations: Mutex::new(Vec::new()),
    });
    OBSERVERS.with(|observers| observers.borrow_mut().push(Arc::downgrade(&state)));
    Ok(ScriptedObserver(state))
  }

  fn run_event_loop() {
    log::trace!("Scripted service has no event loop to run");
  }
}

// ============================================================================
// Nodes
// ============================================================================

#[derive(Debug, Default)]
struct NodeState {
  pid: Option<ProcessId>,
  /// Every call fails with this status once set.
  dead: Option<Status>,
  attributes: Vec<(String, ScriptedValue)>,
  failures: HashMap<String, Status>,
  settable: HashSet<String>,
  write_failures: HashMap<String, Status>,
  writes: Vec<String>,
  names_failure: Option<Status>,
  timeout: Option<f32>,
  timeout_failure: Option<Status>,
  actions: Vec<String>,
  performed: Vec<String>,
  hit: Option<ScriptedHandle>,
  refused_notifications: HashMap<String, Status>,
}

impl NodeState {
  fn alive(&self) -> Result<(), Status> {
    self.dead.map_or(Ok(()), Err)
  }

  fn lookup(&self, name: &str) -> Result<&ScriptedValue, Status> {
    self.alive()?;
    if let Some(status) = self.failures.get(name) {
      return Err(*status);
    }
    self
      .attributes
      .iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value)
      .ok_or(Status::AttributeUnsupported)
  }
}

#[derive(Debug)]
struct Node {
  state: Mutex<NodeState>,
}

/// Scripted element handle. `Clone` is a retain; the strong count is the
/// native retain count.
#[derive(Debug, Clone)]
pub(crate) struct ScriptedHandle(Arc<Node>);

impl ScriptedHandle {
  pub(crate) fn node(pid: Option<ProcessId>) -> Self {
    Self(Arc::new(Node {
      state: Mutex::new(NodeState {
        pid,
        ..NodeState::default()
      }),
    }))
  }

  /// Retains currently outstanding on this node.
  pub(crate) fn live_handles(&self) -> usize {
    Arc::strong_count(&self.0)
  }

  pub(crate) fn with(&self, name: &str, value: ScriptedValue) -> &Self {
    let mut state = self.0.state.lock();
    let attributes = &mut state.attributes;
    if let Some((_, slot)) = attributes.iter_mut().find(|(key, _)| key == name) {
      *slot = value;
    } else {
      attributes.push((name.to_owned(), value));
    }
    drop(state);
    self
  }

  pub(crate) fn fail(&self, name: &str, status: Status) -> &Self {
    self.0.state.lock().failures.insert(name.to_owned(), status);
    self
  }

  pub(crate) fn settable(&self, name: &str) -> &Self {
    self.0.state.lock().settable.insert(name.to_owned());
    self
  }

  pub(crate) fn fail_write(&self, name: &str, status: Status) -> &Self {
    self
      .0
      .state
      .lock()
      .write_failures
      .insert(name.to_owned(), status);
    self
  }

  pub(crate) fn fail_names(&self, status: Status) -> &Self {
    self.0.state.lock().names_failure = Some(status);
    self
  }

  pub(crate) fn fail_timeout(&self, status: Status) -> &Self {
    self.0.state.lock().timeout_failure = Some(status);
    self
  }

  pub(crate) fn action(&self, name: &str) -> &Self {
    self.0.state.lock().actions.push(name.to_owned());
    self
  }

  /// Result of hit-testing within this node.
  pub(crate) fn hit(&self, target: Self) -> &Self {
    self.0.state.lock().hit = Some(target);
    self
  }

  pub(crate) fn refuse_notification(&self, name: &str, status: Status) -> &Self {
    self
      .0
      .state
      .lock()
      .refused_notifications
      .insert(name.to_owned(), status);
    self
  }

  /// Fail every subsequent call on this node with `status`.
  pub(crate) fn invalidate(&self, status: Status) -> &Self {
    self.0.state.lock().dead = Some(status);
    self
  }

  /// Attributes written so far, in order.
  pub(crate) fn writes(&self) -> Vec<String> {
    self.0.state.lock().writes.clone()
  }

  pub(crate) fn performed(&self) -> Vec<String> {
    self.0.state.lock().performed.clone()
  }

  pub(crate) fn timeout(&self) -> Option<f32> {
    self.0.state.lock().timeout
  }
}

impl PartialEq for ScriptedHandle {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }
}

impl Eq for ScriptedHandle {}

impl Hash for ScriptedHandle {
  fn hash<H: Hasher>(&self, state: &mut H) {
    Arc::as_ptr(&self.0).hash(state);
  }
}

impl PlatformHandle for ScriptedHandle {
  type Value = ScriptedValue;

  fn pid(&self) -> Result<ProcessId, Status> {
    let state = self.0.state.lock();
    state.alive()?;
    state.pid.ok_or(Status::Failure)
  }

  fn attribute_names(&self) -> Result<Vec<String>, Status> {
    let state = self.0.state.lock();
    state.alive()?;
    if let Some(status) = state.names_failure {
      return Err(status);
    }
    Ok(state.attributes.iter().map(|(key, _)| key.clone()).collect())
  }

  fn copy_attribute(&self, name: &str) -> Result<ScriptedValue, Status> {
    self.0.state.lock().lookup(name).cloned()
  }

  fn attribute_count(&self, name: &str) -> Result<usize, Status> {
    let state = self.0.state.lock();
    Ok(match state.lookup(name)? {
      ScriptedValue::Array(items) => items.len(),
      ScriptedValue::Text(_)
      | ScriptedValue::Boolean(_)
      | ScriptedValue::Element(_)
      | ScriptedValue::Point(_)
      | ScriptedValue::Size(_)
      | ScriptedValue::Rect
      | ScriptedValue::Range
      | ScriptedValue::Number(_) => 1,
    })
  }

  fn is_settable(&self, name: &str) -> Result<bool, Status> {
    let state = self.0.state.lock();
    let settable = state.settable.contains(name);
    match state.lookup(name) {
      Ok(_) => Ok(settable),
      Err(Status::AttributeUnsupported) if settable => Ok(true),
      Err(status) => Err(status),
    }
  }

  fn set_attribute(&self, name: &str, value: &ScriptedValue) -> Result<(), Status> {
    let mut state = self.0.state.lock();
    state.alive()?;
    if let Some(status) = state.write_failures.get(name) {
      return Err(*status);
    }
    state.writes.push(name.to_owned());
    drop(state);
    self.with(name, value.clone());
    Ok(())
  }

  fn set_messaging_timeout(&self, seconds: f32) -> Result<(), Status> {
    let mut state = self.0.state.lock();
    state.alive()?;
    if let Some(status) = state.timeout_failure {
      return Err(status);
    }
    state.timeout = Some(seconds);
    Ok(())
  }

  fn element_at_position(&self, _x: f32, _y: f32) -> Result<Self, Status> {
    let state = self.0.state.lock();
    state.alive()?;
    state.hit.clone().ok_or(Status::NoValue)
  }

  fn action_names(&self) -> Result<Vec<String>, Status> {
    let state = self.0.state.lock();
    state.alive()?;
    Ok(state.actions.clone())
  }

  fn perform_action(&self, action: &str) -> Result<(), Status> {
    let mut state = self.0.state.lock();
    state.alive()?;
    if !state.actions.iter().any(|a| a == action) {
      return Err(Status::ActionUnsupported);
    }
    state.performed.push(action.to_owned());
    Ok(())
  }
}

// ============================================================================
// Values
// ============================================================================

#[derive(Debug, Clone)]
pub(crate) enum ScriptedValue {
  Text(ScriptedText),
  Boolean(bool),
  Element(ScriptedHandle),
  /// `None` models a wrapper that refuses to yield its components.
  Point(Option<Point>),
  Size(Option<Size>),
  Rect,
  Range,
  Number(f64),
  Array(Vec<ScriptedValue>),
}

impl ScriptedValue {
  /// String whose storage offers a borrowed UTF-8 view.
  pub(crate) fn text(s: &str) -> Self {
    Self::Text(ScriptedText::new(s, true, false))
  }

  /// String that can only be read by copying.
  pub(crate) fn copied_text(s: &str) -> Self {
    Self::Text(ScriptedText::new(s, false, false))
  }

  /// String that refuses both extraction paths.
  pub(crate) fn unconvertible_text(s: &str) -> Self {
    Self::Text(ScriptedText::new(s, false, true))
  }
}

impl NativeValue for ScriptedValue {
  type Handle = ScriptedHandle;
  type Text = ScriptedText;

  fn kind(&self) -> NativeKind<'_, Self> {
    match self {
      Self::Text(text) => NativeKind::String(text),
      Self::Boolean(b) => NativeKind::Boolean(*b),
      Self::Element(handle) => NativeKind::Element(handle.clone()),
      Self::Point(point) => NativeKind::Point(*point),
      Self::Size(size) => NativeKind::Size(*size),
      Self::Rect => NativeKind::Rect,
      Self::Range => NativeKind::OtherGeometry(RANGE_WRAPPER),
      Self::Number(_) => NativeKind::Unknown(NUMBER_TYPE_ID),
      Self::Array(items) => NativeKind::Array(items.clone()),
    }
  }

  fn from_point(point: Point) -> Result<Self, Status> {
    Ok(Self::Point(Some(point)))
  }

  fn from_size(size: Size) -> Result<Self, Status> {
    Ok(Self::Size(Some(size)))
  }

  fn from_bool(value: bool) -> Result<Self, Status> {
    Ok(Self::Boolean(value))
  }
}

#[derive(Debug, Clone)]
pub(crate) struct ScriptedText {
  utf8: CString,
  utf16_len: usize,
  borrowable: bool,
  broken: bool,
}

impl ScriptedText {
  fn new(s: &str, borrowable: bool, broken: bool) -> Self {
    Self {
      utf8: CString::new(s).unwrap_or_default(),
      utf16_len: s.encode_utf16().count(),
      borrowable,
      broken,
    }
  }
}

impl NativeText for ScriptedText {
  fn utf16_len(&self) -> usize {
    self.utf16_len
  }

  fn borrowed_utf8(&self) -> Option<&CStr> {
    (self.borrowable && !self.broken).then_some(self.utf8.as_c_str())
  }

  fn max_utf8_size(&self) -> usize {
    self.utf16_len * 3 + 1
  }

  fn copy_utf8(&self, buffer: &mut [u8]) -> bool {
    let bytes = self.utf8.as_bytes_with_nul();
    if self.broken || bytes.len() > buffer.len() {
      return false;
    }
    buffer
      .iter_mut()
      .zip(bytes)
      .for_each(|(slot, byte)| *slot = *byte);
    true
  }
}

// ============================================================================
// Observers
// ============================================================================

pub(crate) struct ObserverState {
  pid: ProcessId,
  sink: Arc<dyn NotificationSink>,
  registrations: Mutex<Vec<(ScriptedHandle, String)>>,
}

impl ObserverState {
  fn is_registered(&self, handle: &ScriptedHandle, name: Option<&str>) -> bool {
    self
      .registrations
      .lock()
      .iter()
      .any(|(h, n)| h == handle && name.is_none_or(|name| n == name))
  }

  /// Deliver `name` for `handle` as the event loop would. Returns false if
  /// no such registration exists.
  pub(crate) fn deliver(&self, handle: &ScriptedHandle, name: &str) -> bool {
    if !self.is_registered(handle, Some(name)) {
      return false;
    }
    self.sink.deliver(Some(name.to_owned()));
    true
  }

  /// Deliver a notification whose name could not be decoded.
  pub(crate) fn deliver_unnamed(&self, handle: &ScriptedHandle) -> bool {
    if !self.is_registered(handle, None) {
      return false;
    }
    self.sink.deliver(None);
    true
  }
}

pub(crate) struct ScriptedObserver(Arc<ObserverState>);

impl PlatformObserver for ScriptedObserver {
  type Handle = ScriptedHandle;

  fn add_notification(&self, handle: &ScriptedHandle, name: &str) -> Result<(), Status> {
    {
      let state = handle.0.state.lock();
      state.alive()?;
      if let Some(status) = state.refused_notifications.get(name) {
        return Err(*status);
      }
    }
    if self.0.is_registered(handle, Some(name)) {
      return Err(Status::NotificationAlreadyRegistered);
    }
    self
      .0
      .registrations
      .lock()
      .push((handle.clone(), name.to_owned()));
    Ok(())
  }

  fn remove_notification(&self, handle: &ScriptedHandle, name: &str) -> Result<(), Status> {
    let mut registrations = self.0.registrations.lock();
    let before = registrations.len();
    registrations.retain(|(h, n)| !(h == handle && n == name));
    if registrations.len() == before {
      return Err(Status::NotificationNotRegistered);
    }
    Ok(())
  }
}
