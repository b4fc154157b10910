/*!
Attribute access: `keys()`, `get()`, `count()`, `can_set()`, `set()`, actions.

The `_many` forms batch several names into one call. They stop at the first
failing name and return only that error; nothing already read is returned.
*/

use super::Element;
use crate::a11y::{AttributeKind, Value};
use crate::codec;
use crate::platform::PlatformHandle;
use crate::types::{AxleError, AxleResult};

impl Element {
  /// Names of the attributes this element exposes.
  pub fn keys(&self) -> AxleResult<Vec<String>> {
    self
      .handle()
      .attribute_names()
      .map_err(|status| AxleError::service(status, "attribute names"))
  }

  /// Read and decode one attribute.
  pub fn get(&self, name: &str) -> AxleResult<Value> {
    let native = self
      .handle()
      .copy_attribute(name)
      .map_err(|status| AxleError::from_status(status, name))?;
    codec::decode(&native)
  }

  /// Read several attributes, in order.
  pub fn get_many<I>(&self, names: I) -> AxleResult<Vec<Value>>
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    names
      .into_iter()
      .map(|name| self.get(name.as_ref()))
      .collect()
  }

  /// Number of values held by a (usually multi-valued) attribute.
  pub fn count(&self, name: &str) -> AxleResult<usize> {
    self
      .handle()
      .attribute_count(name)
      .map_err(|status| AxleError::from_status(status, name))
  }

  /// Counts for several attributes, in order.
  pub fn count_many<I>(&self, names: I) -> AxleResult<Vec<usize>>
  where
    I: IntoIterator,
    I::Item: AsRef<str>,
  {
    names
      .into_iter()
      .map(|name| self.count(name.as_ref()))
      .collect()
  }

  /// Whether the attribute can be written.
  pub fn can_set(&self, name: &str) -> AxleResult<bool> {
    self
      .handle()
      .is_settable(name)
      .map_err(|status| AxleError::from_status(status, name))
  }

  /// Write an attribute.
  ///
  /// Only [`AttributeKind`] attributes have a write encoding; other settable
  /// attributes fail with `NotImplemented`. The value's shape is checked
  /// before anything is sent to the service.
  pub fn set(&self, name: &str, value: impl Into<Value>) -> AxleResult<()> {
    if !self.can_set(name)? {
      return Err(AxleError::NotSettable(name.to_owned()));
    }
    let kind =
      AttributeKind::for_attribute(name).ok_or_else(|| AxleError::NotImplemented(name.to_owned()))?;
    let native = codec::encode(&value.into(), kind)?;
    self
      .handle()
      .set_attribute(name, &native)
      .map_err(|status| AxleError::from_status(status, name))
  }

  /// Whether the attribute can currently be read.
  ///
  /// Any failure (missing attribute, no value, dead element) reads as `false`.
  pub fn contains(&self, name: &str) -> bool {
    self.handle().copy_attribute(name).is_ok()
  }

  /// Names of the actions this element supports.
  pub fn actions(&self) -> AxleResult<Vec<String>> {
    self
      .handle()
      .action_names()
      .map_err(|status| AxleError::from_status(status, "actions"))
  }

  pub fn perform_action(&self, action: &str) -> AxleResult<()> {
    self
      .handle()
      .perform_action(action)
      .map_err(|status| AxleError::from_status(status, action))
  }
}
