/*! Branded ID types. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Process ID - branded type to distinguish from other integer values.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From, Into,
)]
pub struct ProcessId(pub i32);

impl ProcessId {
  /// Process ID of the calling process.
  #[allow(clippy::cast_possible_wrap)] // PIDs are always positive and < i32::MAX
  pub fn current() -> Self {
    Self(std::process::id() as i32)
  }
}
