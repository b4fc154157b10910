/*! Core types shared by the element, codec and platform layers. */

#![allow(missing_docs)]

mod error;
mod geometry;
mod ids;
mod status;

pub use error::{AxleError, AxleResult, DispatchError};
pub use geometry::{Point, Size};
pub use ids::ProcessId;
pub use status::Status;
