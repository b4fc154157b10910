/*!
Platform layer: the seam between core code and the accessibility service.

- `traits.rs` - the contract (handles, observers, native values)
- `macos/` - the real service (AXUIElement / AXObserver / CoreFoundation)
- `unsupported.rs` - other targets; every call reports the service as disabled
- `scripted.rs` - in-memory service used by the test suite
*/

mod traits;

#[cfg(target_os = "macos")]
mod macos;
#[cfg(test)]
pub(crate) mod scripted;
#[cfg(all(not(test), not(target_os = "macos")))]
mod unsupported;

pub(crate) use traits::{
  NativeKind, NativeText, NativeValue, NotificationSink, Platform, PlatformHandle,
  PlatformObserver,
};

#[cfg(test)]
pub(crate) type CurrentPlatform = scripted::Scripted;
#[cfg(all(not(test), target_os = "macos"))]
pub(crate) type CurrentPlatform = macos::MacOS;
#[cfg(all(not(test), not(target_os = "macos")))]
pub(crate) type CurrentPlatform = unsupported::Unsupported;

/// Element handle of the current platform.
pub(crate) type Handle = <CurrentPlatform as Platform>::Handle;
/// Observer of the current platform.
pub(crate) type Observer = <CurrentPlatform as Platform>::Observer;
/// Native attribute value of the current platform.
pub(crate) type Native = <Handle as PlatformHandle>::Value;
