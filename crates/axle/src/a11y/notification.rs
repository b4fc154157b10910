/*! Common notification names (`kAX*Notification`). */

#![allow(missing_docs)]

pub const MOVED: &str = "AXMoved";
pub const RESIZED: &str = "AXResized";
pub const WINDOW_MOVED: &str = "AXWindowMoved";
pub const WINDOW_RESIZED: &str = "AXWindowResized";
pub const WINDOW_CREATED: &str = "AXWindowCreated";
pub const FOCUSED_WINDOW_CHANGED: &str = "AXFocusedWindowChanged";
pub const FOCUSED_UI_ELEMENT_CHANGED: &str = "AXFocusedUIElementChanged";
pub const TITLE_CHANGED: &str = "AXTitleChanged";
pub const VALUE_CHANGED: &str = "AXValueChanged";
pub const ELEMENT_DESTROYED: &str = "AXUIElementDestroyed";
pub const APPLICATION_HIDDEN: &str = "AXApplicationHidden";
pub const APPLICATION_SHOWN: &str = "AXApplicationShown";
