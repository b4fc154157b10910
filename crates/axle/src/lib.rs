/*!
Axle - accessibility element references

Typed access to the macOS accessibility tree: element references with native
identity, attribute reads and writes through a small tagged value model, and
change notifications delivered back into Rust callbacks.

```ignore
use axle::a11y::{attribute, notification};
use axle::{Point, Value};

if !axle::is_enabled(true) {
    return Ok(());
}

let app = axle::application(pid)?;
let windows = app.get(attribute::WINDOWS)?;
for window in windows.elements() {
    let [title, position] = &window.get_many([attribute::TITLE, attribute::POSITION])?[..] else {
        continue;
    };
    println!("{title:?} at {position:?}");
}

let window = app.get(attribute::FOCUSED_WINDOW)?;
if let Value::Element(window) = window {
    if window.can_set(attribute::POSITION)? {
        window.set(attribute::POSITION, Point::new(0.0, 25.0))?;
    }

    window.set_callback(|element, name| {
        println!("{name:?} on {element:?}");
        Ok(())
    });
    window.watch([notification::MOVED, notification::RESIZED])?;
    axle::run_event_loop();
}
```
*/

mod codec;
mod core;
mod platform;

pub mod a11y;

mod types;
pub use types::*;

pub use crate::a11y::Value;
pub use crate::core::{
  application, element_at_position, is_enabled, is_trusted, run_event_loop, system_wide,
  CallbackResult, Element, NotificationCallback, DEFAULT_TIMEOUT,
};
