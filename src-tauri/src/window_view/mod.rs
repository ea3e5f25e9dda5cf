// Window view: turns pointer gestures on a window frame into window manager calls
// Handles title-bar dragging, click-to-focus, and the minimize/close controls

pub mod drag;
pub mod types;

pub use drag::{clamp_position, content_size, ViewEffect, WindowView};
pub use types::*;
