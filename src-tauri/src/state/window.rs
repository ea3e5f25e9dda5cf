use serde::{Deserialize, Serialize};

/// Top-left corner of a window, relative to the desktop viewport
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Optional geometry supplied by the caller at open time.
/// Any field left as `None` falls back to the manager's default.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct WindowOverrides {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl WindowOverrides {
    pub fn with_size(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
            ..Self::default()
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct WindowRecord<C> {
    pub id: String,            // "{program}-{uuid}"
    pub title: String,         // Title bar text
    pub content: C,            // Opaque to the manager
    pub position: Position,    // Top-left corner
    pub size: Size,            // Outer size, title bar included
    pub z_order: u64,          // Stacking order, higher draws on top
    pub minimized: bool,       // Hidden from the desktop until restored
}
