// Pointer and geometry types shared by the window view

use serde::{Deserialize, Serialize};

/// Height of the desktop menu bar; windows may not be dragged above it
pub const MENU_BAR_HEIGHT: f64 = 24.0;
/// Height of a window's title bar, taken out of the content area
pub const TITLE_BAR_HEIGHT: f64 = 24.0;

/// Pointer position in desktop coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Size of the desktop viewport as reported by the webview
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Buttons in the title bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowControl {
    Minimize,
    Close,
}

/// Which part of a window frame the pointer went down on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    /// Title bar, outside the control buttons
    Title,
    /// Content area
    Body,
    /// One of the title bar buttons
    Control(WindowControl),
}

impl HitRegion {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "title" => Some(HitRegion::Title),
            "body" => Some(HitRegion::Body),
            "minimize" => Some(HitRegion::Control(WindowControl::Minimize)),
            "close" => Some(HitRegion::Control(WindowControl::Close)),
            _ => None,
        }
    }
}
