// Static views hosted inside program windows

use serde::{Deserialize, Serialize};

pub const CALCULATOR_KEYS: [&str; 20] = [
    "C", "±", "%", "÷", //
    "7", "8", "9", "×", //
    "4", "5", "6", "-", //
    "1", "2", "3", "+", //
    "0", "0", ".", "=",
];

pub const FINDER_FOLDERS: [&str; 6] = [
    "Applications",
    "Documents",
    "Desktop",
    "Downloads",
    "System",
    "Users",
];

pub const NOTEPAD_PLACEHOLDER: &str = "Type your notes here...";
pub const COMING_SOON: &str = "Coming soon...";

/// What a window shows. The webview picks a renderer from the `kind` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentView {
    /// Keypad and a display that never changes
    Calculator { display: String, keys: Vec<String> },
    Finder { folders: Vec<String> },
    Notepad { placeholder: String },
    /// Live state comes from the `wallet_*` commands
    Wallet,
    Placeholder { message: String },
}

impl ContentView {
    pub fn calculator() -> Self {
        ContentView::Calculator {
            display: "0".to_string(),
            keys: CALCULATOR_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn finder() -> Self {
        ContentView::Finder {
            folders: FINDER_FOLDERS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn notepad() -> Self {
        ContentView::Notepad {
            placeholder: NOTEPAD_PLACEHOLDER.to_string(),
        }
    }

    pub fn wallet() -> Self {
        ContentView::Wallet
    }

    pub fn coming_soon() -> Self {
        ContentView::Placeholder {
            message: COMING_SOON.to_string(),
        }
    }
}
