use serde::{Deserialize, Serialize};

use crate::programs::ProgramId;
use crate::state::window::Position;

/// Corner of the desktop an icon's position is measured from
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IconAnchor {
    TopLeft,
    BottomRight,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct IconRecord {
    pub id: String,
    pub name: String,
    pub icon: String,                // Asset path served by the webview
    pub position: Position,          // Offset from `anchor`
    pub anchor: IconAnchor,
    pub program: Option<ProgramId>,  // None for icons without a program (Trash)
}

impl IconRecord {
    fn launcher(program: ProgramId, name: &str, x: f64, y: f64) -> Self {
        Self {
            id: program.as_str().to_string(),
            name: name.to_string(),
            icon: format!("/icons/{}.png", program.as_str()),
            position: Position { x, y },
            anchor: IconAnchor::TopLeft,
            program: Some(program),
        }
    }
}

/// Icons shown on a fresh desktop
pub fn default_icons() -> Vec<IconRecord> {
    vec![
        IconRecord::launcher(ProgramId::Wallet, "Wallet", 20.0, 80.0),
        IconRecord::launcher(ProgramId::Finder, "Finder", 20.0, 160.0),
        IconRecord::launcher(ProgramId::Calculator, "Calculator", 20.0, 240.0),
        IconRecord::launcher(ProgramId::Notepad, "Notepad", 20.0, 320.0),
        IconRecord {
            id: "trash".to_string(),
            name: "Trash".to_string(),
            icon: "/icons/trash.png".to_string(),
            position: Position { x: 16.0, y: 16.0 },
            anchor: IconAnchor::BottomRight,
            program: None,
        },
    ]
}
