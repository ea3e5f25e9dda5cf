// Program registry: the fixed set of launchable toy applications

pub mod content;

use serde::{Deserialize, Serialize};

use crate::state::window::Size;
pub use content::ContentView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramId {
    Wallet,
    Finder,
    Calculator,
    Notepad,
}

impl ProgramId {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wallet" => Some(ProgramId::Wallet),
            "finder" => Some(ProgramId::Finder),
            "calculator" => Some(ProgramId::Calculator),
            "notepad" => Some(ProgramId::Notepad),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramId::Wallet => "wallet",
            ProgramId::Finder => "finder",
            ProgramId::Calculator => "calculator",
            ProgramId::Notepad => "notepad",
        }
    }
}

/// Static metadata for a launchable program
#[derive(Debug, Clone, Serialize)]
pub struct ProgramDescriptor {
    pub id: ProgramId,
    pub name: &'static str,
    /// Title bar text for windows of this program
    pub title: &'static str,
    pub icon: &'static str,
    pub default_size: Size,
    #[serde(skip)]
    pub content: fn() -> ContentView,
}

impl ProgramDescriptor {
    pub fn new_content(&self) -> ContentView {
        (self.content)()
    }
}

pub static PROGRAMS: [ProgramDescriptor; 4] = [
    ProgramDescriptor {
        id: ProgramId::Wallet,
        name: "Wallet",
        title: "Crypto Wallet",
        icon: "/icons/wallet.png",
        default_size: Size { width: 400.0, height: 350.0 },
        content: ContentView::wallet,
    },
    ProgramDescriptor {
        id: ProgramId::Finder,
        name: "Finder",
        title: "Finder",
        icon: "/icons/finder.png",
        default_size: Size { width: 300.0, height: 200.0 },
        content: ContentView::finder,
    },
    ProgramDescriptor {
        id: ProgramId::Calculator,
        name: "Calculator",
        title: "Calculator",
        icon: "/icons/calculator.png",
        default_size: Size { width: 250.0, height: 300.0 },
        content: ContentView::calculator,
    },
    ProgramDescriptor {
        id: ProgramId::Notepad,
        name: "Notepad",
        title: "Notepad",
        icon: "/icons/notepad.png",
        default_size: Size { width: 400.0, height: 300.0 },
        content: ContentView::notepad,
    },
];

pub fn get_program(id: ProgramId) -> &'static ProgramDescriptor {
    match id {
        ProgramId::Wallet => &PROGRAMS[0],
        ProgramId::Finder => &PROGRAMS[1],
        ProgramId::Calculator => &PROGRAMS[2],
        ProgramId::Notepad => &PROGRAMS[3],
    }
}

/// Look up a program by its string identifier. Unknown identifiers yield `None`.
pub fn lookup(id: &str) -> Option<&'static ProgramDescriptor> {
    ProgramId::from_str(id).map(get_program)
}
