use serde::Serialize;
use tracing::{debug, info};

use self::icons::{default_icons, IconRecord};
use crate::programs::{self, ContentView, ProgramId};
use crate::state::window::{Size, WindowOverrides, WindowRecord};
use crate::state::WindowManager;
use crate::window_view::{
    content_size, HitRegion, Point, ViewEffect, Viewport, WindowControl, WindowView,
};

pub mod icons;

pub type DesktopWindow = WindowRecord<ContentView>;

/// Program id used for windows opened from icons that have no program
const PLACEHOLDER_PROGRAM: &str = "default";

/// Icon as the webview draws it
#[derive(Clone, Serialize, Debug)]
pub struct IconView {
    #[serde(flatten)]
    pub icon: IconRecord,
    pub selected: bool,
}

/// Window as the webview draws it
#[derive(Clone, Serialize, Debug)]
pub struct WindowFrame {
    #[serde(flatten)]
    pub window: DesktopWindow,
    /// Room left for the content view under the title bar
    pub content_size: Size,
}

impl WindowFrame {
    fn new(window: &DesktopWindow) -> Self {
        Self {
            window: window.clone(),
            content_size: content_size(window.size),
        }
    }
}

/// Everything the webview needs to paint the desktop
#[derive(Clone, Serialize, Debug)]
pub struct DesktopSnapshot {
    pub viewport: Viewport,
    pub icons: Vec<IconView>,
    /// Visible windows, bottom-most first
    pub windows: Vec<WindowFrame>,
    pub minimized: Vec<WindowFrame>,
}

/// Composition root for the desktop: icons, selection, windows and the
/// pointer state of the window frames.
pub struct DesktopShell {
    windows: WindowManager<ContentView>,
    view: WindowView,
    icons: Vec<IconRecord>,
    selected_icon: Option<String>,
    viewport: Viewport,
}

impl DesktopShell {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_icons(viewport, default_icons())
    }

    pub fn with_icons(viewport: Viewport, icons: Vec<IconRecord>) -> Self {
        Self {
            windows: WindowManager::new(),
            view: WindowView::new(),
            icons,
            selected_icon: None,
            viewport,
        }
    }

    pub fn windows(&self) -> &WindowManager<ContentView> {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowManager<ContentView> {
        &mut self.windows
    }

    pub fn selected_icon(&self) -> Option<&str> {
        self.selected_icon.as_deref()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        debug!(width = viewport.width, height = viewport.height, "viewport changed");
        self.viewport = viewport;
    }

    // ===== Icons =====

    /// Click on empty desktop space. Returns true if the selection changed.
    pub fn click_desktop(&mut self) -> bool {
        self.selected_icon.take().is_some()
    }

    /// Select an icon, deselecting any other. Returns true if the selection changed.
    pub fn click_icon(&mut self, icon_id: &str) -> bool {
        if !self.icons.iter().any(|i| i.id == icon_id) {
            return false;
        }
        if self.selected_icon.as_deref() == Some(icon_id) {
            return false;
        }
        self.selected_icon = Some(icon_id.to_string());
        true
    }

    /// Launch whatever the icon points at.
    /// Icons without a program open a "Coming soon..." window named after the icon.
    pub fn double_click_icon(&mut self, icon_id: &str) -> Option<&DesktopWindow> {
        let (program, title) = self
            .icons
            .iter()
            .find(|i| i.id == icon_id)
            .map(|i| (i.program, i.name.clone()))?;

        match program {
            Some(program) => Some(self.launch(program)),
            None => {
                info!(icon = icon_id, "icon has no program, opening placeholder");
                Some(
                    self.windows
                        .open(PLACEHOLDER_PROGRAM, title, ContentView::coming_soon(), None),
                )
            }
        }
    }

    // ===== Programs =====

    /// Open a program window with the registry's content and default size
    pub fn launch(&mut self, program: ProgramId) -> &DesktopWindow {
        let descriptor = programs::get_program(program);
        self.windows.open(
            program.as_str(),
            descriptor.title,
            descriptor.new_content(),
            Some(WindowOverrides::with_size(descriptor.default_size)),
        )
    }

    /// Open a window by program identifier with caller-chosen title and geometry.
    /// Unknown programs get the placeholder view.
    pub fn open_window(
        &mut self,
        program_id: &str,
        title: String,
        overrides: Option<WindowOverrides>,
    ) -> &DesktopWindow {
        let content = match programs::lookup(program_id) {
            Some(descriptor) => descriptor.new_content(),
            None => ContentView::coming_soon(),
        };
        self.windows.open(program_id, title, content, overrides)
    }

    // ===== Window frames =====

    pub fn window_pointer_down(&mut self, id: &str, region: HitRegion, pointer: Point) -> ViewEffect {
        self.view.pointer_down(&mut self.windows, id, region, pointer)
    }

    pub fn window_pointer_move(&mut self, pointer: Point) -> ViewEffect {
        self.view.pointer_move(&mut self.windows, pointer, self.viewport)
    }

    pub fn window_pointer_up(&mut self) {
        self.view.pointer_up();
    }

    pub fn window_control(&mut self, id: &str, control: WindowControl) -> ViewEffect {
        self.view.control(&mut self.windows, id, control)
    }

    pub fn snapshot(&self) -> DesktopSnapshot {
        DesktopSnapshot {
            viewport: self.viewport,
            icons: self
                .icons
                .iter()
                .map(|icon| IconView {
                    selected: self.selected_icon.as_deref() == Some(icon.id.as_str()),
                    icon: icon.clone(),
                })
                .collect(),
            windows: self.windows.render_order().into_iter().map(WindowFrame::new).collect(),
            minimized: self.windows.minimized().into_iter().map(WindowFrame::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window_view::TITLE_BAR_HEIGHT;

    fn shell() -> DesktopShell {
        DesktopShell::new(Viewport::default())
    }

    #[test]
    fn test_icon_selection_is_exclusive() {
        let mut desktop = shell();
        assert_eq!(desktop.selected_icon(), None);

        assert!(desktop.click_icon("finder"));
        assert_eq!(desktop.selected_icon(), Some("finder"));

        assert!(desktop.click_icon("notepad"));
        assert_eq!(desktop.selected_icon(), Some("notepad"));

        // Same icon again changes nothing
        assert!(!desktop.click_icon("notepad"));

        let selected: Vec<_> = desktop
            .snapshot()
            .icons
            .into_iter()
            .filter(|i| i.selected)
            .map(|i| i.icon.id)
            .collect();
        assert_eq!(selected, vec!["notepad".to_string()]);
    }

    #[test]
    fn test_click_desktop_clears_selection() {
        let mut desktop = shell();
        assert!(!desktop.click_desktop());

        desktop.click_icon("wallet");
        assert!(desktop.click_desktop());
        assert_eq!(desktop.selected_icon(), None);
    }

    #[test]
    fn test_unknown_icon_is_ignored() {
        let mut desktop = shell();
        desktop.click_icon("wallet");

        assert!(!desktop.click_icon("ghost"));
        assert_eq!(desktop.selected_icon(), Some("wallet"));
        assert!(desktop.double_click_icon("ghost").is_none());
        assert!(desktop.windows().is_empty());
    }

    #[test]
    fn test_double_click_launches_registry_program() {
        let mut desktop = shell();

        let window = desktop.double_click_icon("calculator").unwrap().clone();
        assert!(window.id.starts_with("calculator-"));
        assert_eq!(window.title, "Calculator");
        assert_eq!(window.size, Size { width: 250.0, height: 300.0 });
        assert!(matches!(window.content, ContentView::Calculator { .. }));

        let wallet = desktop.double_click_icon("wallet").unwrap().clone();
        assert_eq!(wallet.title, "Crypto Wallet");
        assert_eq!(wallet.content, ContentView::Wallet);
        assert_eq!(desktop.windows().top().unwrap().id, wallet.id);
    }

    #[test]
    fn test_double_click_without_program_opens_placeholder() {
        let mut desktop = shell();

        let window = desktop.double_click_icon("trash").unwrap().clone();
        assert_eq!(window.title, "Trash");
        assert_eq!(window.content, ContentView::coming_soon());
        assert!(window.id.starts_with("default-"));
    }

    #[test]
    fn test_open_window_with_unknown_program() {
        let mut desktop = shell();
        let window = desktop.open_window("paint", "Paint".to_string(), None);
        assert_eq!(window.content, ContentView::coming_soon());
    }

    #[test]
    fn test_notepad_then_calculator_then_focus_notepad() {
        let mut desktop = shell();
        let notepad = desktop.launch(ProgramId::Notepad).id.clone();
        let calculator = desktop.launch(ProgramId::Calculator).id.clone();

        desktop.window_pointer_down(&notepad, HitRegion::Body, Point { x: 150.0, y: 200.0 });

        let snapshot = desktop.snapshot();
        let order: Vec<_> = snapshot.windows.iter().map(|w| w.window.id.clone()).collect();
        assert_eq!(order, vec![calculator, notepad]);
    }

    #[test]
    fn test_frame_gestures_use_shell_viewport() {
        let mut desktop = shell();
        desktop.set_viewport(Viewport { width: 800.0, height: 600.0 });
        let id = desktop.launch(ProgramId::Notepad).id.clone();

        desktop.window_pointer_down(&id, HitRegion::Title, Point { x: 100.0, y: 100.0 });
        desktop.window_pointer_move(Point { x: 9000.0, y: 9000.0 });
        desktop.window_pointer_up();

        let window = desktop.windows().get(&id).unwrap();
        assert_eq!(window.position.x, 800.0 - 400.0);
        assert_eq!(window.position.y, 600.0 - 300.0);
    }

    #[test]
    fn test_minimized_windows_leave_the_desktop() {
        let mut desktop = shell();
        let id = desktop.launch(ProgramId::Finder).id.clone();

        desktop.window_control(&id, WindowControl::Minimize);
        let snapshot = desktop.snapshot();
        assert!(snapshot.windows.is_empty());
        assert_eq!(snapshot.minimized.len(), 1);

        desktop.windows_mut().restore(&id);
        let snapshot = desktop.snapshot();
        assert_eq!(snapshot.windows.len(), 1);
        assert!(snapshot.minimized.is_empty());
        assert_eq!(
            snapshot.windows[0].content_size,
            Size { width: 300.0, height: 200.0 - TITLE_BAR_HEIGHT }
        );
    }
}
