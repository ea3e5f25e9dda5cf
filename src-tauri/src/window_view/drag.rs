// Drag tracking and pointer dispatch for window frames

use tracing::debug;

use super::types::{HitRegion, Point, Viewport, WindowControl, MENU_BAR_HEIGHT, TITLE_BAR_HEIGHT};
use crate::state::window::{Position, Size};
use crate::state::WindowManager;

/// What a gesture did to the window list, so the caller knows what to re-render
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEffect {
    Unchanged,
    Updated(String),
    Closed(String),
}

/// An in-progress title bar drag
#[derive(Debug, Clone, PartialEq)]
struct DragSession {
    window_id: String,
    /// Pointer position minus window origin at drag start
    offset: Point,
}

/// Transient pointer state for window frames. Holds no window state of its own.
#[derive(Debug, Default)]
pub struct WindowView {
    drag: Option<DragSession>,
}

impl WindowView {
    pub fn new() -> Self {
        Self { drag: None }
    }

    /// Window currently being dragged, if any
    pub fn dragging(&self) -> Option<&str> {
        self.drag.as_ref().map(|d| d.window_id.as_str())
    }

    /// Pointer pressed on a window frame.
    ///
    /// Title bar presses focus the window and start a drag. Body presses only
    /// focus. Presses on a control button are left to [`WindowView::control`].
    pub fn pointer_down<C>(
        &mut self,
        windows: &mut WindowManager<C>,
        id: &str,
        region: HitRegion,
        pointer: Point,
    ) -> ViewEffect {
        if let HitRegion::Control(_) = region {
            return ViewEffect::Unchanged;
        }

        // Pressing the front window leaves the stacking untouched
        let already_on_top = windows.top().is_some_and(|w| w.id == id);
        let window = if already_on_top {
            windows.get(id)
        } else {
            windows.focus(id)
        };
        let Some(window) = window else {
            return ViewEffect::Unchanged;
        };

        if region == HitRegion::Title {
            let offset = Point {
                x: pointer.x - window.position.x,
                y: pointer.y - window.position.y,
            };
            debug!(id, offset_x = offset.x, offset_y = offset.y, "drag started");
            self.drag = Some(DragSession {
                window_id: id.to_string(),
                offset,
            });
        }

        if already_on_top {
            ViewEffect::Unchanged
        } else {
            ViewEffect::Updated(id.to_string())
        }
    }

    /// Pointer moved anywhere on the desktop. Only matters while dragging.
    pub fn pointer_move<C>(
        &mut self,
        windows: &mut WindowManager<C>,
        pointer: Point,
        viewport: Viewport,
    ) -> ViewEffect {
        let (id, offset) = match &self.drag {
            Some(drag) => (drag.window_id.clone(), drag.offset),
            None => return ViewEffect::Unchanged,
        };

        let Some(size) = windows.get(&id).map(|w| w.size) else {
            // Window closed underneath the drag
            self.drag = None;
            return ViewEffect::Unchanged;
        };

        let target = Position {
            x: pointer.x - offset.x,
            y: pointer.y - offset.y,
        };
        let clamped = clamp_position(target, size, viewport);
        windows.move_to(&id, clamped.x, clamped.y);
        ViewEffect::Updated(id)
    }

    pub fn pointer_up(&mut self) {
        if let Some(drag) = self.drag.take() {
            debug!(id = %drag.window_id, "drag ended");
        }
    }

    /// A title bar button was clicked
    pub fn control<C>(
        &mut self,
        windows: &mut WindowManager<C>,
        id: &str,
        control: WindowControl,
    ) -> ViewEffect {
        if self.dragging() == Some(id) {
            self.drag = None;
        }

        match control {
            WindowControl::Minimize => match windows.minimize(id) {
                Some(_) => ViewEffect::Updated(id.to_string()),
                None => ViewEffect::Unchanged,
            },
            WindowControl::Close => match windows.close(id) {
                Some(_) => ViewEffect::Closed(id.to_string()),
                None => ViewEffect::Unchanged,
            },
        }
    }
}

/// Keep a window inside the viewport and below the menu bar.
///
/// When the window is larger than the viewport the lower bound wins, so the
/// title bar stays reachable.
pub fn clamp_position(target: Position, size: Size, viewport: Viewport) -> Position {
    let max_x = viewport.width - size.width;
    let max_y = viewport.height - size.height;

    Position {
        x: target.x.min(max_x).max(0.0),
        y: target.y.min(max_y).max(MENU_BAR_HEIGHT),
    }
}

/// Area left for program content once the title bar is drawn
pub fn content_size(size: Size) -> Size {
    Size {
        width: size.width,
        height: (size.height - TITLE_BAR_HEIGHT).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::window::WindowOverrides;

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        height: 700.0,
    };

    fn setup() -> (WindowManager<()>, WindowView, String) {
        let mut windows = WindowManager::new();
        let id = windows.open("notepad", "Notepad", (), None).id.clone();
        (windows, WindowView::new(), id)
    }

    #[test]
    fn test_title_drag_moves_by_pointer_delta() {
        let (mut windows, mut view, id) = setup();
        // Window sits at (100, 100)
        view.pointer_down(&mut windows, &id, HitRegion::Title, Point { x: 110.0, y: 105.0 });
        assert_eq!(view.dragging(), Some(id.as_str()));

        let effect = view.pointer_move(&mut windows, Point { x: 310.0, y: 255.0 }, VIEWPORT);
        assert_eq!(effect, ViewEffect::Updated(id.clone()));
        assert_eq!(windows.get(&id).unwrap().position, Position { x: 300.0, y: 250.0 });

        view.pointer_up();
        assert_eq!(view.dragging(), None);

        let effect = view.pointer_move(&mut windows, Point { x: 0.0, y: 0.0 }, VIEWPORT);
        assert_eq!(effect, ViewEffect::Unchanged);
        assert_eq!(windows.get(&id).unwrap().position, Position { x: 300.0, y: 250.0 });
    }

    #[test]
    fn test_title_press_focuses() {
        let (mut windows, mut view, first) = setup();
        let second = windows.open("finder", "Finder", (), None).id.clone();

        view.pointer_down(&mut windows, &first, HitRegion::Title, Point { x: 120.0, y: 110.0 });
        assert!(windows.get(&first).unwrap().z_order > windows.get(&second).unwrap().z_order);
    }

    #[test]
    fn test_drag_is_clamped_to_viewport() {
        let (mut windows, mut view, id) = setup();
        view.pointer_down(&mut windows, &id, HitRegion::Title, Point { x: 100.0, y: 100.0 });

        // Past the top-left corner: stops at x = 0 and just under the menu bar
        view.pointer_move(&mut windows, Point { x: -500.0, y: -500.0 }, VIEWPORT);
        assert_eq!(
            windows.get(&id).unwrap().position,
            Position { x: 0.0, y: MENU_BAR_HEIGHT }
        );

        // Past the bottom-right corner: 400x300 window stays fully visible
        view.pointer_move(&mut windows, Point { x: 5000.0, y: 5000.0 }, VIEWPORT);
        assert_eq!(windows.get(&id).unwrap().position, Position { x: 600.0, y: 400.0 });
    }

    #[test]
    fn test_body_press_focuses_without_dragging() {
        let (mut windows, mut view, first) = setup();
        let second = windows.open("finder", "Finder", (), None).id.clone();

        let effect = view.pointer_down(&mut windows, &first, HitRegion::Body, Point { x: 150.0, y: 200.0 });
        assert_eq!(effect, ViewEffect::Updated(first.clone()));
        assert_eq!(view.dragging(), None);
        assert_eq!(windows.top().unwrap().id, first);
        assert!(windows.get(&second).is_some());
    }

    #[test]
    fn test_press_on_front_window_keeps_stacking() {
        let (mut windows, mut view, first) = setup();
        let second = windows.open("finder", "Finder", (), None).id.clone();
        let before = windows.get(&second).unwrap().z_order;

        let effect = view.pointer_down(&mut windows, &second, HitRegion::Body, Point { x: 200.0, y: 200.0 });
        assert_eq!(effect, ViewEffect::Unchanged);
        assert_eq!(windows.get(&second).unwrap().z_order, before);

        // Title presses still start a drag
        let effect = view.pointer_down(&mut windows, &second, HitRegion::Title, Point { x: 140.0, y: 135.0 });
        assert_eq!(effect, ViewEffect::Unchanged);
        assert_eq!(view.dragging(), Some(second.as_str()));
        assert_eq!(windows.get(&second).unwrap().z_order, before);

        // The window behind still comes forward
        view.pointer_up();
        let effect = view.pointer_down(&mut windows, &first, HitRegion::Body, Point { x: 110.0, y: 200.0 });
        assert_eq!(effect, ViewEffect::Updated(first.clone()));
        assert!(windows.get(&first).unwrap().z_order > before);
    }

    #[test]
    fn test_controls_never_start_a_drag() {
        let (mut windows, mut view, id) = setup();
        let before = windows.get(&id).unwrap().z_order;

        let region = HitRegion::Control(WindowControl::Minimize);
        let effect = view.pointer_down(&mut windows, &id, region, Point { x: 480.0, y: 110.0 });
        assert_eq!(effect, ViewEffect::Unchanged);
        assert_eq!(view.dragging(), None);
        assert_eq!(windows.get(&id).unwrap().z_order, before);

        let effect = view.control(&mut windows, &id, WindowControl::Minimize);
        assert_eq!(effect, ViewEffect::Updated(id.clone()));
        assert!(windows.get(&id).unwrap().minimized);

        let effect = view.control(&mut windows, &id, WindowControl::Close);
        assert_eq!(effect, ViewEffect::Closed(id.clone()));
        assert!(windows.is_empty());

        let effect = view.control(&mut windows, &id, WindowControl::Close);
        assert_eq!(effect, ViewEffect::Unchanged);
    }

    #[test]
    fn test_drag_ends_when_window_closes() {
        let (mut windows, mut view, id) = setup();
        view.pointer_down(&mut windows, &id, HitRegion::Title, Point { x: 110.0, y: 105.0 });
        windows.close(&id);

        let effect = view.pointer_move(&mut windows, Point { x: 200.0, y: 200.0 }, VIEWPORT);
        assert_eq!(effect, ViewEffect::Unchanged);
        assert_eq!(view.dragging(), None);
    }

    #[test]
    fn test_oversized_window_pins_to_top_left() {
        let size = Size { width: 2000.0, height: 1500.0 };
        let clamped = clamp_position(Position { x: 50.0, y: 50.0 }, size, VIEWPORT);
        assert_eq!(clamped, Position { x: 0.0, y: MENU_BAR_HEIGHT });
    }

    #[test]
    fn test_content_size_excludes_title_bar() {
        let mut windows: WindowManager<()> = WindowManager::new();
        let overrides = WindowOverrides::with_size(Size { width: 250.0, height: 300.0 });
        let window = windows.open("calculator", "Calculator", (), Some(overrides));
        assert_eq!(
            content_size(window.size),
            Size { width: 250.0, height: 300.0 - TITLE_BAR_HEIGHT }
        );
    }

    #[test]
    fn test_hit_region_parsing() {
        assert_eq!(HitRegion::from_str("Title"), Some(HitRegion::Title));
        assert_eq!(
            HitRegion::from_str("close"),
            Some(HitRegion::Control(WindowControl::Close))
        );
        assert_eq!(HitRegion::from_str("resize"), None);
    }
}
