use tracing::{debug, info};
use uuid::Uuid;

use self::window::{Position, Size, WindowOverrides, WindowRecord};

pub mod window;

/// First stacking value handed out by a fresh manager
pub const INITIAL_Z_ORDER: u64 = 1000;
pub const DEFAULT_WINDOW_SIZE: Size = Size {
    width: 400.0,
    height: 300.0,
};
/// New windows cascade from here, stepping down-right once per open window
pub const CASCADE_ORIGIN: f64 = 100.0;
pub const CASCADE_STEP: f64 = 30.0;

/// Owns every open window and the stacking counter.
///
/// Operations are addressed by window id. An id that is not open is ignored,
/// the same way a click on a window that has just closed is ignored.
pub struct WindowManager<C> {
    windows: Vec<WindowRecord<C>>, // Insertion order, breaks stacking ties
    next_z_order: u64,
}

impl<C> Default for WindowManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> WindowManager<C> {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            next_z_order: INITIAL_Z_ORDER,
        }
    }

    /// Open a window on top of everything else.
    /// The first window sits at the cascade origin, each later one is offset
    /// by one cascade step per window already open.
    pub fn open(
        &mut self,
        program_id: &str,
        title: impl Into<String>,
        content: C,
        overrides: Option<WindowOverrides>,
    ) -> &WindowRecord<C> {
        let overrides = overrides.unwrap_or_default();
        let offset = CASCADE_ORIGIN + self.windows.len() as f64 * CASCADE_STEP;

        let window = WindowRecord {
            id: format!("{}-{}", program_id, Uuid::new_v4()),
            title: title.into(),
            content,
            position: Position {
                x: overrides.x.unwrap_or(offset),
                y: overrides.y.unwrap_or(offset),
            },
            size: Size {
                width: overrides.width.unwrap_or(DEFAULT_WINDOW_SIZE.width),
                height: overrides.height.unwrap_or(DEFAULT_WINDOW_SIZE.height),
            },
            z_order: self.bump_z_order(),
            minimized: false,
        };

        info!(id = %window.id, title = %window.title, z_order = window.z_order, "window opened");
        self.windows.push(window);
        &self.windows[self.windows.len() - 1]
    }

    /// Close a window. Returns the removed record, if it was open.
    pub fn close(&mut self, id: &str) -> Option<WindowRecord<C>> {
        let index = self.index_of(id)?;
        let removed = self.windows.remove(index);
        info!(id, "window closed");
        Some(removed)
    }

    /// Raise a window above every stacking value issued so far
    pub fn focus(&mut self, id: &str) -> Option<&WindowRecord<C>> {
        let index = self.index_of(id)?;
        let z_order = self.bump_z_order();
        let window = &mut self.windows[index];
        window.z_order = z_order;
        debug!(id, z_order, "window focused");
        Some(&*window)
    }

    /// Move a window. Coordinates are taken as-is; bounds checks belong to the caller.
    pub fn move_to(&mut self, id: &str, x: f64, y: f64) -> Option<&WindowRecord<C>> {
        let window = self.get_mut(id)?;
        window.position = Position { x, y };
        Some(&*window)
    }

    pub fn minimize(&mut self, id: &str) -> Option<&WindowRecord<C>> {
        let window = self.get_mut(id)?;
        window.minimized = true;
        debug!(id, "window minimized");
        Some(&*window)
    }

    /// Un-minimize a window and bring it to the front
    pub fn restore(&mut self, id: &str) -> Option<&WindowRecord<C>> {
        let index = self.index_of(id)?;
        let z_order = self.bump_z_order();
        let window = &mut self.windows[index];
        window.minimized = false;
        window.z_order = z_order;
        debug!(id, z_order, "window restored");
        Some(&*window)
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord<C>> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// All open windows in the order they were opened
    pub fn windows(&self) -> &[WindowRecord<C>] {
        &self.windows
    }

    /// Visible windows, bottom-most first
    pub fn render_order(&self) -> Vec<&WindowRecord<C>> {
        let mut visible: Vec<_> = self.windows.iter().filter(|w| !w.minimized).collect();
        // Stable sort keeps insertion order for equal stacking values
        visible.sort_by_key(|w| w.z_order);
        visible
    }

    pub fn minimized(&self) -> Vec<&WindowRecord<C>> {
        self.windows.iter().filter(|w| w.minimized).collect()
    }

    /// The visible window with the highest stacking order
    pub fn top(&self) -> Option<&WindowRecord<C>> {
        self.windows
            .iter()
            .filter(|w| !w.minimized)
            .max_by_key(|w| w.z_order)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.windows.iter().position(|w| w.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut WindowRecord<C>> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    fn bump_z_order(&mut self) -> u64 {
        let z_order = self.next_z_order;
        self.next_z_order += 1;
        z_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn open(manager: &mut WindowManager<&'static str>, program: &str) -> String {
        manager.open(program, program, "content", None).id.clone()
    }

    fn ids(windows: &[&WindowRecord<&'static str>]) -> Vec<String> {
        windows.iter().map(|w| w.id.clone()).collect()
    }

    #[test]
    fn test_open_defaults_and_cascade() {
        let mut manager = WindowManager::new();

        let first = manager.open("notepad", "Notepad", "a", None).clone();
        assert_eq!(first.position, Position { x: 100.0, y: 100.0 });
        assert_eq!(first.size, DEFAULT_WINDOW_SIZE);
        assert_eq!(first.z_order, INITIAL_Z_ORDER);
        assert!(!first.minimized);
        assert!(first.id.starts_with("notepad-"));

        let second = manager.open("finder", "Finder", "b", None).clone();
        assert_eq!(second.position, Position { x: 130.0, y: 130.0 });
        assert_eq!(second.z_order, INITIAL_Z_ORDER + 1);
    }

    #[test]
    fn test_open_applies_overrides() {
        let mut manager = WindowManager::new();

        let size_only = WindowOverrides::with_size(Size { width: 250.0, height: 300.0 });
        let window = manager.open("calculator", "Calculator", "c", Some(size_only));
        assert_eq!(window.size, Size { width: 250.0, height: 300.0 });
        assert_eq!(window.position, Position { x: 100.0, y: 100.0 });

        let placed = WindowOverrides {
            x: Some(5.0),
            y: Some(40.0),
            ..WindowOverrides::default()
        };
        let window = manager.open("finder", "Finder", "f", Some(placed));
        assert_eq!(window.position, Position { x: 5.0, y: 40.0 });
        assert_eq!(window.size, DEFAULT_WINDOW_SIZE);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut manager = WindowManager::new();
        let ids: HashSet<String> = (0..50).map(|_| open(&mut manager, "notepad")).collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut manager = WindowManager::new();
        let a = open(&mut manager, "a");
        let b = open(&mut manager, "b");

        assert!(manager.close(&a).is_some());
        let after_first: Vec<_> = manager.windows().to_vec();

        assert!(manager.close(&a).is_none());
        assert_eq!(manager.windows(), after_first.as_slice());
        assert_eq!(manager.windows()[0].id, b);
    }

    #[test]
    fn test_focus_raises_above_all_others() {
        let mut manager = WindowManager::new();
        let notepad = open(&mut manager, "notepad");
        let calculator = open(&mut manager, "calculator");
        let finder = open(&mut manager, "finder");

        manager.focus(&notepad);

        let focused = manager.get(&notepad).unwrap().z_order;
        assert!(focused > manager.get(&calculator).unwrap().z_order);
        assert!(focused > manager.get(&finder).unwrap().z_order);
        assert_eq!(manager.top().unwrap().id, notepad);
    }

    #[test]
    fn test_stacking_values_are_never_reused() {
        let mut manager = WindowManager::new();
        let a = open(&mut manager, "a");
        let b = open(&mut manager, "b");
        let highest = manager.get(&b).unwrap().z_order;

        manager.close(&b);
        let c = open(&mut manager, "c");
        assert!(manager.get(&c).unwrap().z_order > highest);

        manager.focus(&a);
        assert!(manager.get(&a).unwrap().z_order > manager.get(&c).unwrap().z_order);
    }

    #[test]
    fn test_move_is_not_clamped() {
        let mut manager = WindowManager::new();
        let a = open(&mut manager, "a");

        manager.move_to(&a, -250.0, 99999.5);
        assert_eq!(
            manager.get(&a).unwrap().position,
            Position { x: -250.0, y: 99999.5 }
        );
    }

    #[test]
    fn test_minimize_keeps_stacking_and_restore_raises() {
        let mut manager = WindowManager::new();
        let a = open(&mut manager, "a");
        let _b = open(&mut manager, "b");
        let before = manager.get(&a).unwrap().z_order;

        manager.minimize(&a);
        let window = manager.get(&a).unwrap();
        assert!(window.minimized);
        assert_eq!(window.z_order, before);
        assert_eq!(ids(&manager.minimized()), vec![a.clone()]);

        manager.restore(&a);
        let window = manager.get(&a).unwrap();
        assert!(!window.minimized);
        assert!(window.z_order > before);
        assert_eq!(manager.top().unwrap().id, a);
    }

    #[test]
    fn test_render_order_after_close() {
        let mut manager = WindowManager::new();
        let a = open(&mut manager, "a");
        let b = open(&mut manager, "b");
        let c = open(&mut manager, "c");

        manager.close(&b);
        assert_eq!(ids(&manager.render_order()), vec![a, c]);
    }

    #[test]
    fn test_render_order_skips_minimized_and_follows_focus() {
        let mut manager = WindowManager::new();
        let a = open(&mut manager, "a");
        let b = open(&mut manager, "b");
        let c = open(&mut manager, "c");

        manager.focus(&a);
        manager.minimize(&b);
        assert_eq!(ids(&manager.render_order()), vec![c, a]);
    }

    #[test]
    fn test_unknown_id_leaves_windows_untouched() {
        let mut manager = WindowManager::new();
        open(&mut manager, "a");
        let b = open(&mut manager, "b");
        manager.move_to(&b, 12.0, 34.0);
        let snapshot: Vec<_> = manager.windows().to_vec();

        assert!(manager.close("missing").is_none());
        assert!(manager.focus("missing").is_none());
        assert!(manager.move_to("missing", 1.0, 2.0).is_none());
        assert!(manager.minimize("missing").is_none());
        assert!(manager.restore("missing").is_none());

        assert_eq!(manager.windows(), snapshot.as_slice());

        // A missed focus must not consume a stacking value either
        let c = open(&mut manager, "c");
        assert_eq!(manager.get(&c).unwrap().z_order, INITIAL_Z_ORDER + 2);
    }
}
