//! A running widget: settings, dock, calculator and their persistence
//!
//! `Session` is what the presentation shell talks to. It reads settings
//! and the screen once at start-up, keeps the dock machine and calculator,
//! pushes window placements to the platform and rewrites the config file
//! after every settings change or finished drag.

use crate::calculator::Calculator;
use crate::dock::{DockMachine, TickOutcome};
use crate::geometry::{compute_layout, Layout, Point, Size, HIDDEN_SIZE};
use crate::platform::PlatformShell;
use crate::settings::{CellSize, DockEdge, Settings, Theme};
use crate::storage::ConfigStore;

/// Used when the platform cannot report the screen size.
pub const FALLBACK_SCREEN: Size = Size::new(1920, 1080);

pub struct Session {
    store: ConfigStore,
    settings: Settings,
    screen: Size,
    dock: DockMachine,
    calculator: Calculator,
}

impl Session {
    /// Load settings, read the screen, pin the window and park it hidden.
    pub fn start(store: ConfigStore, shell: &mut impl PlatformShell) -> Self {
        let defaults = Settings {
            theme: if shell.prefers_dark() { Theme::Dark } else { Theme::Light },
            ..Settings::default()
        };
        let settings = store.load_with_defaults(&defaults);
        let screen = shell.screen_size().unwrap_or_else(|| {
            tracing::warn!("screen size unavailable, assuming {}x{}", FALLBACK_SCREEN.width, FALLBACK_SCREEN.height);
            FALLBACK_SCREEN
        });
        let layout = Self::layout_for(&settings, screen);
        tracing::info!(
            edge = ?settings.dock_edge,
            cell = layout.cell,
            screen_w = screen.width,
            screen_h = screen.height,
            "starting docked"
        );

        let session = Self {
            store,
            settings,
            screen,
            dock: DockMachine::new(layout),
            calculator: Calculator::new(),
        };
        shell.pin_on_top();
        session.place(shell);
        session
    }

    fn layout_for(settings: &Settings, screen: Size) -> Layout {
        compute_layout(settings, screen, HIDDEN_SIZE, settings.anchor_for(settings.dock_edge))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> &Layout {
        self.dock.layout()
    }

    pub fn dock(&self) -> &DockMachine {
        &self.dock
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    fn place(&self, shell: &mut impl PlatformShell) {
        shell.place_window(self.dock.window_origin(), self.dock.layout().size());
    }

    /// One poll of the dock loop.
    pub fn tick(&mut self, shell: &mut impl PlatformShell) -> TickOutcome {
        let outcome = self.dock.tick(shell.pointer_position());
        if outcome.moved {
            self.place(shell);
        }
        outcome
    }

    fn relayout(&mut self, shell: &mut impl PlatformShell) {
        let layout = Self::layout_for(&self.settings, self.screen);
        self.dock.relayout(layout);
        self.place(shell);
    }

    fn persist(&self) {
        self.store.save(&self.settings);
    }

    pub fn set_cell_size(&mut self, size: CellSize, shell: &mut impl PlatformShell) {
        if self.settings.cell_size == size {
            return;
        }
        tracing::info!("button size -> {}", size.px());
        self.settings.cell_size = size;
        self.relayout(shell);
        self.persist();
    }

    pub fn set_dock_edge(&mut self, edge: DockEdge, shell: &mut impl PlatformShell) {
        if self.settings.dock_edge == edge {
            return;
        }
        tracing::info!("side -> {:?}", edge);
        self.settings.dock_edge = edge;
        self.relayout(shell);
        self.persist();
    }

    pub fn set_font(&mut self, font_name: &str) {
        if self.settings.font_name == font_name {
            return;
        }
        tracing::info!("font -> {}", font_name);
        self.settings.font_name = font_name.to_string();
        self.persist();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.settings.theme == theme {
            return;
        }
        tracing::info!("theme -> {:?}", theme);
        self.settings.theme = theme;
        self.persist();
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        self.dock.begin_drag(pointer);
    }

    pub fn drag_to(&mut self, pointer: Point, shell: &mut impl PlatformShell) {
        if let Some(anchor) = self.dock.drag_to(pointer) {
            self.settings.set_anchor_for(self.settings.dock_edge, Some(anchor));
            self.place(shell);
        }
    }

    /// Finish a drag and persist where it ended.
    pub fn end_drag(&mut self) {
        if let Some(anchor) = self.dock.end_drag() {
            self.settings.set_anchor_for(self.settings.dock_edge, Some(anchor));
            self.persist();
        }
    }

    /// Handle a grid button.
    pub fn press(&mut self, label: &str) {
        self.calculator.press(label);
    }

    pub fn copy(&self, shell: &mut impl PlatformShell) {
        shell.set_clipboard_text(self.calculator.display_text());
    }

    /// Append the clipboard if it holds a plain number.
    pub fn paste(&mut self, shell: &mut impl PlatformShell) -> bool {
        match shell.clipboard_text() {
            Some(text) => self.calculator.paste(&text),
            None => false,
        }
    }

    /// Hand-typed or pasted text that is not from the clipboard button.
    pub fn paste_text(&mut self, text: &str) -> bool {
        self.calculator.paste(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::DockPhase;
    use crate::geometry::Rect;
    use crate::platform::HeadlessShell;
    use crate::storage::CONFIG_FILENAME;

    const SCREEN: Size = Size::new(1920, 1080);

    fn fresh(dir: &tempfile::TempDir) -> (Session, HeadlessShell) {
        let mut shell = HeadlessShell::new(SCREEN);
        let store = ConfigStore::new(dir.path().join(CONFIG_FILENAME));
        let session = Session::start(store, &mut shell);
        (session, shell)
    }

    fn sliver_center(session: &Session) -> Point {
        let r = session.layout().sliver_rect();
        Point::new(r.x + r.width / 2, r.y + r.height / 2)
    }

    #[test]
    fn test_start_parks_hidden() {
        let dir = tempfile::tempdir().unwrap();
        let (session, shell) = fresh(&dir);
        assert!(shell.pinned);
        assert_eq!(shell.placements, vec![Rect::new(1900, 378, 192, 324)]);
        assert_eq!(session.dock().phase(), DockPhase::Hidden);
        assert_eq!(session.settings(), &Settings::default());
        // Nothing is written until something changes.
        assert!(!session.store().path().exists());
    }

    #[test]
    fn test_first_run_theme_follows_platform() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = HeadlessShell::new(SCREEN);
        shell.dark = true;
        let session = Session::start(ConfigStore::new(dir.path().join(CONFIG_FILENAME)), &mut shell);
        assert_eq!(session.settings().theme, Theme::Dark);
    }

    #[test]
    fn test_hover_slides_window_out() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, mut shell) = fresh(&dir);
        shell.pointer = Some(sliver_center(&session));
        let mut ticks = 0;
        while session.dock().phase() != DockPhase::Visible {
            session.tick(&mut shell);
            ticks += 1;
            assert!(ticks <= 18);
        }
        assert_eq!(ticks, 18);
        assert_eq!(shell.placements.len(), 19);
        assert_eq!(shell.last_placement(), Some(Rect::new(1728, 378, 192, 324)));

        // Idle ticks do not reposition.
        session.tick(&mut shell);
        assert_eq!(shell.placements.len(), 19);
    }

    #[test]
    fn test_settings_changes_persist_and_relayout() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, mut shell) = fresh(&dir);
        session.set_cell_size(CellSize::S64, &mut shell);
        session.set_dock_edge(DockEdge::Top, &mut shell);
        session.set_font("Tahoma");
        session.set_theme(Theme::Dark);

        let layout = *session.layout();
        assert_eq!(layout.full_width, 256);
        assert_eq!(
            shell.last_placement(),
            Some(Rect::new((1920 - 256) / 2, layout.hidden_offset, 256, layout.full_height))
        );

        let reloaded = session.store().load();
        assert_eq!(&reloaded, session.settings());
        assert_eq!(reloaded.dock_edge, DockEdge::Top);
        assert_eq!(reloaded.font_name, "Tahoma");
    }

    #[test]
    fn test_drag_persists_clamped_anchor() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, mut shell) = fresh(&dir);
        let grab = sliver_center(&session);
        session.begin_drag(grab);
        session.drag_to(Point::new(grab.x, grab.y + 10_000), &mut shell);
        let placed = shell.last_placement().unwrap();
        assert_eq!(placed.bottom(), SCREEN.height);
        session.end_drag();

        let reloaded = session.store().load();
        assert_eq!(reloaded.anchor_y, Some(1080 - 324));
        assert_eq!(reloaded.anchor_x, None);

        // A later session starts where the drag ended.
        let mut shell2 = HeadlessShell::new(SCREEN);
        let again = Session::start(session.store().clone(), &mut shell2);
        assert_eq!(again.layout().anchor, 1080 - 324);
    }

    #[test]
    fn test_copy_and_paste() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, mut shell) = fresh(&dir);
        for key in ["6", "*", "7", "="] {
            session.press(key);
        }
        session.copy(&mut shell);
        assert_eq!(shell.clipboard.as_deref(), Some("42"));

        session.press("C");
        shell.clipboard = Some("abc".to_string());
        assert!(!session.paste(&mut shell));
        shell.clipboard = None;
        assert!(!session.paste(&mut shell));
        shell.clipboard = Some("3.14".to_string());
        assert!(session.paste(&mut shell));
        assert_eq!(session.calculator().display_text(), "3.14");
    }

    #[test]
    fn test_missing_screen_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let mut shell = HeadlessShell::default();
        let session = Session::start(ConfigStore::new(dir.path().join(CONFIG_FILENAME)), &mut shell);
        assert_eq!(session.layout().screen, FALLBACK_SCREEN);
    }
}
