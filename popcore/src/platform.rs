//! Platform capabilities the core leans on
//!
//! Window placement, always-on-top, theme probing, the clipboard, the
//! pointer and the screen all live behind `PlatformShell`. The desktop
//! binary implements it on top of egui; `HeadlessShell` is a recording
//! fake for tests and headless runs.

use crate::geometry::{Point, Rect, Size};

pub trait PlatformShell {
    /// Borderless, always on top.
    fn pin_on_top(&mut self);

    /// Move and size the window, in screen coordinates.
    fn place_window(&mut self, origin: Point, size: Size);

    /// Whether the OS prefers a dark appearance.
    fn prefers_dark(&self) -> bool;

    /// Current clipboard text, if any could be read.
    fn clipboard_text(&mut self) -> Option<String>;

    fn set_clipboard_text(&mut self, text: &str);

    /// Screen-space pointer position, or `None` when it is not over the widget.
    fn pointer_position(&self) -> Option<Point>;

    /// Usable display area, or `None` if it cannot be determined.
    fn screen_size(&self) -> Option<Size>;
}

/// Recording fake with a scripted pointer and screen.
#[derive(Debug, Clone, Default)]
pub struct HeadlessShell {
    pub screen: Option<Size>,
    pub pointer: Option<Point>,
    pub dark: bool,
    pub clipboard: Option<String>,
    pub pinned: bool,
    /// Every window rect handed to `place_window`, oldest first.
    pub placements: Vec<Rect>,
}

impl HeadlessShell {
    pub fn new(screen: Size) -> Self {
        Self {
            screen: Some(screen),
            ..Self::default()
        }
    }

    pub fn last_placement(&self) -> Option<Rect> {
        self.placements.last().copied()
    }
}

impl PlatformShell for HeadlessShell {
    fn pin_on_top(&mut self) {
        self.pinned = true;
    }

    fn place_window(&mut self, origin: Point, size: Size) {
        self.placements.push(Rect::from_origin_size(origin, size));
    }

    fn prefers_dark(&self) -> bool {
        self.dark
    }

    fn clipboard_text(&mut self) -> Option<String> {
        self.clipboard.clone()
    }

    fn set_clipboard_text(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
    }

    fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }

    fn screen_size(&self) -> Option<Size> {
        self.screen
    }
}
