//! `PlatformShell` on top of egui viewport commands

use egui::{Context, ViewportCommand, WindowLevel};
use popcore::geometry::{Point, Rect, Size};
use popcore::PlatformShell;

pub struct NativeShell {
    ctx: Context,
    prefers_dark: bool,
    /// Last rect sent to the window manager
    placed: Option<Rect>,
}

impl NativeShell {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            ctx: cc.egui_ctx.clone(),
            // eframe has already applied the system theme at this point
            prefers_dark: cc.egui_ctx.style().visuals.dark_mode,
            placed: None,
        }
    }

    /// Where the window content currently sits on screen. A placement that
    /// the window manager has not applied yet is not counted.
    fn window_origin(&self) -> Option<egui::Pos2> {
        let reported = self.ctx.input(|i| {
            let viewport = i.viewport();
            viewport.inner_rect.or(viewport.outer_rect).map(|r| r.min)
        });
        choose_origin(reported, self.placed)
    }

    /// Convert a window-local position into screen coordinates.
    pub fn to_screen(&self, local: egui::Pos2) -> Option<Point> {
        Some(screen_point(self.window_origin()?, local))
    }

    pub fn close(&self) {
        self.ctx.send_viewport_cmd(ViewportCommand::Close);
    }
}

impl PlatformShell for NativeShell {
    fn pin_on_top(&mut self) {
        self.ctx.send_viewport_cmd(ViewportCommand::Decorations(false));
        self.ctx
            .send_viewport_cmd(ViewportCommand::WindowLevel(WindowLevel::AlwaysOnTop));
    }

    fn place_window(&mut self, origin: Point, size: Size) {
        let rect = Rect::from_origin_size(origin, size);
        if self.placed == Some(rect) {
            return;
        }
        if self.placed.map(|r| r.size()) != Some(size) {
            self.ctx.send_viewport_cmd(ViewportCommand::InnerSize(egui::vec2(
                size.width as f32,
                size.height as f32,
            )));
        }
        self.ctx.send_viewport_cmd(ViewportCommand::OuterPosition(egui::pos2(
            origin.x as f32,
            origin.y as f32,
        )));
        self.placed = Some(rect);
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    fn clipboard_text(&mut self) -> Option<String> {
        arboard::Clipboard::new().ok().and_then(|mut c| c.get_text().ok())
    }

    fn set_clipboard_text(&mut self, text: &str) {
        self.ctx.output_mut(|o| o.copied_text = text.to_string());
    }

    fn pointer_position(&self) -> Option<Point> {
        let local = self.ctx.input(|i| i.pointer.hover_pos())?;
        self.to_screen(local)
    }

    fn screen_size(&self) -> Option<Size> {
        self.ctx
            .input(|i| i.viewport().monitor_size)
            .map(|m| Size::new(m.x as i32, m.y as i32))
    }
}

/// The position the window reports wins over the one last requested.
fn choose_origin(reported: Option<egui::Pos2>, placed: Option<Rect>) -> Option<egui::Pos2> {
    reported.or_else(|| placed.map(|r| egui::pos2(r.x as f32, r.y as f32)))
}

fn screen_point(origin: egui::Pos2, local: egui::Pos2) -> Point {
    let screen = origin + local.to_vec2();
    Point::new(screen.x.round() as i32, screen.y.round() as i32)
}
