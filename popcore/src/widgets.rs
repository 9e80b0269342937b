//! Custom widgets - flat pad buttons and the drag handle

use crate::theme::Palette;
use egui::{FontId, Response, Sense, Ui, Widget};

/// A flat button filling exactly the rect it is placed in.
pub struct PadButton<'a> {
    text: &'a str,
    font: FontId,
    palette: Palette,
}

impl<'a> PadButton<'a> {
    pub fn new(text: &'a str, font: FontId, palette: Palette) -> Self {
        Self { text, font, palette }
    }
}

impl<'a> Widget for PadButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            // flash the background color while held down
            let fill = if response.is_pointer_button_down_on() {
                self.palette.background
            } else {
                self.palette.button
            };
            painter.rect_filled(rect, 0.0, fill);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.text,
                self.font,
                self.palette.text,
            );
        }

        response
    }
}

/// The strip along the top used to slide the widget along its edge.
pub struct DragHandle {
    palette: Palette,
}

impl DragHandle {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl Widget for DragHandle {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::drag());
        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(rect, 0.0, self.palette.handle);
        }
        response.on_hover_cursor(egui::CursorIcon::Move)
    }
}

/// Right-aligned read-only text area for the expression.
pub fn display(ui: &mut Ui, text: &str, font: FontId, palette: Palette) -> Response {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, palette.background);
        let pad = rect.height() * 0.1;
        painter.text(
            egui::pos2(rect.right() - pad, rect.center().y),
            egui::Align2::RIGHT_CENTER,
            text,
            font,
            palette.text,
        );
    }
    response
}
