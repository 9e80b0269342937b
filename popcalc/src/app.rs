//! popcalc application

use crate::shell::NativeShell;
use egui::{Context, Key, Response};
use popcore::geometry::{Rect, BUTTON_LABELS};
use popcore::settings::{CellSize, DockEdge, Theme, FONT_CHOICES};
use popcore::storage::ConfigStore;
use popcore::widgets::{display, DragHandle, PadButton};
use popcore::{PollScheduler, PopTheme, Session};
use std::time::Instant;

/// Something picked from the context menu.
#[derive(Debug, Clone, PartialEq)]
enum MenuAction {
    Size(CellSize),
    Font(&'static str),
    Side(DockEdge),
    Theme(Theme),
    Exit,
}

/// Keyboard input mapped onto the pad.
#[derive(Debug, Clone, PartialEq)]
enum KeyAction {
    Token(String),
    Evaluate,
    Clear,
    Copy,
    Paste(String),
}

pub struct PopCalcApp {
    shell: NativeShell,
    /// Taken when the session starts on the first frame.
    store: Option<ConfigStore>,
    session: Option<Session>,
    theme: PopTheme,
    /// Theme and font currently installed in the egui context.
    applied: Option<(Theme, String)>,
    scheduler: PollScheduler,
    dragging: bool,
}

impl PopCalcApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let store = ConfigStore::default_location();
        tracing::info!("config file: {:?}", store.path());
        Self {
            shell: NativeShell::new(cc),
            store: Some(store),
            session: None,
            theme: PopTheme::new(Theme::Light),
            applied: None,
            scheduler: PollScheduler::new(),
            dragging: false,
        }
    }

    /// The screen size is only known once the first frame has run.
    fn ensure_session(&mut self) {
        if self.session.is_none() {
            if let Some(store) = self.store.take() {
                self.session = Some(Session::start(store, &mut self.shell));
            }
        }
    }

    fn sync_theme(&mut self, ctx: &Context) {
        let Some(session) = &self.session else { return };
        let settings = session.settings();
        let wanted = (settings.theme, settings.font_name.clone());
        if self.applied.as_ref() == Some(&wanted) {
            return;
        }
        let font_changed = self.applied.as_ref().map(|(_, f)| f) != Some(&wanted.1);
        self.theme.set_theme(wanted.0);
        if font_changed {
            self.theme.load_font(ctx, &wanted.1);
        }
        self.theme.apply(ctx);
        self.applied = Some(wanted);
    }

    fn read_keys(ctx: &Context) -> Vec<KeyAction> {
        ctx.input(|i| {
            let mut actions = Vec::new();
            for event in &i.events {
                match event {
                    egui::Event::Text(text) => {
                        for c in text.chars() {
                            match c {
                                '0'..='9' | '+' | '-' | '*' | '/' | '(' | ')' | '.' => {
                                    actions.push(KeyAction::Token(c.to_string()));
                                }
                                '=' => actions.push(KeyAction::Evaluate),
                                _ => {}
                            }
                        }
                    }
                    egui::Event::Key { key, pressed: true, .. } => match key {
                        Key::Enter => actions.push(KeyAction::Evaluate),
                        Key::Escape | Key::Delete => actions.push(KeyAction::Clear),
                        _ => {}
                    },
                    egui::Event::Copy => actions.push(KeyAction::Copy),
                    egui::Event::Paste(text) => actions.push(KeyAction::Paste(text.clone())),
                    _ => {}
                }
            }
            actions
        })
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let actions = Self::read_keys(ctx);
        let Some(session) = &mut self.session else { return };
        for action in actions {
            match action {
                KeyAction::Token(t) => session.press(&t),
                KeyAction::Evaluate => session.press("="),
                KeyAction::Clear => session.press("C"),
                KeyAction::Copy => session.copy(&mut self.shell),
                KeyAction::Paste(text) => {
                    session.paste_text(&text);
                }
            }
        }
    }

    fn settings_menu(ui: &mut egui::Ui, session: &Session) -> Option<MenuAction> {
        let settings = session.settings();
        let mut action = None;

        ui.menu_button("Change Size", |ui| {
            for size in CellSize::ALL {
                if ui.radio(settings.cell_size == size, size.label()).clicked() {
                    action = Some(MenuAction::Size(size));
                    ui.close_menu();
                }
            }
        });
        ui.menu_button("Change Font", |ui| {
            for font in FONT_CHOICES {
                if ui.radio(settings.font_name == font, font).clicked() {
                    action = Some(MenuAction::Font(font));
                    ui.close_menu();
                }
            }
        });
        ui.menu_button("Change Side", |ui| {
            for edge in DockEdge::ALL {
                if ui.radio(settings.dock_edge == edge, edge.label()).clicked() {
                    action = Some(MenuAction::Side(edge));
                    ui.close_menu();
                }
            }
        });
        ui.menu_button("Change Theme", |ui| {
            for theme in Theme::ALL {
                if ui.radio(settings.theme == theme, theme.label()).clicked() {
                    action = Some(MenuAction::Theme(theme));
                    ui.close_menu();
                }
            }
        });
        ui.separator();
        if ui.button("Exit").clicked() {
            action = Some(MenuAction::Exit);
            ui.close_menu();
        }

        action
    }

    fn apply_menu(&mut self, action: MenuAction) {
        let Some(session) = &mut self.session else { return };
        match action {
            MenuAction::Size(size) => session.set_cell_size(size, &mut self.shell),
            MenuAction::Font(font) => session.set_font(font),
            MenuAction::Side(edge) => session.set_dock_edge(edge, &mut self.shell),
            MenuAction::Theme(theme) => session.set_theme(theme),
            MenuAction::Exit => {
                self.scheduler.stop();
                self.shell.close();
            }
        }
    }

    /// Handle drag on the strip at the top. Pointer positions are taken in
    /// screen space so the moving window does not feed back into the drag.
    fn follow_drag(&mut self, handle: &Response) {
        let Some(session) = &mut self.session else { return };
        let pointer = handle
            .interact_pointer_pos()
            .and_then(|p| self.shell.to_screen(p));

        if handle.dragged() {
            if let Some(pointer) = pointer {
                if !self.dragging {
                    session.begin_drag(pointer);
                    self.dragging = true;
                } else {
                    session.drag_to(pointer, &mut self.shell);
                }
            }
        } else if self.dragging {
            session.end_drag();
            self.dragging = false;
        }
    }

    fn render(&mut self, ui: &mut egui::Ui) -> Option<MenuAction> {
        let session = self.session.as_ref()?;
        let layout = *session.layout();
        let palette = self.theme.palette;
        let to_egui = |r: Rect| {
            egui::Rect::from_min_size(
                egui::pos2(r.x as f32, r.y as f32),
                egui::vec2(r.width as f32, r.height as f32),
            )
        };

        let handle = ui.put(to_egui(layout.handle_rect()), DragHandle::new(palette));

        let copy_font = self.theme.font(layout.copy_font);
        let copy = ui.put(
            to_egui(layout.copy_rect()),
            PadButton::new("Copy", copy_font.clone(), palette),
        );
        let paste = ui.put(
            to_egui(layout.paste_rect()),
            PadButton::new("Paste", copy_font, palette),
        );

        let shown = ui.allocate_ui_at_rect(to_egui(layout.display_rect()), |ui| {
            display(
                ui,
                session.calculator().display_text(),
                self.theme.font(layout.display_font),
                palette,
            )
        });

        let mut pressed = None;
        let mut everything = handle.clone() | copy.clone() | paste.clone() | shown.inner;
        let button_font = self.theme.font(layout.button_font);
        for (row, labels) in BUTTON_LABELS.iter().enumerate() {
            for (col, label) in labels.iter().enumerate() {
                let resp = ui.put(
                    to_egui(layout.button_rect(row, col)),
                    PadButton::new(label, button_font.clone(), palette),
                );
                if resp.clicked() {
                    pressed = Some(*label);
                }
                everything = everything | resp;
            }
        }

        let mut action = None;
        everything.context_menu(|ui| {
            action = Self::settings_menu(ui, session);
        });

        let copy_clicked = copy.clicked();
        let paste_clicked = paste.clicked();
        self.follow_drag(&handle);

        if let Some(session) = &mut self.session {
            if let Some(label) = pressed {
                session.press(label);
            }
            if copy_clicked {
                session.copy(&mut self.shell);
            }
            if paste_clicked {
                session.paste(&mut self.shell);
            }
        }

        action
    }
}

impl eframe::App for PopCalcApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.ensure_session();
        self.sync_theme(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            self.scheduler.stop();
        }

        self.handle_keys(ctx);

        let animating = self.session.as_ref().map_or(false, |s| s.dock().is_animating());
        let now = Instant::now();
        if self.scheduler.is_due(now, animating) {
            if let Some(session) = &mut self.session {
                session.tick(&mut self.shell);
            }
            self.scheduler.mark_polled(now);
        }

        let mut action = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.palette.background))
            .show(ctx, |ui| {
                action = self.render(ui);
            });

        if let Some(action) = action {
            self.apply_menu(action);
        }

        let animating = self.session.as_ref().map_or(false, |s| s.dock().is_animating());
        self.scheduler.schedule(ctx, animating);
    }
}
