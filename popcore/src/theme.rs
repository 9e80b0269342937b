//! popcalc theme - light and dark palettes, flat buttons, user font
//!
//! The widget draws with four colors per palette. Fonts are looked up by
//! name in the usual system font directories and registered with egui
//! under that name; when none is found the default proportional face is
//! used instead.

use crate::settings::Theme;
use egui::{Color32, FontData, FontDefinitions, FontFamily, FontId, Rounding, Stroke, Style, Visuals};
use std::path::PathBuf;

/// The four colors a palette consists of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Window and display background
    pub background: Color32,
    pub button: Color32,
    /// Text on buttons and display
    pub text: Color32,
    /// Drag handle strip
    pub handle: Color32,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: Color32::from_rgb(0xff, 0xff, 0xff),
        button: Color32::from_rgb(0xf0, 0xf0, 0xf0),
        text: Color32::from_rgb(0x00, 0x00, 0x00),
        handle: Color32::from_rgb(0xd0, 0xd0, 0xd0),
    };

    pub const DARK: Palette = Palette {
        background: Color32::from_rgb(0x33, 0x33, 0x33),
        button: Color32::from_rgb(0x55, 0x55, 0x55),
        text: Color32::from_rgb(0xff, 0xff, 0xff),
        handle: Color32::from_rgb(0x44, 0x44, 0x44),
    };

    pub fn for_theme(theme: Theme) -> Palette {
        match theme {
            Theme::Light => Palette::LIGHT,
            Theme::Dark => Palette::DARK,
        }
    }
}

/// File names a font is commonly shipped under.
fn font_file_names(font_name: &str) -> Vec<String> {
    let squashed: String = font_name.chars().filter(|c| !c.is_whitespace()).collect();
    let lower = squashed.to_lowercase();
    let mut names = vec![
        format!("{}.ttf", lower),
        format!("{}.ttf", squashed),
        format!("{}.TTF", squashed),
    ];
    // Segoe UI ships as segoeui.ttf, Arial as arial.ttf, etc. Some Linux
    // packages use Title_Case names instead.
    if font_name.contains(' ') {
        names.push(format!("{}.ttf", font_name.replace(' ', "_")));
    }
    names
}

fn font_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    // Relative to executable
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            dirs.push(dir.join("fonts"));
        }
    }

    if let Some(windir) = std::env::var_os("WINDIR") {
        dirs.push(PathBuf::from(windir).join("Fonts"));
    }
    dirs.push(PathBuf::from("/Library/Fonts"));
    dirs.push(PathBuf::from("/System/Library/Fonts/Supplemental"));
    dirs.push(PathBuf::from("/usr/share/fonts/truetype/msttcorefonts"));
    dirs.push(PathBuf::from("/usr/share/fonts/TTF"));
    dirs.push(PathBuf::from("/usr/share/fonts"));
    if let Some(base) = directories::BaseDirs::new() {
        dirs.push(base.home_dir().join(".fonts"));
        dirs.push(base.data_local_dir().join("fonts"));
    }
    dirs
}

/// Load a font's bytes from disk by family name.
pub fn load_system_font(font_name: &str) -> Option<Vec<u8>> {
    let names = font_file_names(font_name);
    for dir in font_search_dirs() {
        for name in &names {
            if let Ok(data) = std::fs::read(dir.join(name)) {
                tracing::debug!("loaded font {:?} from {:?}", font_name, dir.join(name));
                return Some(data);
            }
        }
    }
    tracing::debug!("font {:?} not found, using default face", font_name);
    None
}

/// Theme state for the widget: palette plus the registered font family.
pub struct PopTheme {
    pub palette: Palette,
    family: FontFamily,
}

impl PopTheme {
    pub fn new(theme: Theme) -> Self {
        Self {
            palette: Palette::for_theme(theme),
            family: FontFamily::Proportional,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.palette = Palette::for_theme(theme);
    }

    /// A font of `size` in the selected family.
    pub fn font(&self, size: i32) -> FontId {
        FontId::new(size as f32, self.family.clone())
    }

    /// Register `font_name` with egui if it can be found on disk.
    pub fn load_font(&mut self, ctx: &egui::Context, font_name: &str) {
        let mut fonts = FontDefinitions::default();
        self.family = match load_system_font(font_name) {
            Some(data) => {
                fonts.font_data.insert(font_name.to_owned(), FontData::from_owned(data));
                let mut chain = vec![font_name.to_owned()];
                // Fall back to the built-in faces for missing glyphs
                chain.extend(fonts.families.get(&FontFamily::Proportional).cloned().unwrap_or_default());
                let family = FontFamily::Name(font_name.into());
                fonts.families.insert(family.clone(), chain);
                family
            }
            None => FontFamily::Proportional,
        };
        ctx.set_fonts(fonts);
    }

    /// Apply the palette to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let p = self.palette;
        let mut style = Style::default();

        let mut visuals = if p == Palette::DARK { Visuals::dark() } else { Visuals::light() };
        visuals.window_fill = p.background;
        visuals.panel_fill = p.background;
        visuals.faint_bg_color = p.background;
        visuals.extreme_bg_color = p.background;
        visuals.override_text_color = Some(p.text);

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        let flat = |ws: &mut egui::style::WidgetVisuals| {
            ws.bg_fill = p.button;
            ws.weak_bg_fill = p.button;
            ws.bg_stroke = Stroke::NONE;
            ws.fg_stroke = Stroke::new(1.0, p.text);
            ws.rounding = Rounding::ZERO;
        };
        flat(&mut visuals.widgets.noninteractive);
        flat(&mut visuals.widgets.inactive);
        flat(&mut visuals.widgets.hovered);
        flat(&mut visuals.widgets.active);
        flat(&mut visuals.widgets.open);
        // Pressed buttons flash the background color
        visuals.widgets.active.bg_fill = p.background;
        visuals.widgets.active.weak_bg_fill = p.background;

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(0.0, 0.0);
        style.spacing.window_margin = egui::Margin::same(0.0);
        style.spacing.button_padding = egui::vec2(0.0, 0.0);

        ctx.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes() {
        assert_eq!(Palette::for_theme(Theme::Light).background, Color32::WHITE);
        assert_eq!(Palette::for_theme(Theme::Dark).text, Color32::WHITE);
        assert_eq!(Palette::DARK.handle, Color32::from_rgb(0x44, 0x44, 0x44));
    }

    #[test]
    fn test_font_file_names() {
        let names = font_file_names("Segoe UI");
        assert_eq!(names[0], "segoeui.ttf");
        assert!(names.contains(&"Segoe_UI.ttf".to_string()));
        assert_eq!(font_file_names("Arial")[0], "arial.ttf");
    }

    #[test]
    fn test_missing_font_falls_back() {
        let mut theme = PopTheme::new(Theme::Light);
        let ctx = egui::Context::default();
        theme.load_font(&ctx, "No Such Font 1234");
        assert_eq!(theme.font(12), FontId::proportional(12.0));
    }
}
