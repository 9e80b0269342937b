//! Persisted widget settings
//!
//! `Settings` is the typed record the rest of the crate works with.
//! `RawSettings` is what actually comes off disk: every field optional and
//! read leniently, so one bad value never throws away the others.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Fonts offered in the context menu.
pub const FONT_CHOICES: [&str; 5] = ["Arial", "Tahoma", "Calibri", "Verdana", "Segoe UI"];

pub const DEFAULT_FONT: &str = "Arial";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("unsupported button size: {0}")]
pub struct InvalidCellSize(pub u32);

/// Edge length of one calculator button, in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CellSize {
    #[default]
    S48,
    S64,
    S128,
    S256,
}

impl CellSize {
    pub const ALL: [CellSize; 4] = [CellSize::S48, CellSize::S64, CellSize::S128, CellSize::S256];

    pub fn px(self) -> i32 {
        match self {
            CellSize::S48 => 48,
            CellSize::S64 => 64,
            CellSize::S128 => 128,
            CellSize::S256 => 256,
        }
    }

    /// Menu label, e.g. "64x64".
    pub fn label(self) -> String {
        format!("{0}x{0}", self.px())
    }
}

impl TryFrom<u32> for CellSize {
    type Error = InvalidCellSize;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            48 => Ok(CellSize::S48),
            64 => Ok(CellSize::S64),
            128 => Ok(CellSize::S128),
            256 => Ok(CellSize::S256),
            other => Err(InvalidCellSize(other)),
        }
    }
}

impl From<CellSize> for u32 {
    fn from(size: CellSize) -> u32 {
        size.px() as u32
    }
}

/// Axis along which the widget slides in and out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockEdge {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
}

impl DockEdge {
    pub const ALL: [DockEdge; 4] = [DockEdge::Left, DockEdge::Right, DockEdge::Top, DockEdge::Bottom];

    /// The hide/show axis. Dragging happens on the other one.
    pub fn axis(self) -> Axis {
        match self {
            DockEdge::Left | DockEdge::Right => Axis::Horizontal,
            DockEdge::Top | DockEdge::Bottom => Axis::Vertical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DockEdge::Left => "Left",
            DockEdge::Right => "Right",
            DockEdge::Top => "Top",
            DockEdge::Bottom => "Bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

/// Settings as written to `calc_config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    #[serde(rename = "button_size")]
    pub cell_size: CellSize,
    #[serde(rename = "side")]
    pub dock_edge: DockEdge,
    #[serde(rename = "current_font")]
    pub font_name: String,
    pub theme: Theme,
    /// Cross-axis position when docked top/bottom. `None` = centered.
    #[serde(rename = "x_pos")]
    pub anchor_x: Option<i32>,
    /// Cross-axis position when docked left/right. `None` = centered.
    #[serde(rename = "y_pos")]
    pub anchor_y: Option<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_size: CellSize::default(),
            dock_edge: DockEdge::default(),
            font_name: DEFAULT_FONT.to_string(),
            theme: Theme::default(),
            anchor_x: None,
            anchor_y: None,
        }
    }
}

impl Settings {
    /// The stored anchor that applies to `edge`.
    pub fn anchor_for(&self, edge: DockEdge) -> Option<i32> {
        match edge.axis() {
            Axis::Horizontal => self.anchor_y,
            Axis::Vertical => self.anchor_x,
        }
    }

    pub fn set_anchor_for(&mut self, edge: DockEdge, value: Option<i32>) {
        match edge.axis() {
            Axis::Horizontal => self.anchor_y = value,
            Axis::Vertical => self.anchor_x = value,
        }
    }
}

/// On-disk record before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawSettings {
    #[serde(default, deserialize_with = "lenient")]
    pub button_size: Option<CellSize>,
    #[serde(default, deserialize_with = "lenient")]
    pub side: Option<DockEdge>,
    #[serde(default, deserialize_with = "lenient")]
    pub current_font: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub theme: Option<Theme>,
    #[serde(default, deserialize_with = "lenient")]
    pub x_pos: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub y_pos: Option<i32>,
}

impl RawSettings {
    /// Fill every absent field from `defaults`.
    pub fn resolve(self, defaults: &Settings) -> Settings {
        Settings {
            cell_size: self.button_size.unwrap_or(defaults.cell_size),
            dock_edge: self.side.unwrap_or(defaults.dock_edge),
            font_name: self
                .current_font
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| defaults.font_name.clone()),
            theme: self.theme.unwrap_or(defaults.theme),
            anchor_x: self.x_pos.or(defaults.anchor_x),
            anchor_y: self.y_pos.or(defaults.anchor_y),
        }
    }
}

/// Read a field as `T`, turning a wrong type or value into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_size_conversion() {
        for size in CellSize::ALL {
            assert_eq!(CellSize::try_from(u32::from(size)), Ok(size));
        }
        assert_eq!(CellSize::try_from(50), Err(InvalidCellSize(50)));
        assert_eq!(CellSize::S128.label(), "128x128");
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["button_size"], 48);
        assert_eq!(json["side"], "right");
        assert_eq!(json["current_font"], "Arial");
        assert_eq!(json["theme"], "light");
        assert!(json["x_pos"].is_null());
        assert!(json["y_pos"].is_null());
    }

    #[test]
    fn test_bad_fields_fall_back_individually() {
        let raw: RawSettings = serde_json::from_str(
            r#"{"button_size": 50, "side": "bottom", "current_font": 7, "theme": "dark", "y_pos": "x"}"#,
        )
        .unwrap();
        let s = raw.resolve(&Settings::default());
        assert_eq!(s.cell_size, CellSize::S48);
        assert_eq!(s.dock_edge, DockEdge::Bottom);
        assert_eq!(s.font_name, "Arial");
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.anchor_y, None);
    }

    #[test]
    fn test_anchor_follows_axis() {
        let mut s = Settings::default();
        s.set_anchor_for(DockEdge::Left, Some(120));
        s.set_anchor_for(DockEdge::Top, Some(300));
        assert_eq!(s.anchor_y, Some(120));
        assert_eq!(s.anchor_x, Some(300));
        assert_eq!(s.anchor_for(DockEdge::Right), Some(120));
        assert_eq!(s.anchor_for(DockEdge::Bottom), Some(300));
    }
}
