//! Geometry engine
//!
//! Turns settings plus screen bounds into every rectangle the widget needs:
//! the window-local placement of the handle, copy/paste row, display and
//! button grid, and the screen-space docked positions along the hide/show
//! axis. Everything here is a pure function of its inputs.

use crate::settings::{Axis, DockEdge, Settings};

/// Width of the strip left on screen while hidden.
pub const HIDDEN_SIZE: i32 = 20;

pub const GRID_ROWS: i32 = 5;
pub const GRID_COLS: i32 = 4;

/// Button labels, row by row.
pub const BUTTON_LABELS: [[&str; GRID_COLS as usize]; GRID_ROWS as usize] = [
    ["C", "(", ")", "CE"],
    ["7", "8", "9", "/"],
    ["4", "5", "6", "*"],
    ["1", "2", "3", "-"],
    ["0", ".", "=", "+"],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Axis-aligned rectangle. `contains` treats the far edges as exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > x && bottom > y {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

/// Clamp a span starting at `pos` of length `len` into `[0, extent)`.
/// A span longer than the extent is pinned to the leading edge.
pub fn clamp_span(pos: i32, len: i32, extent: i32) -> i32 {
    pos.min(extent - len).max(0)
}

/// Derived placement of every part of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub edge: DockEdge,
    pub cell: i32,
    pub screen: Size,
    pub hidden_size: i32,
    pub handle_thickness: i32,
    pub secondary_row_thickness: i32,
    pub display_thickness: i32,
    pub full_width: i32,
    pub full_height: i32,
    /// Window coordinate along the hide/show axis when fully shown.
    pub visible_offset: i32,
    /// Window coordinate along the hide/show axis when tucked away.
    pub hidden_offset: i32,
    /// Window coordinate along the cross axis, already clamped.
    pub anchor: i32,
    pub button_font: i32,
    pub copy_font: i32,
    pub display_font: i32,
}

/// Compute the full layout. `anchor` is the requested cross-axis position;
/// `None` centers the widget on that axis.
pub fn compute_layout(settings: &Settings, screen: Size, hidden_size: i32, anchor: Option<i32>) -> Layout {
    let cell = settings.cell_size.px();
    let edge = settings.dock_edge;

    let handle_thickness = cell / 4;
    let secondary_row_thickness = cell / 2;
    let display_thickness = cell;

    let full_width = GRID_COLS * cell;
    let full_height = handle_thickness + secondary_row_thickness + display_thickness + GRID_ROWS * cell;

    let (visible_offset, hidden_offset) = match edge {
        DockEdge::Right => (
            clamp_span(screen.width - full_width, full_width, screen.width),
            screen.width - hidden_size,
        ),
        DockEdge::Left => (0, hidden_size - full_width),
        DockEdge::Top => (0, hidden_size - full_height),
        DockEdge::Bottom => (
            clamp_span(screen.height - full_height, full_height, screen.height),
            screen.height - hidden_size,
        ),
    };

    let mut layout = Layout {
        edge,
        cell,
        screen,
        hidden_size,
        handle_thickness,
        secondary_row_thickness,
        display_thickness,
        full_width,
        full_height,
        visible_offset,
        hidden_offset,
        anchor: 0,
        button_font: cell / 4,
        copy_font: cell / 5,
        display_font: (cell / 2 - 2).max(8),
    };
    let centered = (layout.cross_extent() - layout.cross_size()) / 2;
    layout.anchor = layout.clamp_anchor(anchor.unwrap_or(centered));
    layout
}

impl Layout {
    pub fn axis(&self) -> Axis {
        self.edge.axis()
    }

    pub fn size(&self) -> Size {
        Size::new(self.full_width, self.full_height)
    }

    pub fn screen_rect(&self) -> Rect {
        Rect::from_origin_size(Point::default(), self.screen)
    }

    fn cross_axis(&self) -> Axis {
        match self.axis() {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    fn cross_size(&self) -> i32 {
        self.size().along(self.cross_axis())
    }

    fn cross_extent(&self) -> i32 {
        self.screen.along(self.cross_axis())
    }

    /// Keep the whole widget on screen along the cross axis.
    pub fn clamp_anchor(&self, value: i32) -> i32 {
        clamp_span(value, self.cross_size(), self.cross_extent())
    }

    /// Top-left corner of the window at `offset` along the hide/show axis.
    pub fn window_origin(&self, offset: i32) -> Point {
        match self.axis() {
            Axis::Horizontal => Point::new(offset, self.anchor),
            Axis::Vertical => Point::new(self.anchor, offset),
        }
    }

    pub fn window_rect(&self, offset: i32) -> Rect {
        Rect::from_origin_size(self.window_origin(offset), self.size())
    }

    /// The part of the window actually on screen at `offset`.
    pub fn on_screen_part(&self, offset: i32) -> Option<Rect> {
        self.window_rect(offset).intersect(&self.screen_rect())
    }

    /// The strip left showing while hidden; hovering it brings the widget out.
    pub fn sliver_rect(&self) -> Rect {
        self.on_screen_part(self.hidden_offset).unwrap_or_default()
    }

    /// The whole widget while shown; leaving it sends the widget away.
    pub fn full_rect(&self) -> Rect {
        self.window_rect(self.visible_offset)
    }

    // Window-local rectangles for the presentation shell.

    pub fn handle_rect(&self) -> Rect {
        Rect::new(0, 0, self.full_width, self.handle_thickness)
    }

    pub fn copy_rect(&self) -> Rect {
        Rect::new(0, self.handle_thickness, self.full_width / 2, self.secondary_row_thickness)
    }

    pub fn paste_rect(&self) -> Rect {
        let half = self.full_width / 2;
        Rect::new(half, self.handle_thickness, self.full_width - half, self.secondary_row_thickness)
    }

    pub fn display_rect(&self) -> Rect {
        Rect::new(
            0,
            self.handle_thickness + self.secondary_row_thickness,
            self.full_width,
            self.display_thickness,
        )
    }

    pub fn grid_top(&self) -> i32 {
        self.handle_thickness + self.secondary_row_thickness + self.display_thickness
    }

    pub fn button_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            col as i32 * self.cell,
            self.grid_top() + row as i32 * self.cell,
            self.cell,
            self.cell,
        )
    }
}
