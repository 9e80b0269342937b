//! Dock state machine
//!
//! Driven by a periodic tick carrying the latest pointer sample. Each tick
//! does one level-triggered hit test and then at most one slide step:
//!
//! ```text
//! Hidden  --pointer on sliver-->  Expanding --reached visible--> Visible
//! Visible --pointer off widget--> Retracting --reached hidden--> Hidden
//! ```
//!
//! Expanding and Retracting can flip into each other mid-flight; the slide
//! keeps its live offset so the window never jumps.

use crate::animation::Slide;
use crate::drag::DragSession;
use crate::geometry::{Layout, Point, Rect};
use crate::settings::{Axis, DockEdge};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockPhase {
    Hidden,
    Expanding,
    Visible,
    Retracting,
}

impl DockPhase {
    /// Whether the widget is on its way out (or already out).
    pub fn targets_visible(self) -> bool {
        matches!(self, DockPhase::Expanding | DockPhase::Visible)
    }

    pub fn is_animating(self) -> bool {
        matches!(self, DockPhase::Expanding | DockPhase::Retracting)
    }
}

/// Snapshot of where the widget is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockState {
    pub edge: DockEdge,
    pub current_offset: i32,
    pub phase: DockPhase,
    pub anchor: i32,
}

impl DockState {
    /// Latched once the slide has fully arrived on screen.
    pub fn is_expanded(&self) -> bool {
        self.phase == DockPhase::Visible
    }
}

/// What a tick changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// The window offset changed and the window must be repositioned.
    pub moved: bool,
    pub phase_changed: bool,
}

#[derive(Debug, Clone)]
pub struct DockMachine {
    layout: Layout,
    slide: Slide,
    phase: DockPhase,
    drag: Option<DragSession>,
}

impl DockMachine {
    /// Start hidden against the layout's edge.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            slide: Slide::at_rest(layout.hidden_offset),
            phase: DockPhase::Hidden,
            drag: None,
        }
    }

    pub fn with_step(mut self, step: i32) -> Self {
        self.slide = self.slide.with_step(step);
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn phase(&self) -> DockPhase {
        self.phase
    }

    pub fn current_offset(&self) -> i32 {
        self.slide.current
    }

    pub fn step(&self) -> i32 {
        self.slide.step
    }

    pub fn is_expanded(&self) -> bool {
        self.phase == DockPhase::Visible
    }

    pub fn is_animating(&self) -> bool {
        self.phase.is_animating()
    }

    pub fn state(&self) -> DockState {
        DockState {
            edge: self.layout.edge,
            current_offset: self.slide.current,
            phase: self.phase,
            anchor: self.layout.anchor,
        }
    }

    /// Where the window's top-left corner belongs right now.
    pub fn window_origin(&self) -> Point {
        self.layout.window_origin(self.slide.current)
    }

    /// Rectangle the pointer is tested against this tick.
    ///
    /// Heading in: the full widget at its visible position.
    /// Heading out: whatever part of the window is on screen, which is
    /// exactly the sliver once hidden.
    pub fn hit_rect(&self) -> Rect {
        if self.phase.targets_visible() {
            self.layout.full_rect()
        } else {
            self.layout.on_screen_part(self.slide.current).unwrap_or_default()
        }
    }

    /// Swap in a new layout and tuck the widget away at its new edge.
    pub fn relayout(&mut self, layout: Layout) {
        let step = self.slide.step;
        self.layout = layout;
        self.slide = Slide::at_rest(layout.hidden_offset).with_step(step);
        self.drag = None;
        self.set_phase(DockPhase::Hidden);
    }

    /// One poll: hit test, retarget if needed, then one slide step.
    /// `None` means the pointer is not over the widget at all.
    pub fn tick(&mut self, pointer: Option<Point>) -> TickOutcome {
        let before = self.phase;
        let inside = pointer.map_or(false, |p| self.hit_rect().contains(p));

        match self.phase {
            DockPhase::Hidden | DockPhase::Retracting if inside => {
                self.slide.retarget(self.layout.visible_offset);
                self.set_phase(DockPhase::Expanding);
            }
            DockPhase::Visible | DockPhase::Expanding if !inside && self.drag.is_none() => {
                self.slide.retarget(self.layout.hidden_offset);
                self.set_phase(DockPhase::Retracting);
            }
            _ => {}
        }

        let mut moved = false;
        if self.phase.is_animating() {
            moved = self.slide.update();
            if self.slide.completed() {
                let settled = if self.phase == DockPhase::Expanding {
                    DockPhase::Visible
                } else {
                    DockPhase::Hidden
                };
                self.set_phase(settled);
            }
        }

        TickOutcome {
            moved,
            phase_changed: self.phase != before,
        }
    }

    fn set_phase(&mut self, phase: DockPhase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, offset = self.slide.current, "dock phase");
            self.phase = phase;
        }
    }

    fn cross_axis(&self) -> Axis {
        match self.layout.axis() {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self, pointer: Point) {
        self.drag = Some(DragSession::start(self.cross_axis(), pointer, self.layout.anchor));
    }

    /// Follow the pointer along the edge. Returns the new anchor, clamped so
    /// the whole widget stays on screen.
    pub fn drag_to(&mut self, pointer: Point) -> Option<i32> {
        let drag = self.drag?;
        self.layout.anchor = self.layout.clamp_anchor(drag.anchor_for(pointer));
        Some(self.layout.anchor)
    }

    /// Finish a drag, returning the anchor to persist.
    pub fn end_drag(&mut self) -> Option<i32> {
        self.drag.take().map(|_| self.layout.anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{ticks_to_cover, SLIDE_STEP};
    use crate::geometry::{compute_layout, Size, HIDDEN_SIZE};
    use crate::settings::{CellSize, Settings};

    const SCREEN: Size = Size::new(1920, 1080);

    fn machine(edge: DockEdge) -> DockMachine {
        let settings = Settings {
            cell_size: CellSize::S48,
            dock_edge: edge,
            ..Settings::default()
        };
        DockMachine::new(compute_layout(&settings, SCREEN, HIDDEN_SIZE, None))
    }

    fn center(r: Rect) -> Point {
        Point::new(r.x + r.width / 2, r.y + r.height / 2)
    }

    #[test]
    fn test_expands_in_exact_tick_count() {
        for edge in DockEdge::ALL {
            let mut m = machine(edge);
            let layout = *m.layout();
            let sliver = center(layout.sliver_rect());
            let needed = ticks_to_cover(layout.hidden_offset - layout.visible_offset, SLIDE_STEP);

            for _ in 0..needed - 1 {
                m.tick(Some(sliver));
                assert_eq!(m.phase(), DockPhase::Expanding, "{:?}", edge);
            }
            let out = m.tick(Some(sliver));
            assert!(out.moved && out.phase_changed);
            assert_eq!(m.phase(), DockPhase::Visible, "{:?}", edge);
            assert_eq!(m.current_offset(), layout.visible_offset);
            assert!(m.state().is_expanded());
        }
    }

    #[test]
    fn test_retracts_in_exact_tick_count() {
        for edge in DockEdge::ALL {
            let mut m = machine(edge);
            let layout = *m.layout();
            let sliver = center(layout.sliver_rect());
            while m.phase() != DockPhase::Visible {
                m.tick(Some(sliver));
            }
            let needed = ticks_to_cover(layout.hidden_offset - layout.visible_offset, SLIDE_STEP);
            for _ in 0..needed {
                m.tick(None);
            }
            assert_eq!(m.phase(), DockPhase::Hidden, "{:?}", edge);
            assert_eq!(m.current_offset(), layout.hidden_offset);
        }
    }

    #[test]
    fn test_hidden_ignores_pointer_elsewhere() {
        let mut m = machine(DockEdge::Right);
        let out = m.tick(Some(Point::new(100, 100)));
        assert_eq!(out, TickOutcome::default());
        assert_eq!(m.phase(), DockPhase::Hidden);

        // Right next to the sliver but outside its cross-axis span.
        let sliver = m.layout().sliver_rect();
        m.tick(Some(Point::new(sliver.x + 1, sliver.bottom() + 5)));
        assert_eq!(m.phase(), DockPhase::Hidden);
    }

    #[test]
    fn test_visible_stays_while_pointer_on_widget() {
        let mut m = machine(DockEdge::Right);
        let sliver = center(m.layout().sliver_rect());
        while !m.is_expanded() {
            m.tick(Some(sliver));
        }
        let body = center(m.layout().full_rect());
        for _ in 0..50 {
            let out = m.tick(Some(body));
            assert!(!out.moved);
        }
        assert_eq!(m.phase(), DockPhase::Visible);
    }

    #[test]
    fn test_reversal_mid_expansion_is_continuous() {
        let mut m = machine(DockEdge::Left);
        let sliver = center(m.layout().sliver_rect());
        for _ in 0..5 {
            m.tick(Some(sliver));
        }
        let turning_point = m.current_offset();
        assert_eq!(turning_point, m.layout().hidden_offset + 5 * SLIDE_STEP);

        let mut last = turning_point;
        m.tick(None);
        assert_eq!(m.phase(), DockPhase::Retracting);
        assert!(m.current_offset() < turning_point);
        while m.phase() != DockPhase::Hidden {
            assert!((m.current_offset() - last).abs() <= SLIDE_STEP);
            last = m.current_offset();
            m.tick(None);
        }
        assert_eq!(m.current_offset(), m.layout().hidden_offset);
    }

    #[test]
    fn test_reentry_while_retracting_expands_again() {
        let mut m = machine(DockEdge::Bottom);
        let sliver = center(m.layout().sliver_rect());
        while !m.is_expanded() {
            m.tick(Some(sliver));
        }
        m.tick(None);
        m.tick(None);
        assert_eq!(m.phase(), DockPhase::Retracting);
        let before = m.current_offset();
        let on_screen = m.hit_rect();
        m.tick(Some(center(on_screen)));
        assert_eq!(m.phase(), DockPhase::Expanding);
        assert_eq!(m.current_offset(), before - SLIDE_STEP);
    }

    #[test]
    fn test_drag_clamps_inside_screen() {
        let mut m = machine(DockEdge::Right);
        let start = center(m.layout().sliver_rect());
        m.begin_drag(start);
        assert_eq!(m.drag_to(Point::new(start.x, start.y - 5000)), Some(0));
        let bottom = m.drag_to(Point::new(start.x - 700, start.y + 5000));
        assert_eq!(bottom, Some(SCREEN.height - m.layout().full_height));
        assert!(m.layout().screen_rect().contains_rect(&m.layout().full_rect()));
        assert_eq!(m.end_drag(), bottom);
        assert_eq!(m.end_drag(), None);
        assert_eq!(m.drag_to(start), None);
    }

    #[test]
    fn test_drag_along_top_moves_x_only() {
        let mut m = machine(DockEdge::Top);
        let origin = m.window_origin();
        m.begin_drag(Point::new(900, 5));
        m.drag_to(Point::new(950, 300));
        assert_eq!(m.window_origin(), Point::new(origin.x + 50, origin.y));
    }

    #[test]
    fn test_no_retraction_during_drag() {
        let mut m = machine(DockEdge::Right);
        let sliver = center(m.layout().sliver_rect());
        while !m.is_expanded() {
            m.tick(Some(sliver));
        }
        m.begin_drag(sliver);
        m.tick(None);
        assert_eq!(m.phase(), DockPhase::Visible);
        m.end_drag();
        m.tick(None);
        assert_eq!(m.phase(), DockPhase::Retracting);
    }

    #[test]
    fn test_relayout_snaps_hidden() {
        let mut m = machine(DockEdge::Right);
        let sliver = center(m.layout().sliver_rect());
        for _ in 0..3 {
            m.tick(Some(sliver));
        }
        let settings = Settings {
            cell_size: CellSize::S64,
            dock_edge: DockEdge::Top,
            ..Settings::default()
        };
        let layout = compute_layout(&settings, SCREEN, HIDDEN_SIZE, None);
        m.relayout(layout);
        assert_eq!(m.phase(), DockPhase::Hidden);
        assert_eq!(m.current_offset(), layout.hidden_offset);
        assert_eq!(m.state().edge, DockEdge::Top);
    }
}
