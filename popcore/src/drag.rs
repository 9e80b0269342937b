//! Handle dragging along the docked edge
//!
//! A drag remembers where the pointer and the anchor were when it started.
//! Every later pointer sample moves the anchor by the pointer's travel along
//! the cross axis only; motion toward or away from the edge is ignored.

use crate::geometry::Point;
use crate::settings::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Axis the widget may move along (perpendicular to hide/show)
    axis: Axis,
    start_pointer: Point,
    start_anchor: i32,
}

impl DragSession {
    pub fn start(axis: Axis, pointer: Point, anchor: i32) -> Self {
        Self {
            axis,
            start_pointer: pointer,
            start_anchor: anchor,
        }
    }

    /// Requested anchor for `pointer`, before any clamping.
    pub fn anchor_for(&self, pointer: Point) -> i32 {
        let delta = pointer.along(self.axis) - self.start_pointer.along(self.axis);
        self.start_anchor + delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_cross_axis_moves() {
        let drag = DragSession::start(Axis::Vertical, Point::new(1900, 400), 378);
        assert_eq!(drag.anchor_for(Point::new(1900, 450)), 428);
        assert_eq!(drag.anchor_for(Point::new(1000, 450)), 428);
        assert_eq!(drag.anchor_for(Point::new(1000, 300)), 278);
    }
}
