//! Slide animation for the docked widget
//!
//! The widget moves along its hide/show axis in fixed-size steps, one step
//! per tick. Retargeting mid-flight keeps the live offset, so reversing
//! direction never jumps.

/// Distance covered by one animation tick, in screen units.
pub const SLIDE_STEP: i32 = 10;

/// Move `current` toward `target` by at most `step`, never overshooting.
pub fn step_toward(current: i32, target: i32, step: i32) -> i32 {
    let step = step.max(1);
    current + (target - current).clamp(-step, step)
}

/// Number of ticks needed to cover `distance` at `step` per tick.
pub fn ticks_to_cover(distance: i32, step: i32) -> i32 {
    let step = step.max(1);
    (distance.abs() + step - 1) / step
}

/// State of a slide along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slide {
    /// Current position
    pub current: i32,
    /// Where the slide is heading
    pub target: i32,
    /// Per-tick distance
    pub step: i32,
}

impl Slide {
    /// A slide resting at `offset`.
    pub fn at_rest(offset: i32) -> Self {
        Self {
            current: offset,
            target: offset,
            step: SLIDE_STEP,
        }
    }

    pub fn with_step(mut self, step: i32) -> Self {
        self.step = step.max(1);
        self
    }

    /// Point the slide somewhere else without touching `current`.
    pub fn retarget(&mut self, target: i32) {
        self.target = target;
    }

    /// Advance one tick. Returns whether the position changed.
    pub fn update(&mut self) -> bool {
        let next = step_toward(self.current, self.target, self.step);
        let moved = next != self.current;
        self.current = next;
        moved
    }

    pub fn completed(&self) -> bool {
        self.current == self.target
    }
}
