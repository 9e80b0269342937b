//! Poll scheduler for the dock loop
//!
//! egui only runs `update()` when something asks for a frame. The dock
//! needs to sample the pointer even when nothing happens inside the
//! window, so `PollScheduler` keeps a timed repaint running:
//!
//! 1. **Idle** (Hidden or Visible): poll every 100 ms for hit testing.
//! 2. **Animating** (Expanding or Retracting): poll every 10 ms, one
//!    slide step per poll.
//! 3. **Stopped**: nothing is scheduled. Call `stop()` before closing the
//!    window so the loop ends explicitly.
//!
//! Frames triggered by input may arrive between polls; `is_due` tells
//! the caller whether this frame should also advance the dock.

use std::time::{Duration, Instant};

/// Hit-test cadence while the widget is at rest.
pub const HOVER_POLL: Duration = Duration::from_millis(100);

/// Step cadence while the widget is sliding.
pub const ANIMATION_POLL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
pub struct PollScheduler {
    hover_interval: Duration,
    animation_interval: Duration,
    /// When the dock was last advanced. `None` until the first poll.
    last_poll: Option<Instant>,
    running: bool,
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PollScheduler {
    pub fn new() -> Self {
        Self {
            hover_interval: HOVER_POLL,
            animation_interval: ANIMATION_POLL,
            last_poll: None,
            running: true,
        }
    }

    pub fn interval(&self, animating: bool) -> Duration {
        if animating {
            self.animation_interval
        } else {
            self.hover_interval
        }
    }

    /// Whether a poll is owed at `now`.
    pub fn is_due(&self, now: Instant, animating: bool) -> bool {
        if !self.running {
            return false;
        }
        match self.last_poll {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval(animating),
        }
    }

    pub fn mark_polled(&mut self, now: Instant) {
        self.last_poll = Some(now);
    }

    /// Delay until the next poll is owed, measured from `now`.
    pub fn next_wake(&self, now: Instant, animating: bool) -> Option<Duration> {
        if !self.running {
            return None;
        }
        let interval = self.interval(animating);
        Some(match self.last_poll {
            None => Duration::ZERO,
            Some(last) => interval.saturating_sub(now.saturating_duration_since(last)),
        })
    }

    /// Ask egui for the next frame. Call at the end of `update()`.
    pub fn schedule(&self, ctx: &egui::Context, animating: bool) {
        if let Some(delay) = self.next_wake(Instant::now(), animating) {
            ctx.request_repaint_after(delay);
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            tracing::info!("poll loop stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_follows_animation() {
        let mut sched = PollScheduler::new();
        let t0 = Instant::now();
        assert!(sched.is_due(t0, false));
        sched.mark_polled(t0);

        let t1 = t0 + Duration::from_millis(20);
        assert!(!sched.is_due(t1, false));
        assert!(sched.is_due(t1, true));
        assert_eq!(sched.next_wake(t1, false), Some(Duration::from_millis(80)));
        assert_eq!(sched.next_wake(t1, true), Some(Duration::ZERO));

        assert!(sched.is_due(t0 + HOVER_POLL, false));
    }

    #[test]
    fn test_stop_ends_polling() {
        let mut sched = PollScheduler::new();
        sched.stop();
        assert!(!sched.is_running());
        assert!(!sched.is_due(Instant::now(), true));
        assert_eq!(sched.next_wake(Instant::now(), true), None);
    }
}
