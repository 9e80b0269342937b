//! popcore - engine of the popcalc edge-docking calculator

pub mod animation;
pub mod calculator;
pub mod dock;
pub mod drag;
pub mod expr;
pub mod geometry;
pub mod platform;
pub mod repaint;
pub mod session;
pub mod settings;
pub mod storage;
pub mod theme;
pub mod widgets;

pub use platform::PlatformShell;
pub use repaint::PollScheduler;
pub use session::Session;
pub use theme::PopTheme;
