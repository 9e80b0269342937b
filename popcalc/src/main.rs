//! popcalc - a calculator that hides against a screen edge
//!
//! Hover the sliver to slide it out, move the pointer away to tuck it back.

mod app;
mod shell;

use app::PopCalcApp;
use eframe::NativeOptions;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([192.0, 324.0])
            .with_decorations(false)
            .with_always_on_top()
            .with_resizable(false)
            .with_title("popcalc"),
        ..Default::default()
    };

    eframe::run_native(
        "popcalc",
        options,
        Box::new(|cc| Box::new(PopCalcApp::new(cc))),
    )
}
