mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use app::ResidualViewerApp;
use clap::Parser;
use cli::Cli;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let cli = Cli::parse();
    let state = cli.initial_state();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Plot OpenFOAM Residuals",
        options,
        Box::new(move |_cc| Ok(Box::new(ResidualViewerApp::with_state(state)))),
    )
}
