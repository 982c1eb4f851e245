use clap::Parser;
use eframe::egui;

use film_dash::app::FilmDashApp;
use film_dash::config::Cli;

fn main() -> eframe::Result {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.dashboard_config();
    let source = cli.source();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cli.width, cli.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Film Dash – Highest-Grossing Films",
        options,
        Box::new(move |_cc| Ok(Box::new(FilmDashApp::new(config, source)))),
    )
}
