mod analysis;
mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::TripPulseApp;
use eframe::egui;

/// Loaded at startup when present; otherwise use File → Open.
const SAMPLE_PATH: &str = "data/uber-jan-feb-foil.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Trip Pulse – Uber Trip Analytics",
        options,
        Box::new(|_cc| {
            let sample = Path::new(SAMPLE_PATH);
            let app = if sample.exists() {
                match data::loader::load_csv(sample) {
                    Ok(dataset) => TripPulseApp::with_dataset(dataset),
                    Err(e) => {
                        log::warn!("Could not load bundled sample: {e}");
                        TripPulseApp::default()
                    }
                }
            } else {
                TripPulseApp::default()
            };
            Ok(Box::new(app))
        }),
    )
}
