mod app;
mod state;
mod ui;

use std::path::PathBuf;

use app::RainforestViewerApp;
use clap::Parser;
use eframe::egui;
use state::ViewerState;

/// Browse the images and masks of an Amazon Rainforest dataset folder.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Dataset root containing `images/` and `masks/`
    data_dir: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut state = ViewerState::default();
    if let Some(dir) = args.data_dir {
        state.open_dataset(dir);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rainforest Seg – Mask Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(RainforestViewerApp::new(state)))),
    )
}
