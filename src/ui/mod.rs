//! GUI implementation with egui/eframe

mod app;
mod components;
mod state;
mod theme;

pub use app::IpaSayApp;
pub use components::{AlertDialog, InputBar, Keypad, ModeSelector, StatusBar, TEXT_INPUT_ID};
pub use state::AppState;
pub use theme::Theme;

use crate::audio::{open_default_player, HttpLoader};
use crate::config::ClientConfig;
use std::sync::Arc;

/// Run the ipasay application
pub fn run(config: ClientConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([420.0, 220.0])
            .with_title("ipasay"),
        ..Default::default()
    };

    eframe::run_native(
        "ipasay",
        options,
        Box::new(move |cc| {
            let loader = Arc::new(HttpLoader::new(&config));
            let player = open_default_player(config.volume);
            let state = AppState::new(&config, loader, player);
            Ok(Box::new(IpaSayApp::new(cc, state)))
        }),
    )
}
