use anyhow::{anyhow, Result};
use eframe::egui;
use log::{info, warn};

use clap::Parser;

use pocket_sim::{FileStorage, MemoryStorage, Speaker, Storage};

use crate::Stage;

/// Pocket console
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Fixed scale factor, instead of fitting the window
    #[clap(long)]
    scale: Option<f32>,

    /// File in which to keep preferences
    #[clap(long)]
    prefs: Option<std::path::PathBuf>,

    /// Never open an audio device
    #[clap(long)]
    mute: bool,
}

pub fn run() -> Result<()> {
    let env = env_logger::Env::default()
        .filter_or("POCKET_LOG", "info")
        .write_style_or("POCKET_LOG", "always");
    env_logger::init_from_env(env);

    let args = Args::parse();
    let storage: Box<dyn Storage> =
        match args.prefs.clone().or_else(FileStorage::default_path) {
            Some(path) => {
                info!("loading preferences from {path:?}");
                Box::new(FileStorage::new(path))
            }
            None => {
                warn!("no preferences path; settings will not persist");
                Box::new(MemoryStorage::default())
            }
        };
    let speaker = Speaker::new(storage);

    let (width, height) = (400.0, 620.0);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::Vec2::new(width, height))
            .with_min_inner_size(egui::Vec2::new(200.0, 320.0)),
        ..Default::default()
    };

    let (scale, mute) = (args.scale, args.mute);
    eframe::run_native(
        "Pocket",
        options,
        Box::new(move |_cc| Ok(Box::new(Stage::new(speaker, scale, mute)))),
    )
    .map_err(|e| anyhow!("got egui error: {e:?}"))
}
