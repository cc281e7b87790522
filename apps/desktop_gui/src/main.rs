use std::path::PathBuf;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use shared::domain::{display_title, APP_NAME};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

#[derive(Parser, Debug)]
#[command(name = "daedalus", about = "Minimal plain-text editor")]
struct Args {
    /// Config file to use instead of ./daedalus.toml or the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured tracing filter, e.g. `daedalus=debug`.
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (mut settings, warnings) = config::load_settings(args.config.as_deref())?;
    if let Some(filter) = args.log_filter {
        settings.log_filter = filter;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();
    for warning in &warnings {
        tracing::warn!("{warning}");
    }
    tracing::debug!(?settings, "loaded settings");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(settings.command_queue_capacity);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(display_title(None, false))
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            backend_bridge::runtime::launch(cmd_rx, ui_tx, cc.egui_ctx.clone());
            Ok(Box::new(ui::DaedalusApp::new(cmd_tx, ui_rx, &settings)))
        }),
    )
    .map_err(|err| anyhow!("editor window failed: {err}"))
}
