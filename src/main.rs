//! Application entry point for Thai Proofreader.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run, which is
//!    then written back so it can be edited).
//! 3. Create [`tokio`] runtime.
//! 4. Build the [`GeminiProofreader`] from config.
//! 5. Create worker channels (`command`, `event`).
//! 6. Spawn the [`ProofreadWorker`] on the tokio runtime.
//! 7. Run [`eframe::run_native`]: blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use tokio::sync::mpsc;
use thai_proofreader::{
    app::ProofreaderApp,
    config::{AppConfig, API_KEY_ENV_VARS},
    fonts,
    proofread::{GeminiProofreader, Proofreader},
    session::{ProofreadWorker, SessionCommand, SessionEvent},
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let vp = egui::ViewportBuilder::default()
        .with_title("Thai Proofreader")
        .with_inner_size([width, height])
        .with_min_inner_size([720.0, 480.0]);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Thai Proofreader starting up");

    // 2. Configuration
    let first_run = AppConfig::is_first_run();
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    if first_run {
        if let Err(e) = config.save() {
            log::warn!("Could not write default settings: {e}");
        }
    }

    // 3. Tokio runtime (one outstanding request at a time)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Proofreader
    let gemini = GeminiProofreader::from_config(&config.llm);
    if !gemini.has_api_key() {
        log::error!(
            "API key is missing: set one of {} or llm.api_key in settings.toml",
            API_KEY_ENV_VARS.join(", ")
        );
    }
    let proofreader: Arc<dyn Proofreader> = Arc::new(gemini);

    // 5. Channel setup
    let (command_tx, command_rx) = mpsc::channel::<SessionCommand>(4);
    let (event_tx, event_rx) = mpsc::channel::<SessionEvent>(4);

    // 6. Worker
    rt.spawn(ProofreadWorker::new(proofreader).run(command_rx, event_tx));

    // 7. Window (blocks until closed)
    let app = ProofreaderApp::new(command_tx, event_rx, config.clone());
    let options = native_options(&config);
    let ui_config = config.ui.clone();

    eframe::run_native(
        "Thai Proofreader",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            if fonts::install_thai_font(&cc.egui_ctx, &ui_config).is_none() {
                log::warn!("No Thai font found; Thai text may not render. Set ui.thai_font_path.");
            }
            Ok(Box::new(app))
        }),
    )
}
