// PlantCare - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading, then logging initialisation
// 3. Headless one-shot mode (--no-gui)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use plantcare::app;
pub use plantcare::core;
pub use plantcare::platform;
pub use plantcare::ui;
pub use plantcare::util;

use clap::Parser;
use std::path::PathBuf;

/// PlantCare - plant photo to care article.
///
/// Pick a photo of a plant; the prediction service identifies it and writes
/// a markdown care guide, rendered in the window.
#[derive(Parser, Debug)]
#[command(name = "PlantCare", version, about)]
struct Cli {
    /// Image to select at startup (required with --no-gui).
    image: Option<PathBuf>,

    /// Base URL of the prediction service (overrides config.toml).
    #[arg(short = 's', long = "server")]
    server: Option<String>,

    /// Submit the image and print the article to stdout without opening a window.
    #[arg(long = "no-gui", requires = "image")]
    no_gui: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Paths and config are read before logging exists; neither logs, and
    // their problems are replayed as warnings once the subscriber is up.
    let (platform_paths, paths_warning) = platform::config::PlatformPaths::resolve();
    let (mut config, mut config_warnings) =
        platform::config::load_config(&platform_paths.config_file());
    config_warnings.extend(paths_warning);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "PlantCare starting"
    );
    tracing::debug!(
        config_dir = %platform_paths.config_dir.display(),
        data_dir = %platform_paths.data_dir.display(),
        "Platform directories"
    );
    tracing::info!(
        server = %config.server_url,
        dark_mode = config.dark_mode,
        font_size = config.font_size,
        "Configuration loaded"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    if let Some(ref server) = cli.server {
        if let Err(e) = config.set_server_url(server) {
            tracing::error!(error = %e, "Invalid --server value");
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }

    if cli.no_gui {
        run_headless(&cli, &config);
        return;
    }

    let session_path = app::session::session_path(&platform_paths.data_dir);
    let session = app::session::load(&session_path).unwrap_or_default();

    let predict_manager = match app::predict::PredictManager::new(&config.server_url) {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "Cannot create HTTP client");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut state = app::state::AppState::new(cli.debug);
    state.note_startup_warnings(&config_warnings);

    if let Some(ref path) = cli.image {
        match core::model::SelectedImage::load(path) {
            Ok(image) => state.select_file(image),
            Err(e) => {
                tracing::warn!(error = %e, "Cannot open startup image");
                state.status_message = e.to_string();
            }
        }
    }

    tracing::info!(endpoint = predict_manager.endpoint(), "Ready to launch GUI");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([720.0, 520.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(gui::PlantCareApp::new(
                state,
                predict_manager,
                config,
                session,
                session_path,
            )))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch PlantCare GUI: {e}");
        std::process::exit(1);
    }
}

/// `--no-gui`: print the article or the error, exit non-zero on failure.
fn run_headless(cli: &Cli, config: &platform::config::AppConfig) {
    let Some(ref path) = cli.image else {
        return;
    };
    match app::headless::run(path, &config.server_url) {
        Ok(article) => println!("{article}"),
        Err(e) => {
            tracing::error!(error = %e, "Headless prediction failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
