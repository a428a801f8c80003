//! BSU Engineering Portal - Desktop client for the faculty academic portal.

use std::path::PathBuf;

use bsu_portal as app;
use clap::Parser;
use eframe::egui;

use app::client::ApiClient;
use app::config::{AppConfig, ConfigLoadResult};
use app::session::SessionStore;
use app::ui::App;

/// Desktop client for the faculty academic portal.
#[derive(Parser)]
#[command(name = "bsu-portal")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Initialize logging: console plus a daily rolling file in the data dir.
    let file_appender = tracing_appender::rolling::daily(AppConfig::data_dir().join("logs"), "portal.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(file_writer)
        .with_ansi(false)
        .init();

    tracing::info!("BSU Portal starting...");

    // Determine config path based on mode
    let config_path = if cli.dev {
        tracing::info!("Dev mode: loading config from current directory");
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };
    tracing::info!("Config path: {:?}", config_path);

    let config = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => {
            tracing::info!("Config loaded successfully");
            config
        }
        ConfigLoadResult::Missing => {
            tracing::info!("Config missing, writing defaults to {:?}", config_path);
            let config = AppConfig::default();
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Could not write default config: {}", e);
            }
            config
        }
        ConfigLoadResult::Invalid(e) => {
            tracing::warn!("Config invalid, falling back to defaults: {}", e);
            AppConfig::default()
        }
    };

    run_app(config)
}

fn run_app(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("BSU Engineering Portal")
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([850.0, 600.0])
            .with_maximized(config.ui.start_maximized),
        ..Default::default()
    };

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    let api = match ApiClient::new(&config.api) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };
    let store = SessionStore::new(SessionStore::default_path());

    eframe::run_native(
        "BSU Engineering Portal",
        options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(App::new(api, store, config, rt)))
        }),
    )
}
