use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use united_runners::config::{self, AppConfig};
use united_runners::UnitedRunnersApp;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting United Runners v{}", env!("CARGO_PKG_VERSION"));

    let config_path = config::get_config_path();
    let mut app_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to load config from {}: {}", config_path.display(), e);
            AppConfig::default()
        }
    };

    // First run: write the defaults out.
    if !config_path.exists() {
        match config::save_config(&app_config) {
            Ok(()) => info!("Wrote default config to {}", config_path.display()),
            Err(e) => warn!("Failed to write default config: {}", e),
        }
    }

    // Env keys are never written to the file.
    app_config.apply_env_overrides();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0])
            .with_title("United Runners"),
        ..Default::default()
    };

    eframe::run_native(
        "United Runners",
        options,
        Box::new(move |cc| Ok(Box::new(UnitedRunnersApp::new(cc, &app_config)))),
    )
}
