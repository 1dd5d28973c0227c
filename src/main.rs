//! quickmath - camera matrix export
//!
//! Builds the camera described by the configuration and prints its view,
//! projection and view-projection matrices as flat float arrays.

use clap::Parser;
use quickmath::camera::Camera;
use quickmath::cli::Args;
use quickmath::config::AppConfig;
use quickmath::export::export_camera;
use quickmath::SIMD_BACKEND;

fn main() {
    let args = Args::parse();
    let config_dir = match args.config_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    let loaded = AppConfig::load_from(config_dir);

    // Initialize logging; RUST_LOG still wins over the configured level
    let level = loaded
        .as_ref()
        .map_or("info", |config| config.debug.log_level.as_str());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    for source in AppConfig::sources(config_dir) {
        log::debug!("Merged {}", source.display());
    }

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting quickmath ({} lanes)", SIMD_BACKEND);

    let camera = Camera::from_config(&config);
    print!(
        "{}",
        export_camera(&camera, config.output.layout, config.output.precision)
    );
}
