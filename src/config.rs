//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`QM_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

use crate::export::MatrixLayout;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Camera placement
    #[serde(default)]
    pub camera: CameraConfig,
    /// Projection parameters
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Matrix output format
    #[serde(default)]
    pub output: OutputConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`QM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let mut figment = Figment::new();
        for path in Self::sources(config_dir) {
            figment = figment.merge(Toml::file(path));
        }

        // QM_PROJECTION__FOV=60 -> projection.fov = 60
        figment = figment.merge(Env::prefixed("QM_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Config files present in `config_dir`, in merge order
    pub fn sources<P: AsRef<Path>>(config_dir: P) -> Vec<PathBuf> {
        let config_dir = config_dir.as_ref();
        ["default.toml", "user.toml"]
            .iter()
            .map(|name| config_dir.join(name))
            .filter(|path| path.exists())
            .collect()
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position [x, y, z]
    pub position: [f32; 3],
    /// Heading around +Y in degrees, 0 looks down -Z
    pub yaw: f32,
    /// Elevation in degrees, positive looks up
    pub pitch: f32,
    /// Maximum pitch angle in degrees
    pub pitch_limit: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            yaw: 0.0,
            pitch: 0.0,
            pitch_limit: 89.0,
        }
    }
}

/// Projection kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

/// Projection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub mode: ProjectionMode,
    /// Vertical field of view in degrees (perspective)
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Height of the view volume (orthographic)
    pub ortho_height: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            fov: 45.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
            ortho_height: 10.0,
        }
    }
}

/// Matrix output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Flat array order
    pub layout: MatrixLayout,
    /// Digits after the decimal point
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            layout: MatrixLayout::ColumnMajor,
            precision: 4,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    /// The config directory itself is absent
    pub fn missing_dir(path: &Path) -> Self {
        ConfigError {
            message: format!("config directory {} does not exist", path.display()),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.camera.position, [0.0, 0.0, 5.0]);
        assert_eq!(config.projection.mode, ProjectionMode::Perspective);
        assert_eq!(config.projection.fov, 45.0);
        assert_eq!(config.output.layout, MatrixLayout::ColumnMajor);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("pitch_limit"));
        assert!(toml.contains("mode = \"perspective\""));
        assert!(toml.contains("layout = \"column_major\""));
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [projection]
            mode = "orthographic"
            ortho_height = 4.0

            [output]
            layout = "row_major"
            "#,
        )
        .unwrap();
        assert_eq!(config.projection.mode, ProjectionMode::Orthographic);
        assert_eq!(config.projection.ortho_height, 4.0);
        assert_eq!(config.projection.near, 0.1);
        assert_eq!(config.output.layout, MatrixLayout::RowMajor);
        assert_eq!(config.output.precision, 4);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_sources_in_merge_order() {
        let sources = AppConfig::sources("config");
        assert_eq!(sources.first(), Some(&Path::new("config").join("default.toml")));
        assert!(sources.iter().all(|p| p.exists()));
        assert!(AppConfig::sources("does/not/exist").is_empty());
    }

    #[test]
    fn test_missing_dir_error() {
        let err = ConfigError::missing_dir(Path::new("nowhere"));
        assert_eq!(
            err.to_string(),
            "Configuration error: config directory nowhere does not exist"
        );
    }

    #[test]
    fn test_missing_directory_uses_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.projection.far, 100.0);
    }
}
