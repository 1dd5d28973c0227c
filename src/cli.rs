//! Command-line arguments for the matrix export binary

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::ConfigError;

/// Print a camera's view and projection matrices as flat float arrays
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Directory holding `default.toml` and an optional `user.toml`
    #[arg(default_value = "config")]
    pub config_dir: PathBuf,
}

impl Args {
    /// The config directory, if it exists
    pub fn config_dir(&self) -> Result<&Path, ConfigError> {
        if self.config_dir.is_dir() {
            Ok(&self.config_dir)
        } else {
            Err(ConfigError::missing_dir(&self.config_dir))
        }
    }
}
