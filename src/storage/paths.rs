//! Application paths for configuration.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Application paths.
pub struct AppPaths {
    /// Configuration directory.
    pub config: PathBuf,
}

impl AppPaths {
    /// Create paths for the named application.
    #[must_use]
    pub fn new(app_name: &str) -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", app_name) {
            Self {
                config: proj_dirs.config_dir().to_path_buf(),
            }
        } else {
            // Fallback to home directory
            let home = BaseDirs::new()
                .map_or_else(|| PathBuf::from("."), |dirs| dirs.home_dir().to_path_buf());
            Self {
                config: home.join(".config").join(app_name),
            }
        }
    }

    /// Path to the default config file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.toml")
    }
}
