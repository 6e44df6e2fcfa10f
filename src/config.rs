use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Process-wide scan configuration.
///
/// Controls which directory entries are pruned during traversal, which file
/// extensions qualify as photos, which GPS latitudes are rejected as
/// placeholder fixes, and how the route line is styled. Built once before a
/// scan starts and immutable for its duration.
///
/// # Loading
///
/// ```rust,no_run
/// use photo_mapper::config::Config;
///
/// // From a JSON file
/// let config = Config::load(Some("photo-mapper.json".as_ref())).unwrap();
///
/// // Or use the built-in defaults and customize
/// let mut config = Config::default();
/// config.allowed_extensions.push("jpe".to_string());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Entry names skipped during traversal, descendants included.
    /// Matched exactly and case-sensitively against the entry's file name.
    pub ignore_names: Vec<String>,
    /// File extensions (without the dot) that qualify as photos.
    /// Matched case-sensitively.
    pub allowed_extensions: Vec<String>,
    /// Placeholder latitudes stamped by cameras that record a fixed
    /// coordinate when no satellite fix is available. Compared by exact
    /// floating-point equality.
    pub invalid_latitudes: Vec<f64>,
    /// Line style for the route document.
    pub route_style: RouteStyle,
}

/// KML `LineStyle` applied to the route polyline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteStyle {
    /// Line color in KML aabbggrr hex notation.
    pub line_color: String,
    /// Line width in pixels.
    pub line_width: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_names: vec![
                ".".to_string(),
                "..".to_string(),
                ".git".to_string(),
                ".DS_Store".to_string(),
                "@eaDir".to_string(),
            ],
            allowed_extensions: vec![
                "jpg".to_string(),
                "JPG".to_string(),
                "jpeg".to_string(),
                "JPEG".to_string(),
            ],
            // The Panasonic DMC-TZ40 stamps these latitudes when it has no
            // satellite fix, even indoors.
            invalid_latitudes: vec![17056881.853375, 17056881.666666668],
            route_style: RouteStyle {
                line_color: "ff000000".to_string(),
                line_width: 2,
            },
        }
    }
}

impl Config {
    /// Resolve the config file path — same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("photo-mapper.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Check if a directory entry name is on the ignore list.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_names.iter().any(|n| n == name)
    }

    /// Check if a file has an allowed photo extension.
    pub fn is_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.allowed_extensions.iter().any(|a| a == ext))
            .unwrap_or(false)
    }

    /// Check if a latitude exactly equals one of the placeholder fixes.
    ///
    /// The comparison is intentionally exact rather than a distance
    /// threshold: the placeholder values are hardware constants, not
    /// approximate errors.
    pub fn is_invalid_latitude(&self, latitude: f64) -> bool {
        self.invalid_latitudes.iter().any(|&v| v == latitude)
    }
}
