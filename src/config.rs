use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::filters::City;

const CONFIG_FILE: &str = "config.toml";

/// Locates the user's `config.toml` and writes the default template there.
#[derive(Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Use `config_dir` instead of the platform config directory.
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// `<platform config dir>/<app_name>`, e.g. `~/.config/bikeshare`.
    pub fn new(app_name: &str) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| eyre!("Could not determine config directory"))?
            .join(app_name);
        Ok(Self { config_dir })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Write the default template, refusing to replace an existing file
    /// unless `force` is set. Returns the path written.
    pub fn write_default_config(&self, force: bool) -> Result<PathBuf> {
        let path = self.config_file();
        if path.exists() && !force {
            return Err(eyre!(
                "Config file already exists at {}. Use --force to overwrite.",
                path.display()
            ));
        }

        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        tracing::debug!(path = %path.display(), "wrote default config");
        Ok(path)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration format version (for future compatibility)
    pub version: String,
    pub data: DataConfig,
    pub display: DisplayConfig,
    pub debug: DebugConfig,
}

/// Where the per-city trip files live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: Option<PathBuf>,
    pub chicago: String,
    pub new_york_city: String,
    pub washington: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub rows_per_page: usize,
    pub separator_width: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    pub enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            data: DataConfig::default(),
            display: DisplayConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            chicago: "chicago.csv".to_string(),
            new_york_city: "new_york_city.csv".to_string(),
            washington: "washington.csv".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 5,
            separator_width: 40,
        }
    }
}

// Configuration loading and merging
impl AppConfig {
    /// Load configuration from all layers (default → user)
    pub fn load(app_name: &str) -> Result<Self> {
        let config_manager = ConfigManager::new(app_name).unwrap_or_else(|e| {
            eprintln!("Warning: Could not initialize config manager: {}", e);
            ConfigManager::with_dir(std::env::temp_dir().join(app_name).join("config"))
        });
        Self::load_from(&config_manager)
    }

    /// Load configuration using the config file managed by `config_manager`
    pub fn load_from(config_manager: &ConfigManager) -> Result<Self> {
        let mut config = AppConfig::default();

        let config_path = config_manager.config_file();
        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading user config");
            config.merge(Self::read_file(&config_path)?);
        }

        config.validate()?;

        Ok(config)
    }

    fn read_file(config_path: &Path) -> Result<AppConfig> {
        let content = std::fs::read_to_string(config_path).map_err(|e| {
            eyre!(
                "Failed to read config file at {}: {}",
                config_path.display(),
                e
            )
        })?;

        toml::from_str(&content).map_err(|e| {
            eyre!(
                "Failed to parse config file at {}: {}",
                config_path.display(),
                e
            )
        })
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: AppConfig) {
        if other.version != AppConfig::default().version {
            self.version = other.version;
        }

        self.data.merge(other.data);
        self.display.merge(other.display);
        self.debug.merge(other.debug);
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.version.starts_with("0.1") {
            return Err(eyre!(
                "Unsupported config version: {}. Expected 0.1.x",
                self.version
            ));
        }

        if self.display.rows_per_page == 0 {
            return Err(eyre!("rows_per_page must be greater than 0"));
        }

        if self.display.separator_width == 0 {
            return Err(eyre!("separator_width must be greater than 0"));
        }

        for city in City::ALL {
            if self.data.file_name(city).trim().is_empty() {
                return Err(eyre!("No data file configured for {}", city));
            }
        }

        Ok(())
    }
}

impl DataConfig {
    /// Configured file name for a city, relative to the data directory
    pub fn file_name(&self, city: City) -> &str {
        match city {
            City::Chicago => &self.chicago,
            City::NewYorkCity => &self.new_york_city,
            City::Washington => &self.washington,
        }
    }

    pub fn merge(&mut self, other: Self) {
        let default = DataConfig::default();
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.chicago != default.chicago {
            self.chicago = other.chicago;
        }
        if other.new_york_city != default.new_york_city {
            self.new_york_city = other.new_york_city;
        }
        if other.washington != default.washington {
            self.washington = other.washington;
        }
    }
}

impl DisplayConfig {
    pub fn merge(&mut self, other: Self) {
        let default = DisplayConfig::default();
        if other.rows_per_page != default.rows_per_page {
            self.rows_per_page = other.rows_per_page;
        }
        if other.separator_width != default.separator_width {
            self.separator_width = other.separator_width;
        }
    }
}

impl DebugConfig {
    pub fn merge(&mut self, other: Self) {
        let default = DebugConfig::default();
        if other.enabled != default.enabled {
            self.enabled = other.enabled;
        }
    }
}

/// Immutable city → backing file mapping handed to the loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityTable {
    chicago: PathBuf,
    new_york_city: PathBuf,
    washington: PathBuf,
}

impl CityTable {
    /// Resolve every configured file name against `data_dir` (or the config's
    /// own `data_dir`, or the current directory when neither is set).
    pub fn from_config(config: &DataConfig, data_dir: Option<&Path>) -> Self {
        let base = data_dir
            .map(Path::to_path_buf)
            .or_else(|| config.data_dir.clone())
            .unwrap_or_default();
        Self {
            chicago: base.join(&config.chicago),
            new_york_city: base.join(&config.new_york_city),
            washington: base.join(&config.washington),
        }
    }

    /// Default file names inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::from_config(&DataConfig::default(), Some(data_dir))
    }

    pub fn path_for(&self, city: City) -> &Path {
        match city {
            City::Chicago => &self.chicago,
            City::NewYorkCity => &self.new_york_city,
            City::Washington => &self.washington,
        }
    }
}

impl Default for CityTable {
    fn default() -> Self {
        Self::from_config(&DataConfig::default(), None)
    }
}

// Default configuration template
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../config/default.toml");
