pub mod config;
pub mod filters;
pub mod loader;
pub mod prompt;
pub mod report;
pub mod session;
pub mod statistics;
pub mod viewer;

pub use bikeshare_cli::Args;
pub use config::{AppConfig, CityTable, ConfigManager};
pub use filters::{City, DayFilter, FilterSelection, MonthFilter};
pub use loader::load_trips;
pub use prompt::Console;
pub use session::{Session, SessionOptions};

/// Application name used for the config directory and other app-specific paths
pub const APP_NAME: &str = "bikeshare";
