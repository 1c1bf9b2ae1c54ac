//! Shared CLI definitions for bikeshare.
//!
//! Used by the main application and by the build script (manpage) and
//! gen_docs binary (command-line-options markdown).

use clap::{CommandFactory, Parser};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Command-line arguments for bikeshare
#[derive(Clone, Parser, Debug, Default)]
#[command(
    name = "bikeshare",
    version,
    about = "Explore US bikeshare trip data from the terminal",
    long_about = "Prompts for a city (Chicago, New York City or Washington) and optional month \
                  and day filters, then prints the busiest travel times, most popular stations, \
                  trip duration totals and user demographics for the matching trips. Raw rows \
                  can be paged through at the end of each pass."
)]
pub struct Args {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv (default: current directory)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Number of rows shown per page when viewing raw data (default: 5)
    #[arg(long = "rows-per-page", value_name = "N")]
    pub rows_per_page: Option<NonZeroUsize>,

    /// Enable debug logging on stderr
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Generate default configuration file at ~/.config/bikeshare/config.toml
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,

    /// Force overwrite existing config file when using --generate-config
    #[arg(long = "force", requires = "generate_config", action)]
    pub force: bool,
}

/// Escape `|` and newlines for use in markdown table cells.
fn escape_table_cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Render command-line options as a markdown table.
pub fn render_options_markdown() -> String {
    let mut cmd = Args::command();
    cmd.build();

    let mut out = String::from("# Command Line Options\n\n");

    out.push_str("## Usage\n\n```\n");
    out.push_str(&cmd.render_usage().to_string());
    out.push_str("\n```\n\n");

    out.push_str("## Options\n\n");
    out.push_str("| Option | Description |\n");
    out.push_str("|--------|-------------|\n");

    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_str();
        if id == "help" || id == "version" {
            continue;
        }

        let Some(long) = arg.get_long() else {
            continue;
        };
        let mut option_str = format!("--{long}");
        if arg.get_action().takes_values() {
            if let Some(names) = arg.get_value_names() {
                let placeholder = names
                    .iter()
                    .map(|n| format!("<{}>", n.as_str()))
                    .collect::<Vec<_>>()
                    .join(" ");
                option_str = format!("{option_str} {placeholder}");
            }
        }

        let help = arg
            .get_help()
            .map(|h| escape_table_cell(&h.to_string()))
            .unwrap_or_else(|| "-".to_string());

        out.push_str(&format!("| `{option_str}` | {help} |\n"));
    }

    out
}
