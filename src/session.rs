use color_eyre::Result;
use std::io::{BufRead, Write};
use std::num::NonZeroUsize;

use crate::config::{AppConfig, CityTable};
use crate::filters::FilterSelection;
use crate::loader::load_trips;
use crate::prompt::Console;
use crate::report::Stage;
use crate::viewer::view_rows;

/// Display options for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub rows_per_page: usize,
    pub separator_width: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            rows_per_page: 5,
            separator_width: 40,
        }
    }
}

impl SessionOptions {
    /// Create SessionOptions from CLI args and config, with CLI args taking precedence
    pub fn from_args_and_config(args: &bikeshare_cli::Args, config: &AppConfig) -> Self {
        Self {
            rows_per_page: args
                .rows_per_page
                .map(NonZeroUsize::get)
                .unwrap_or(config.display.rows_per_page),
            separator_width: config.display.separator_width,
        }
    }
}

/// Collect filters, load, report, view rows; repeat while the user asks to restart.
pub struct Session<R, W> {
    console: Console<R, W>,
    cities: CityTable,
    options: SessionOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, cities: CityTable, options: SessionOptions) -> Self {
        let console = Console::new(input, output).with_separator_width(options.separator_width);
        Self {
            console,
            cities,
            options,
        }
    }

    /// Run passes until the user declines to restart. Returns the number of passes.
    pub fn run(&mut self) -> Result<usize> {
        let mut passes = 0;
        loop {
            let selection = self.run_once()?;
            passes += 1;
            tracing::debug!(passes, "finished pass for {}", selection);

            if !self
                .console
                .confirm("\nWould you like to restart? Enter yes or no.")?
            {
                return Ok(passes);
            }
        }
    }

    /// One full pass of the pipeline, without the restart question.
    pub fn run_once(&mut self) -> Result<FilterSelection> {
        let selection = self.console.collect_filters()?;
        let trips = load_trips(&self.cities, &selection)?;

        for stage in Stage::ALL {
            stage.run(&mut self.console, &trips)?;
        }

        view_rows(&mut self.console, &trips, self.options.rows_per_page)?;
        Ok(selection)
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }
}
