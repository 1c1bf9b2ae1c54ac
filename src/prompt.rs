//! Line-oriented terminal I/O: prompts, answers and plain report lines.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::filters::{City, Choice, DayFilter, FilterSelection, MonthFilter};

const INVALID_MESSAGE: &str = "\nSorry, we cannot recognise what you have entered. Please type";

/// Blocking prompt/answer channel over any reader and writer.
///
/// The binary wires this to stdin/stdout; tests drive it with a `Cursor`
/// and capture the written bytes.
pub struct Console<R, W> {
    input: R,
    output: W,
    separator_width: usize,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            separator_width: 40,
        }
    }

    pub fn with_separator_width(mut self, width: usize) -> Self {
        self.separator_width = width;
        self
    }

    /// Write one line of output.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Write the dashed line that closes a section.
    pub fn separator(&mut self) -> Result<()> {
        writeln!(self.output, "{}", "-".repeat(self.separator_width))?;
        Ok(())
    }

    /// Show `prompt` on its own line and return the answer without its line ending.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(eyre!("input closed while waiting for an answer"));
        }
        Ok(answer.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask a question and report whether the answer was "yes" (any case).
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(prompt)?;
        Ok(answer.trim().eq_ignore_ascii_case("yes"))
    }

    /// Keep asking until the answer matches the allow-list of `T`.
    pub fn choose<T: Choice>(&mut self) -> Result<T> {
        let mut answer = self.ask(T::PROMPT)?;
        loop {
            if let Some(choice) = T::parse(&answer) {
                return Ok(choice);
            }
            tracing::debug!(answer = %answer, "rejected answer");
            writeln!(self.output, "{INVALID_MESSAGE} {}", T::OPTIONS)?;
            answer = self.ask(T::RETRY_PROMPT)?;
        }
    }

    /// Collect the city, month and day filters for one pass of the session.
    pub fn collect_filters(&mut self) -> Result<FilterSelection> {
        self.say("Hello! Let's explore some US bikeshare data!")?;

        let city = self.choose::<City>()?;
        let month = self.choose::<MonthFilter>()?;
        let day = self.choose::<DayFilter>()?;

        self.separator()?;
        Ok(FilterSelection::new(city, month, day))
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
