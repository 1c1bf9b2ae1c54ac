//! The four statistics stages printed after every load.

use color_eyre::Result;
use polars::prelude::DataFrame;
use std::io::{BufRead, Write};
use std::time::Instant;

use crate::prompt::Console;
use crate::statistics::{
    compute_duration_statistics, compute_station_statistics, compute_time_statistics,
    compute_user_statistics,
};

const SKIP_PROMPT: &str = "Type \"skip\" to jump to the next part or anything else to continue: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    TimeOfTravel,
    Stations,
    TripDuration,
    Users,
}

/// Whether a stage printed everything or gave up part way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Skipped,
    Completed,
    Abandoned,
}

impl Stage {
    /// Stages in the order they run.
    pub const ALL: [Stage; 4] = [
        Stage::TimeOfTravel,
        Stage::Stations,
        Stage::TripDuration,
        Stage::Users,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            Stage::TimeOfTravel => "\nCalculating The Most Frequent Times of Travel...\n",
            Stage::Stations => "\nCalculating The Most Popular Stations and Trip...\n",
            Stage::TripDuration => "\nCalculating Trip Duration...\n",
            Stage::Users => "\nCalculating User Stats...\n",
        }
    }

    /// Print the heading, offer to skip, then compute and print the stage.
    ///
    /// A completed stage ends with its elapsed time and a separator. An
    /// abandoned one (user stats on a file without demographics) prints
    /// neither.
    pub fn run<R: BufRead, W: Write>(
        self,
        console: &mut Console<R, W>,
        trips: &DataFrame,
    ) -> Result<Outcome> {
        console.say(self.heading())?;

        let answer = console.ask(SKIP_PROMPT)?;
        if answer.trim().eq_ignore_ascii_case("skip") {
            tracing::debug!(stage = ?self, "skipped");
            console.separator()?;
            return Ok(Outcome::Skipped);
        }

        let started = Instant::now();
        let outcome = match self {
            Stage::TimeOfTravel => report_times(console, trips)?,
            Stage::Stations => report_stations(console, trips)?,
            Stage::TripDuration => report_durations(console, trips)?,
            Stage::Users => report_users(console, trips)?,
        };

        if outcome == Outcome::Completed {
            let elapsed = started.elapsed().as_secs_f64();
            tracing::debug!(stage = ?self, elapsed, "stage complete");
            console.say(format_args!("\nThis took {elapsed} seconds."))?;
            console.separator()?;
        }
        Ok(outcome)
    }
}

fn report_times<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    trips: &DataFrame,
) -> Result<Outcome> {
    let stats = compute_time_statistics(trips)?;
    console.say(format_args!("Most common month: {}", stats.month))?;
    console.say(format_args!("Most common day of week: {}", stats.day_of_week))?;
    console.say(format_args!("Most common start hour: {}", stats.start_hour))?;
    Ok(Outcome::Completed)
}

fn report_stations<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    trips: &DataFrame,
) -> Result<Outcome> {
    let stats = compute_station_statistics(trips)?;
    console.say(format_args!(
        "Most commonly used start station: {}",
        stats.start_station
    ))?;
    console.say(format_args!(
        "Most commonly used end station: {}",
        stats.end_station
    ))?;
    console.say(format_args!(
        "Most frequent combination of start station and end station trip: {}",
        stats.trip
    ))?;
    Ok(Outcome::Completed)
}

fn report_durations<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    trips: &DataFrame,
) -> Result<Outcome> {
    let stats = compute_duration_statistics(trips)?;
    if stats.mean.is_nan() {
        tracing::warn!("no trips matched the selected filters; mean duration is undefined");
    }
    console.say(format_args!("Total travel time: {} seconds", stats.total))?;
    console.say(format_args!("Mean travel time: {} seconds", stats.mean))?;
    Ok(Outcome::Completed)
}

fn report_users<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    trips: &DataFrame,
) -> Result<Outcome> {
    let stats = compute_user_statistics(trips)?;

    console.say("Counts of user types: ")?;
    print_counts(console, &stats.user_types)?;

    let Some(gender) = stats.gender else {
        tracing::debug!("no Gender column; skipping remaining user stats");
        return Ok(Outcome::Abandoned);
    };
    console.say("Counts of gender: ")?;
    print_counts(console, &gender)?;

    let Some(years) = stats.birth_years else {
        tracing::debug!("no birth years available; skipping remaining user stats");
        return Ok(Outcome::Abandoned);
    };
    console.say(format_args!("Earliest year of birth: {}", years.earliest))?;
    console.say(format_args!("Most recent year of birth: {}", years.most_recent))?;
    console.say(format_args!("Most common year of birth: {}", years.most_common))?;

    Ok(Outcome::Completed)
}

/// Two aligned columns (value, count) followed by a blank line.
fn print_counts<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    counts: &[(String, usize)],
) -> Result<()> {
    let name_width = counts
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    let count_width = counts
        .iter()
        .map(|(_, count)| count.to_string().len())
        .max()
        .unwrap_or(0);
    for (name, count) in counts {
        console.say(format_args!(
            "{name:<name_width$}    {count:>count_width$}"
        ))?;
    }
    console.say("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{BIRTH_YEAR, GENDER, TRIP_DURATION, USER_TYPE};
    use color_eyre::Result;
    use polars::prelude::*;
    use std::io::Cursor;

    fn run_stage(stage: Stage, trips: &DataFrame, input: &str) -> (Result<Outcome>, String) {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let outcome = stage.run(&mut console, trips);
        let out = String::from_utf8(console.into_output()).unwrap();
        (outcome, out)
    }

    #[test]
    fn test_skip_prints_only_separator() {
        let trips = df!(TRIP_DURATION => [10i64, 20]).unwrap();
        let (outcome, out) = run_stage(Stage::TripDuration, &trips, "SKIP\n");
        assert_eq!(outcome.unwrap(), Outcome::Skipped);
        assert!(!out.contains("Total travel time"));
        assert!(out.ends_with(&format!("{SKIP_PROMPT}\n{}\n", "-".repeat(40))));
    }

    #[test]
    fn test_trip_duration_report() {
        let trips = df!(TRIP_DURATION => [10i64, 20, 60]).unwrap();
        let (outcome, out) = run_stage(Stage::TripDuration, &trips, "\n");
        assert_eq!(outcome.unwrap(), Outcome::Completed);
        assert!(out.contains("Total travel time: 90 seconds\n"));
        assert!(out.contains("Mean travel time: 30 seconds\n"));
        assert!(out.contains("This took "));
    }

    #[test]
    fn test_trip_duration_report_on_empty_table_prints_nan() {
        let trips = df!(TRIP_DURATION => Vec::<f64>::new()).unwrap();
        let (outcome, out) = run_stage(Stage::TripDuration, &trips, "go\n");
        assert_eq!(outcome.unwrap(), Outcome::Completed);
        assert!(out.contains("Total travel time: 0 seconds\n"));
        assert!(out.contains("Mean travel time: NaN seconds\n"));
    }

    #[test]
    fn test_user_stats_without_gender_is_abandoned_quietly() {
        let trips = df!(USER_TYPE => ["Subscriber", "Customer", "Subscriber"]).unwrap();
        let (outcome, out) = run_stage(Stage::Users, &trips, "\n");
        assert_eq!(outcome.unwrap(), Outcome::Abandoned);
        assert!(out.contains("Counts of user types: \nSubscriber    2\nCustomer      1\n\n"));
        assert!(!out.contains("gender"));
        assert!(!out.contains("This took"));
        assert!(!out.contains("----"));
    }

    #[test]
    fn test_user_stats_with_demographics() {
        let trips = df!(
            USER_TYPE => ["Subscriber", "Customer", "Subscriber"],
            GENDER => [Some("Male"), None, Some("Female")],
            BIRTH_YEAR => [Some(1980.0), None, Some(1992.0)]
        )
        .unwrap();
        let (outcome, out) = run_stage(Stage::Users, &trips, "\n");
        assert_eq!(outcome.unwrap(), Outcome::Completed);
        assert!(out.contains("Counts of gender: \nMale      1\nFemale    1\n"));
        assert!(out.contains("Earliest year of birth: 1980\n"));
        assert!(out.contains("Most recent year of birth: 1992\n"));
        assert!(out.contains("Most common year of birth: 1980\n"));
        assert!(out.contains("This took "));
    }

    #[test]
    fn test_time_report_on_empty_table_is_an_error() {
        let trips = df!(
            "month" => Vec::<String>::new(),
            "day_of_week" => Vec::<String>::new(),
            "start_hour" => Vec::<i32>::new()
        )
        .unwrap();
        let (outcome, _) = run_stage(Stage::TimeOfTravel, &trips, "\n");
        assert!(outcome.is_err());
    }

    #[test]
    fn test_counts_align_by_characters() {
        let counts = vec![("Abonné".to_string(), 12), ("Customer".to_string(), 3)];
        let mut console = Console::new(Cursor::new(Vec::new()), Vec::new());
        print_counts(&mut console, &counts).unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out, "Abonné      12\nCustomer     3\n\n");
    }
}
