//! Reads a city's trip file into a `DataFrame`, derives the calendar columns
//! once, and applies the month/day filters.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use polars::prelude::*;
use std::path::Path;

use crate::config::CityTable;
use crate::filters::FilterSelection;

pub const START_TIME: &str = "Start Time";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Derived from `Start Time` at load time.
pub const MONTH: &str = "month";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const START_HOUR: &str = "start_hour";

/// Columns every city file must carry.
pub const REQUIRED_COLUMNS: [&str; 5] =
    [START_TIME, START_STATION, END_STATION, TRIP_DURATION, USER_TYPE];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Load the selected city's trips and keep the rows matching the filters.
pub fn load_trips(cities: &CityTable, selection: &FilterSelection) -> Result<DataFrame> {
    let path = cities.path_for(selection.city);
    tracing::debug!(city = %selection.city, path = %path.display(), "loading trips");

    let raw = read_trip_file(path)?;
    let total = raw.height();
    let trips = filter_trips(with_calendar_columns(raw)?, selection)?;

    tracing::debug!(total, kept = trips.height(), "applied filters for {}", selection);
    Ok(trips)
}

/// Read a trip CSV fully into memory.
///
/// Column types are inferred from every row, so a duration or birth year
/// with a fractional part deep into the file still reads as a float.
pub fn read_trip_file(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(eyre!("Trip data file not found: {}", path.display()));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.into()))?
        .finish()
        .map_err(|e| eyre!("Failed to read {}: {}", path.display(), e))?;

    for name in REQUIRED_COLUMNS {
        if df.column(name).is_err() {
            return Err(eyre!(
                "{} is missing the required column '{}'",
                path.display(),
                name
            ));
        }
    }

    Ok(df)
}

/// Parse `Start Time` and attach the month name, weekday name and hour.
///
/// Fails if any start time does not match `%Y-%m-%d %H:%M:%S`.
pub fn with_calendar_columns(df: DataFrame) -> Result<DataFrame> {
    let strptime = StrptimeOptions {
        format: Some(TIMESTAMP_FORMAT.into()),
        ..Default::default()
    };
    let start = col(START_TIME).str().to_datetime(
        Some(TimeUnit::Microseconds),
        None,
        strptime,
        lit("raise"),
    );

    df.lazy()
        .with_column(start.alias(START_TIME))
        .with_columns([
            col(START_TIME).dt().to_string("%B").alias(MONTH),
            col(START_TIME).dt().to_string("%A").alias(DAY_OF_WEEK),
            col(START_TIME)
                .dt()
                .hour()
                .cast(DataType::Int32)
                .alias(START_HOUR),
        ])
        .collect()
        .map_err(|e| eyre!("Could not parse '{}' column: {}", START_TIME, e))
}

/// Keep rows whose derived month/day names equal the selected filters.
pub fn filter_trips(df: DataFrame, selection: &FilterSelection) -> Result<DataFrame> {
    let mut lf = df.lazy();
    if let Some(month) = selection.month.name() {
        lf = lf.filter(col(MONTH).eq(lit(month)));
    }
    if let Some(day) = selection.day.name() {
        lf = lf.filter(col(DAY_OF_WEEK).eq(lit(day)));
    }
    Ok(lf.collect()?)
}
