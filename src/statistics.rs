use color_eyre::eyre::eyre;
use color_eyre::Result;
use polars::prelude::*;

use crate::loader::{
    BIRTH_YEAR, DAY_OF_WEEK, END_STATION, GENDER, MONTH, START_HOUR, START_STATION,
    TRIP_DURATION, USER_TYPE,
};

/// Name of the frequency column produced by [`ranked_counts`].
pub const COUNT: &str = "count";

pub struct TimeStatistics {
    pub month: String,
    pub day_of_week: String,
    pub start_hour: i64,
}

pub struct StationStatistics {
    pub start_station: String,
    pub end_station: String,
    pub trip: String, // "start - end"
}

pub struct DurationStatistics {
    pub total: f64,
    pub mean: f64, // NaN for an empty table
}

pub struct BirthYearStatistics {
    pub earliest: i64,
    pub most_recent: i64,
    pub most_common: i64,
}

/// Demographics for the user stats report.
///
/// Optional sections are `None` when their column is absent. `birth_years` is
/// only computed when `gender` is present: once one optional section is
/// missing the rest of the report is abandoned.
pub struct UserStatistics {
    pub user_types: Vec<(String, usize)>,
    pub gender: Option<Vec<(String, usize)>>,
    pub birth_years: Option<BirthYearStatistics>,
}

/// Distinct combinations of `keys` with a [`COUNT`] column, most frequent first.
///
/// Rows with a null in any key are dropped. Groups are formed in order of
/// first appearance and the sort keeps that order among equal counts, so the
/// first row is the mode with ties going to the value seen first.
pub fn ranked_counts(df: &DataFrame, keys: &[&str]) -> Result<DataFrame> {
    let mut lf = df.clone().lazy();
    for key in keys {
        lf = lf.filter(col(*key).is_not_null());
    }
    let options = SortMultipleOptions {
        descending: vec![true],
        maintain_order: true,
        ..Default::default()
    };
    let ranked = lf
        .group_by_stable(keys.iter().map(|key| col(*key)).collect::<Vec<_>>())
        .agg([len().alias(COUNT)])
        .sort_by_exprs([col(COUNT)], options)
        .collect()?;
    Ok(ranked)
}

/// Frequency of each non-null value of `name`, most frequent first.
pub fn value_counts(df: &DataFrame, name: &str) -> Result<Vec<(String, usize)>> {
    let ranked = ranked_counts(df, &[name])?;
    let values = string_series(&ranked, name)?;
    let counts = ranked
        .column(COUNT)?
        .as_materialized_series()
        .cast(&DataType::UInt64)?;

    Ok(values
        .str()?
        .into_iter()
        .zip(counts.u64()?.into_iter())
        .filter_map(|pair| match pair {
            (Some(value), Some(count)) => Some((value.to_string(), count as usize)),
            _ => None,
        })
        .collect())
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

fn string_series(df: &DataFrame, name: &str) -> Result<Series> {
    Ok(df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?)
}

fn float_column(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.clone())
}

/// First value of `name` in a [`ranked_counts`] frame, as text.
fn top_string(ranked: &DataFrame, name: &str) -> Result<Option<String>> {
    let series = string_series(ranked, name)?;
    Ok(series.str()?.get(0).map(str::to_string))
}

/// First value of `name` in a [`ranked_counts`] frame, as a whole number.
fn top_int(ranked: &DataFrame, name: &str) -> Result<Option<i64>> {
    let series = ranked
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    Ok(series.i64()?.get(0))
}

fn string_mode(df: &DataFrame, name: &str) -> Result<String> {
    top_string(&ranked_counts(df, &[name])?, name)?.ok_or_else(|| no_values(name))
}

fn int_mode(df: &DataFrame, name: &str) -> Result<i64> {
    top_int(&ranked_counts(df, &[name])?, name)?.ok_or_else(|| no_values(name))
}

fn no_values(name: &str) -> color_eyre::Report {
    eyre!("No values in column '{}' to find the most common of", name)
}

/// Most common month, weekday and start hour.
///
/// Errors when the table has no rows, since there is no mode to report.
pub fn compute_time_statistics(df: &DataFrame) -> Result<TimeStatistics> {
    Ok(TimeStatistics {
        month: string_mode(df, MONTH)?,
        day_of_week: string_mode(df, DAY_OF_WEEK)?,
        start_hour: int_mode(df, START_HOUR)?,
    })
}

/// Most common start station, end station and start/end pair.
pub fn compute_station_statistics(df: &DataFrame) -> Result<StationStatistics> {
    let start_station = string_mode(df, START_STATION)?;
    let end_station = string_mode(df, END_STATION)?;

    let pairs = ranked_counts(df, &[START_STATION, END_STATION])?;
    let (Some(start), Some(end)) = (
        top_string(&pairs, START_STATION)?,
        top_string(&pairs, END_STATION)?,
    ) else {
        return Err(no_values("Start Station - End Station"));
    };

    Ok(StationStatistics {
        start_station,
        end_station,
        trip: format!("{start} - {end}"),
    })
}

/// Total and mean trip duration in seconds, ignoring nulls.
pub fn compute_duration_statistics(df: &DataFrame) -> Result<DurationStatistics> {
    let durations = float_column(df, TRIP_DURATION)?;
    Ok(DurationStatistics {
        total: durations.sum().unwrap_or(0.0),
        mean: durations.mean().unwrap_or(f64::NAN),
    })
}

/// Earliest, most recent and most common birth year, or `None` when the
/// column has no values.
pub fn compute_birth_year_statistics(df: &DataFrame) -> Result<Option<BirthYearStatistics>> {
    let years = float_column(df, BIRTH_YEAR)?;
    let (Some(earliest), Some(most_recent)) = (years.min(), years.max()) else {
        return Ok(None);
    };
    let Some(most_common) = top_int(&ranked_counts(df, &[BIRTH_YEAR])?, BIRTH_YEAR)? else {
        return Ok(None);
    };

    Ok(Some(BirthYearStatistics {
        earliest: earliest as i64,
        most_recent: most_recent as i64,
        most_common,
    }))
}

pub fn compute_user_statistics(df: &DataFrame) -> Result<UserStatistics> {
    let user_types = value_counts(df, USER_TYPE)?;

    let gender = if has_column(df, GENDER) {
        Some(value_counts(df, GENDER)?)
    } else {
        None
    };

    let birth_years = if gender.is_some() && has_column(df, BIRTH_YEAR) {
        compute_birth_year_statistics(df)?
    } else {
        None
    };

    Ok(UserStatistics {
        user_types,
        gender,
        birth_years,
    })
}
