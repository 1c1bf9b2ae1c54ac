use bikeshare::filters::Choice;
use bikeshare::loader::{DAY_OF_WEEK, MONTH};
use bikeshare::{load_trips, City, CityTable, DayFilter, FilterSelection, MonthFilter};
use color_eyre::Result;
use polars::prelude::*;

mod common;

fn names(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_unfiltered_load_returns_every_row() -> Result<()> {
    let (_dir, cities) = common::sample_cities();
    for input in ["chicago", "NEW YORK CITY", "Washington"] {
        let city = City::parse(input).unwrap();
        let trips = load_trips(&cities, &FilterSelection::unfiltered(city))?;
        assert_eq!(trips.height(), common::START_TIMES.len(), "{input}");
    }
    Ok(())
}

#[test]
fn test_month_filter() -> Result<()> {
    let (_dir, cities) = common::sample_cities();
    let selection = FilterSelection::new(
        City::Chicago,
        MonthFilter::parse("june").unwrap(),
        DayFilter::All,
    );
    let trips = load_trips(&cities, &selection)?;
    assert_eq!(trips.height(), 4);
    assert!(names(&trips, MONTH).iter().all(|m| m == "June"));
    Ok(())
}

#[test]
fn test_day_filter() -> Result<()> {
    let (_dir, cities) = common::sample_cities();
    let selection = FilterSelection::new(
        City::Washington,
        MonthFilter::All,
        DayFilter::parse("Monday").unwrap(),
    );
    let trips = load_trips(&cities, &selection)?;
    assert_eq!(trips.height(), 3);
    assert!(names(&trips, DAY_OF_WEEK).iter().all(|d| d == "Monday"));
    Ok(())
}

#[test]
fn test_month_and_day_filter() -> Result<()> {
    let (_dir, cities) = common::sample_cities();
    let selection = FilterSelection::new(
        City::NewYorkCity,
        MonthFilter::parse("JUNE").unwrap(),
        DayFilter::parse("monday").unwrap(),
    );
    let trips = load_trips(&cities, &selection)?;
    assert_eq!(trips.height(), 2);
    Ok(())
}

#[test]
fn test_filter_with_no_matches_is_empty_not_an_error() -> Result<()> {
    let (_dir, cities) = common::sample_cities();
    let selection = FilterSelection::new(
        City::Chicago,
        MonthFilter::parse("April").unwrap(),
        DayFilter::All,
    );
    let trips = load_trips(&cities, &selection)?;
    assert_eq!(trips.height(), 0);
    Ok(())
}

#[test]
fn test_demographic_columns_only_where_present() -> Result<()> {
    let (_dir, cities) = common::sample_cities();
    let chicago = load_trips(&cities, &FilterSelection::unfiltered(City::Chicago))?;
    assert!(chicago.column("Gender").is_ok());
    assert!(chicago.column("Birth Year").is_ok());

    let washington = load_trips(&cities, &FilterSelection::unfiltered(City::Washington))?;
    assert!(washington.column("Gender").is_err());
    assert!(washington.column("Birth Year").is_err());
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let cities = CityTable::in_dir(dir.path());
    let err = load_trips(&cities, &FilterSelection::unfiltered(City::Chicago)).unwrap_err();
    assert!(err.to_string().contains("chicago.csv"));
}

#[test]
fn test_unparseable_start_time_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("washington.csv"),
        "Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
         2017-06-05 17:30:00,2017-06-05 17:45:00,900,A,B,Subscriber\n\
         sometime in june,2017-06-05 17:45:00,900,A,B,Subscriber\n",
    )
    .unwrap();
    let cities = CityTable::in_dir(dir.path());
    assert!(load_trips(&cities, &FilterSelection::unfiltered(City::Washington)).is_err());
}

#[test]
fn test_file_without_required_column_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("chicago.csv"),
        "Start Time,Trip Duration,Start Station,End Station\n\
         2017-06-05 17:30:00,900,A,B\n",
    )
    .unwrap();
    let cities = CityTable::in_dir(dir.path());
    let err = load_trips(&cities, &FilterSelection::unfiltered(City::Chicago)).unwrap_err();
    assert!(err.to_string().contains("User Type"));
}
