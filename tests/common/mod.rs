#![allow(dead_code)]

use bikeshare::{CityTable, Session, SessionOptions};
use polars::prelude::*;
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

pub const START_TIMES: [&str; 7] = [
    "2017-01-02 09:07:57", // Monday, January
    "2017-06-05 17:30:00", // Monday, June
    "2017-06-06 17:45:10", // Tuesday, June
    "2017-03-04 08:00:00", // Saturday, March
    "2017-06-11 17:05:00", // Sunday, June
    "2017-02-14 12:00:00", // Tuesday, February
    "2017-06-19 07:15:00", // Monday, June
];

fn trips() -> DataFrame {
    df!(
        "Start Time" => START_TIMES,
        "End Time" => [
            "2017-01-02 09:20:53",
            "2017-06-05 17:45:00",
            "2017-06-06 17:55:10",
            "2017-03-04 08:20:00",
            "2017-06-11 17:30:00",
            "2017-02-14 12:30:00",
            "2017-06-19 07:45:00",
        ],
        "Trip Duration" => [100i64, 200, 300, 400, 500, 600, 700],
        "Start Station" => ["Canal St", "Clark St", "Canal St", "Lake Shore Dr", "Canal St", "State St", "Canal St"],
        "End Station" => ["Wacker Dr", "Lake Shore Dr", "Wacker Dr", "Canal St", "Lake Shore Dr", "Wacker Dr", "Wacker Dr"],
        "User Type" => ["Subscriber", "Customer", "Subscriber", "Subscriber", "Subscriber", "Customer", "Subscriber"]
    )
    .unwrap()
}

fn trips_with_demographics() -> DataFrame {
    let mut df = trips();
    df.with_column(Column::new(
        "Gender".into(),
        [Some("Male"), None, Some("Female"), Some("Male"), Some("Male"), Some("Female"), Some("Male")],
    ))
    .unwrap();
    df.with_column(Column::new(
        "Birth Year".into(),
        [Some(1980.0), None, Some(1992.0), Some(1980.0), Some(1975.0), Some(2001.0), Some(1980.0)],
    ))
    .unwrap();
    df
}

fn write_csv(path: &Path, mut df: DataFrame) {
    let mut file = File::create(path).unwrap();
    CsvWriter::new(&mut file).finish(&mut df).unwrap();
}

/// Write chicago.csv, new_york_city.csv (with Gender and Birth Year) and
/// washington.csv (without) into a fresh temp dir.
pub fn sample_cities() -> (TempDir, CityTable) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_csv(&dir.path().join("chicago.csv"), trips_with_demographics());
    write_csv(&dir.path().join("new_york_city.csv"), trips_with_demographics());
    write_csv(&dir.path().join("washington.csv"), trips());
    let cities = CityTable::in_dir(dir.path());
    (dir, cities)
}

/// Drive a whole session with scripted answers and capture everything printed.
pub fn run_session(cities: CityTable, input: &str) -> (color_eyre::Result<usize>, String) {
    let mut session = Session::new(
        Cursor::new(input.as_bytes().to_vec()),
        Vec::new(),
        cities,
        SessionOptions::default(),
    );
    let result = session.run();
    let output = String::from_utf8(session.into_output()).unwrap();
    (result, output)
}
