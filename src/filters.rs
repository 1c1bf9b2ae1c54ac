//! The fixed allow-lists a user picks from before any data is loaded.

use chrono::{Month, Weekday};
use std::fmt;

/// A value picked from a small fixed allow-list by case-insensitive match.
pub trait Choice: Sized {
    /// Prompt shown the first time the value is requested.
    const PROMPT: &'static str;
    /// Prompt shown after an invalid answer.
    const RETRY_PROMPT: &'static str;
    /// Human readable list of accepted values, used in the guidance message.
    const OPTIONS: &'static str;

    fn parse(input: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Choice for City {
    const PROMPT: &'static str =
        "\nPlease enter a city (Chicago, New York City or Washington) you are interested in: ";
    const RETRY_PROMPT: &'static str =
        "Which city are you interested in? Chicago, New York City or Washington?";
    const OPTIONS: &'static str = "Chicago, New York City or Washington";

    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        City::ALL
            .into_iter()
            .find(|city| city.name().eq_ignore_ascii_case(input))
    }
}

/// Months present in the bikeshare datasets.
const MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday, matching the derived `day_of_week` column.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// Title-case month name to match against, or `None` when unfiltered.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            MonthFilter::All => None,
            MonthFilter::Only(month) => Some(month.name()),
        }
    }
}

impl Choice for MonthFilter {
    const PROMPT: &'static str = "\nPlease enter a month (January, February, March, April, May, June or All) you are interested in: ";
    const RETRY_PROMPT: &'static str =
        "Which month are you interested in? January, February, March, April, May, June or All?";
    const OPTIONS: &'static str = "January, February, March, April, May, June or All";

    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("all") {
            return Some(MonthFilter::All);
        }
        MONTHS
            .into_iter()
            .find(|month| month.name().eq_ignore_ascii_case(input))
            .map(MonthFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    pub fn name(&self) -> Option<&'static str> {
        match self {
            DayFilter::All => None,
            DayFilter::Only(day) => Some(weekday_name(*day)),
        }
    }
}

impl Choice for DayFilter {
    const PROMPT: &'static str = "\nPlease enter a day of week (Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday or All) you are interested in: ";
    const RETRY_PROMPT: &'static str = "Which day of week are you interested in? Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday or All";
    const OPTIONS: &'static str =
        "Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday or All";

    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("all") {
            return Some(DayFilter::All);
        }
        WEEKDAYS
            .into_iter()
            .find(|day| weekday_name(*day).eq_ignore_ascii_case(input))
            .map(DayFilter::Only)
    }
}

/// City plus optional month and day filters, fixed for one pass of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl FilterSelection {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// Selection for a whole city with no month or day filter.
    pub fn unfiltered(city: City) -> Self {
        Self::new(city, MonthFilter::All, DayFilter::All)
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (month: {}, day: {})",
            self.city,
            self.month.name().unwrap_or("all"),
            self.day.name().unwrap_or("all")
        )
    }
}
