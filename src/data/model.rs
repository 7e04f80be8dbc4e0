use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

// ---------------------------------------------------------------------------
// TripRecord – one row of the source CSV
// ---------------------------------------------------------------------------

/// One reported day of activity for a single dispatching base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    /// Calendar date of the report.
    pub date: NaiveDate,
    /// Dispatching base code, e.g. `B02512`.
    #[serde(rename = "dispatching_base_number")]
    pub base: String,
    /// Vehicles active on that date for this base.
    pub active_vehicles: u32,
    /// Completed trips on that date for this base.
    pub trips: u32,
}

impl TripRecord {
    /// Weekday of the record's date.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Month number (1–12) of the record's date.
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

/// English name for a month number (1–12).
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}

/// English name for a weekday, matching chrono's `%A` formatting.
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

/// The seven weekdays in display order (Monday first).
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct values.
///
/// Loaded once and never mutated; every computation borrows it.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records in file order.
    pub records: Vec<TripRecord>,
    /// Distinct month numbers present, ascending.
    pub months: Vec<u32>,
    /// Distinct dispatching base codes present, sorted.
    pub bases: Vec<String>,
}

impl Dataset {
    /// Build the distinct-value indices from the loaded records.
    pub fn from_records(records: Vec<TripRecord>) -> Self {
        let mut months: BTreeSet<u32> = BTreeSet::new();
        let mut bases: BTreeSet<String> = BTreeSet::new();

        for rec in &records {
            months.insert(rec.month());
            bases.insert(rec.base.clone());
        }

        Dataset {
            records,
            months: months.into_iter().collect(),
            bases: bases.into_iter().collect(),
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
