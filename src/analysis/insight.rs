use chrono::Weekday;

use super::aggregate::{MonthTotals, WeekdayTotals};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Kpis – the five headline metrics
// ---------------------------------------------------------------------------

/// Headline metrics over the filtered view. `None` fields mean "N/A": the
/// view was empty, or (for trips-per-vehicle) no vehicles were active.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kpis {
    pub total_trips: u64,
    pub total_vehicles: u64,
    /// Largest `trips` value of any single record in the view.
    pub peak_trips: u64,
    /// Weekday with the highest summed trips. Distinct from `peak_trips`:
    /// one aggregates per weekday name, the other is a single-record max.
    pub busiest_day: Option<Weekday>,
    /// `total_trips / total_vehicles`, rounded to 2 decimals.
    pub trips_per_vehicle: Option<f64>,
}

/// Compute the KPI strip from the filtered view.
pub fn kpis(dataset: &Dataset, indices: &[usize], weekdays: &WeekdayTotals) -> Kpis {
    let mut total_trips = 0u64;
    let mut total_vehicles = 0u64;
    let mut peak_trips = 0u64;

    for &i in indices {
        let rec = &dataset.records[i];
        total_trips += u64::from(rec.trips);
        total_vehicles += u64::from(rec.active_vehicles);
        peak_trips = peak_trips.max(u64::from(rec.trips));
    }

    let trips_per_vehicle = if total_vehicles > 0 {
        let ratio = total_trips as f64 / total_vehicles as f64;
        Some((ratio * 100.0).round() / 100.0)
    } else {
        None
    };

    Kpis {
        total_trips,
        total_vehicles,
        peak_trips,
        busiest_day: best_day(weekdays),
        trips_per_vehicle,
    }
}

// ---------------------------------------------------------------------------
// Insights – the narrative summary under the charts
// ---------------------------------------------------------------------------

/// Derived argmax/argmin facts for the insights box. All `None` when the
/// filtered view is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insights {
    pub best_day: Option<Weekday>,
    pub worst_day: Option<Weekday>,
    /// Month number (1–12) with the highest summed trips.
    pub top_month: Option<u32>,
}

/// Derive insights from the weekday and month aggregates.
pub fn insights(weekdays: &WeekdayTotals, months: &MonthTotals) -> Insights {
    Insights {
        best_day: best_day(weekdays),
        worst_day: worst_day(weekdays),
        top_month: top_month(months),
    }
}

/// Weekday with the maximum summed trips. Ties resolve to the earliest
/// weekday in Monday→Sunday order.
fn best_day(weekdays: &WeekdayTotals) -> Option<Weekday> {
    let mut best: Option<(Weekday, u64)> = None;
    for (day, trips) in weekdays.iter() {
        match best {
            Some((_, t)) if trips <= t => {}
            _ => best = Some((day, trips)),
        }
    }
    best.map(|(day, _)| day)
}

/// Weekday with the minimum summed trips, same tie rule as [`best_day`].
fn worst_day(weekdays: &WeekdayTotals) -> Option<Weekday> {
    let mut worst: Option<(Weekday, u64)> = None;
    for (day, trips) in weekdays.iter() {
        match worst {
            Some((_, t)) if trips >= t => {}
            _ => worst = Some((day, trips)),
        }
    }
    worst.map(|(day, _)| day)
}

/// Month with the maximum summed trips; ties resolve to the earliest month.
fn top_month(months: &MonthTotals) -> Option<u32> {
    let mut top: Option<(u32, u64)> = None;
    for (month, trips) in months.iter() {
        match top {
            Some((_, t)) if trips <= t => {}
            _ => top = Some((month, trips)),
        }
    }
    top.map(|(month, _)| month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::{month_totals, weekday_totals};
    use crate::data::model::TripRecord;

    fn dataset(rows: &[(&str, u32, u32)]) -> Dataset {
        let records = rows
            .iter()
            .map(|&(date, vehicles, trips)| TripRecord {
                date: date.parse().unwrap(),
                base: "B02512".to_string(),
                active_vehicles: vehicles,
                trips,
            })
            .collect();
        Dataset::from_records(records)
    }

    #[test]
    fn empty_view_gives_sentinels_not_errors() {
        let ds = dataset(&[]);
        let weekdays = weekday_totals(&ds, &[]);
        let months = month_totals(&ds, &[]);

        let derived = insights(&weekdays, &months);
        assert_eq!(derived, Insights::default());

        let k = kpis(&ds, &[], &weekdays);
        assert_eq!(k.busiest_day, None);
        assert_eq!(k.trips_per_vehicle, None);
        assert_eq!(k.total_trips, 0);
    }

    #[test]
    fn best_and_worst_days_with_monday_first_tie_break() {
        // Tuesday and Wednesday tie at 50; Friday is lowest.
        let ds = dataset(&[
            ("2015-01-06", 1, 50), // Tue
            ("2015-01-07", 1, 50), // Wed
            ("2015-01-09", 1, 10), // Fri
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let derived = insights(
            &weekday_totals(&ds, &indices),
            &month_totals(&ds, &indices),
        );
        assert_eq!(derived.best_day, Some(Weekday::Tue));
        assert_eq!(derived.worst_day, Some(Weekday::Fri));
        assert_eq!(derived.top_month, Some(1));
    }

    #[test]
    fn kpis_sum_and_peak_over_the_view() {
        let ds = dataset(&[
            ("2015-01-01", 100, 500),
            ("2015-01-08", 120, 600),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let k = kpis(&ds, &indices, &weekday_totals(&ds, &indices));

        assert_eq!(k.total_trips, 1100);
        assert_eq!(k.total_vehicles, 220);
        assert_eq!(k.peak_trips, 600);
        // Both dates are Thursdays.
        assert_eq!(k.busiest_day, Some(Weekday::Thu));
        assert_eq!(k.trips_per_vehicle, Some(5.0));
    }

    #[test]
    fn zero_vehicles_never_divides() {
        let ds = dataset(&[("2015-01-01", 0, 500)]);
        let indices = vec![0];
        let k = kpis(&ds, &indices, &weekday_totals(&ds, &indices));
        assert_eq!(k.trips_per_vehicle, None);
        assert_eq!(k.total_trips, 500);
    }
}
