use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};

use crate::data::model::{Dataset, WEEK};

/// Window length for the trailing moving average over the daily series.
pub const ROLLING_WINDOW: usize = 7;

// ---------------------------------------------------------------------------
// DailySeries – trips per calendar date
// ---------------------------------------------------------------------------

/// One date of the aggregated daily series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    /// Total trips across all records on this date.
    pub trips: u64,
    /// Trailing 7-point moving average; `None` until 7 samples exist.
    pub rolling_avg: Option<f64>,
}

/// Trips summed per date, ascending, with the rolling average attached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    pub points: Vec<DailyPoint>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last observed date, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Sum of all grouped values.
    pub fn total_trips(&self) -> u64 {
        self.points.iter().map(|p| p.trips).sum()
    }
}

/// Sum `trips` per date over the given record indices and attach the
/// trailing moving average.
pub fn daily_series(dataset: &Dataset, indices: &[usize]) -> DailySeries {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        *by_date.entry(rec.date).or_default() += u64::from(rec.trips);
    }

    let ordered: Vec<(NaiveDate, u64)> = by_date.into_iter().collect();
    let points = ordered
        .iter()
        .enumerate()
        .map(|(i, &(date, trips))| DailyPoint {
            date,
            trips,
            rolling_avg: rolling_mean(&ordered, i),
        })
        .collect();

    DailySeries { points }
}

/// Mean of the window ending at `i` (inclusive), or `None` while the window
/// is still filling up.
fn rolling_mean(ordered: &[(NaiveDate, u64)], i: usize) -> Option<f64> {
    if i + 1 < ROLLING_WINDOW {
        return None;
    }
    let window = &ordered[i + 1 - ROLLING_WINDOW..=i];
    let sum: u64 = window.iter().map(|&(_, t)| t).sum();
    Some(sum as f64 / ROLLING_WINDOW as f64)
}

/// Daily series for a single base over the FULL dataset.
///
/// The base-performance chart deliberately ignores the sidebar filters; it
/// answers "how is this base doing overall", not "within the current view".
pub fn base_daily_series(dataset: &Dataset, base: &str) -> DailySeries {
    let indices: Vec<usize> = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.base == base)
        .map(|(i, _)| i)
        .collect();
    daily_series(dataset, &indices)
}

// ---------------------------------------------------------------------------
// WeekdayTotals – trips per day of the week
// ---------------------------------------------------------------------------

/// Trips summed per weekday. Only weekdays that actually occur in the view
/// are present; iteration is always Monday→Sunday.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekdayTotals {
    by_day: BTreeMap<u32, u64>,
}

impl WeekdayTotals {
    pub fn is_empty(&self) -> bool {
        self.by_day.is_empty()
    }

    pub fn get(&self, day: Weekday) -> Option<u64> {
        self.by_day.get(&day.num_days_from_monday()).copied()
    }

    /// Present weekdays with their totals, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, u64)> + '_ {
        WEEK.iter()
            .filter_map(|&day| self.get(day).map(|t| (day, t)))
    }
}

/// Sum `trips` per weekday over the given record indices.
pub fn weekday_totals(dataset: &Dataset, indices: &[usize]) -> WeekdayTotals {
    let mut by_day: BTreeMap<u32, u64> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        *by_day.entry(rec.weekday().num_days_from_monday()).or_default() +=
            u64::from(rec.trips);
    }
    WeekdayTotals { by_day }
}

// ---------------------------------------------------------------------------
// MonthTotals – trips per month
// ---------------------------------------------------------------------------

/// Trips summed per month number, ascending month order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthTotals {
    by_month: BTreeMap<u32, u64>,
}

impl MonthTotals {
    pub fn is_empty(&self) -> bool {
        self.by_month.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.by_month.iter().map(|(&m, &t)| (m, t))
    }

    pub fn total(&self) -> u64 {
        self.by_month.values().sum()
    }
}

/// Sum `trips` per month over the given record indices.
pub fn month_totals(dataset: &Dataset, indices: &[usize]) -> MonthTotals {
    let mut by_month: BTreeMap<u32, u64> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        *by_month.entry(rec.month()).or_default() += u64::from(rec.trips);
    }
    MonthTotals { by_month }
}

// ---------------------------------------------------------------------------
// Scatter – active vehicles vs trips
// ---------------------------------------------------------------------------

/// One `(active_vehicles, trips)` pair per record for the correlation chart.
pub fn scatter_points(dataset: &Dataset, indices: &[usize]) -> Vec<[f64; 2]> {
    indices
        .iter()
        .map(|&i| {
            let rec = &dataset.records[i];
            [f64::from(rec.active_vehicles), f64::from(rec.trips)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_indices, FilterSelection};
    use crate::data::model::TripRecord;

    fn rec(date: &str, base: &str, trips: u32) -> TripRecord {
        TripRecord {
            date: date.parse().unwrap(),
            base: base.to_string(),
            active_vehicles: 10,
            trips,
        }
    }

    #[test]
    fn daily_series_sums_per_date_ascending() {
        // Two bases on the same day collapse into one point.
        let ds = Dataset::from_records(vec![
            rec("2015-01-02", "B02598", 300),
            rec("2015-01-01", "B02512", 500),
            rec("2015-01-01", "B02598", 250),
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let series = daily_series(&ds, &indices);

        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].date, "2015-01-01".parse().unwrap());
        assert_eq!(series.points[0].trips, 750);
        assert_eq!(series.points[1].trips, 300);
    }

    #[test]
    fn aggregation_preserves_total_mass() {
        let ds = Dataset::from_records(vec![
            rec("2015-01-01", "B02512", 500),
            rec("2015-01-01", "B02598", 250),
            rec("2015-02-03", "B02512", 125),
        ]);
        let sel = FilterSelection::all_of(&ds);
        let indices = filtered_indices(&ds, &sel);

        let direct: u64 = indices.iter().map(|&i| u64::from(ds.records[i].trips)).sum();
        assert_eq!(daily_series(&ds, &indices).total_trips(), direct);
    }

    #[test]
    fn rolling_average_needs_seven_samples() {
        let records: Vec<TripRecord> = (0u32..10)
            .map(|i| rec(&format!("2015-01-{:02}", i + 1), "B02512", 100 * (i + 1)))
            .collect();
        let ds = Dataset::from_records(records);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let series = daily_series(&ds, &indices);

        for p in &series.points[..6] {
            assert_eq!(p.rolling_avg, None);
        }
        // Position 6: mean of 100..=700.
        assert_eq!(series.points[6].rolling_avg, Some(400.0));
        // Position 9: mean of 400..=1000.
        assert_eq!(series.points[9].rolling_avg, Some(700.0));
    }

    #[test]
    fn weekday_totals_iterate_monday_first() {
        // 2015-01-04 is a Sunday, 2015-01-05 a Monday.
        let ds = Dataset::from_records(vec![
            rec("2015-01-04", "B02512", 40),
            rec("2015-01-05", "B02512", 10),
            rec("2015-01-11", "B02512", 2), // another Sunday
        ]);
        let indices: Vec<usize> = (0..ds.len()).collect();
        let totals = weekday_totals(&ds, &indices);

        let collected: Vec<(Weekday, u64)> = totals.iter().collect();
        assert_eq!(collected, vec![(Weekday::Mon, 10), (Weekday::Sun, 42)]);
    }

    #[test]
    fn empty_view_yields_empty_aggregates() {
        let ds = Dataset::from_records(vec![rec("2015-01-01", "B02512", 500)]);
        let series = daily_series(&ds, &[]);
        assert!(series.is_empty());
        assert!(weekday_totals(&ds, &[]).is_empty());
        assert!(month_totals(&ds, &[]).is_empty());
        assert!(scatter_points(&ds, &[]).is_empty());
    }

    #[test]
    fn base_series_ignores_other_bases() {
        let ds = Dataset::from_records(vec![
            rec("2015-01-01", "B02512", 500),
            rec("2015-01-01", "B02598", 999),
            rec("2015-01-02", "B02512", 400),
        ]);
        let series = base_daily_series(&ds, "B02512");
        assert_eq!(series.len(), 2);
        assert_eq!(series.total_trips(), 900);
    }
}
