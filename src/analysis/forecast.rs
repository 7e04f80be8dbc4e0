use chrono::{Duration, NaiveDate};
use thiserror::Error;

use super::aggregate::DailySeries;

/// How many days ahead the dashboard projects.
pub const FORECAST_HORIZON: usize = 7;

/// A line needs two points; fewer observed days than that and the fit is
/// meaningless. Surfaced as a warning in the UI, never a crash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not enough data to fit a trend: need at least 2 observed days, got {0}")]
pub struct InsufficientData(pub usize);

/// One projected day.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Predicted trips; may dip below zero on a falling trend, the chart
    /// plots it as-is.
    pub trips: f64,
}

// ---------------------------------------------------------------------------
// Ordinary least squares, single feature
// ---------------------------------------------------------------------------

/// Closed-form OLS fit `y = intercept + slope * x`.
///
/// Returns `None` for fewer than 2 points or a degenerate (zero-variance) x.
pub fn fit_line(points: &[[f64; 2]]) -> Option<(f64, f64)> {
    let n = points.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mean_x: f64 = points.iter().map(|p| p[0]).sum::<f64>() / nf;
    let mean_y: f64 = points.iter().map(|p| p[1]).sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var = 0.0;
    for p in points {
        let dx = p[0] - mean_x;
        cov += dx * (p[1] - mean_y);
        var += dx * dx;
    }
    if var == 0.0 {
        return None;
    }

    let slope = cov / var;
    Some((mean_y - slope * mean_x, slope))
}

/// Fit a trend over the daily series and project `horizon` days past its end.
///
/// The regression feature is the 0-based position in the date-sorted series,
/// not the calendar date, so gaps in the observed calendar are not modeled.
/// The projected dates ARE contiguous: the `horizon` days immediately after
/// the last observed date.
pub fn forecast(
    series: &DailySeries,
    horizon: usize,
) -> Result<Vec<ForecastPoint>, InsufficientData> {
    let n = series.len();

    let points: Vec<[f64; 2]> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| [i as f64, p.trips as f64])
        .collect();

    let (intercept, slope) = fit_line(&points).ok_or(InsufficientData(n))?;
    let last_date = series.last_date().ok_or(InsufficientData(0))?;

    Ok((0..horizon)
        .map(|ahead| {
            let day_index = (n + ahead) as f64;
            ForecastPoint {
                date: last_date + Duration::days(ahead as i64 + 1),
                trips: intercept + slope * day_index,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::daily_series;
    use crate::data::model::{Dataset, TripRecord};

    fn series_of(days: &[(&str, u32)]) -> DailySeries {
        let records = days
            .iter()
            .map(|&(date, trips)| TripRecord {
                date: date.parse().unwrap(),
                base: "B02512".to_string(),
                active_vehicles: 1,
                trips,
            })
            .collect();
        let ds = Dataset::from_records(records);
        let indices: Vec<usize> = (0..ds.len()).collect();
        daily_series(&ds, &indices)
    }

    #[test]
    fn fit_recovers_a_known_line() {
        // y = 2 + 3x
        let points = [[0.0, 2.0], [1.0, 5.0], [2.0, 8.0]];
        let (intercept, slope) = fit_line(&points).unwrap();
        assert!((intercept - 2.0).abs() < 1e-10);
        assert!((slope - 3.0).abs() < 1e-10);
    }

    #[test]
    fn too_few_points_is_an_error_not_a_panic() {
        assert_eq!(
            forecast(&series_of(&[]), FORECAST_HORIZON),
            Err(InsufficientData(0))
        );
        assert_eq!(
            forecast(&series_of(&[("2015-01-01", 10)]), FORECAST_HORIZON),
            Err(InsufficientData(1))
        );
    }

    #[test]
    fn perfectly_linear_series_extends_exactly() {
        let series = series_of(&[
            ("2015-01-01", 10),
            ("2015-01-02", 12),
            ("2015-01-03", 14),
        ]);
        let points = forecast(&series, FORECAST_HORIZON).unwrap();

        let expected = [16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0];
        assert_eq!(points.len(), expected.len());
        for (i, (point, want)) in points.iter().zip(expected).enumerate() {
            assert!((point.trips - want).abs() < 1e-9, "day {i}: {point:?}");
            let want_date = NaiveDate::from_ymd_opt(2015, 1, 4 + i as u32).unwrap();
            assert_eq!(point.date, want_date);
        }
    }

    #[test]
    fn forecast_dates_are_contiguous_even_over_observed_gaps() {
        // Observed series skips Jan 2; projection still starts the day after
        // the last observation and runs daily.
        let series = series_of(&[("2015-01-01", 10), ("2015-01-03", 20)]);
        let points = forecast(&series, 3).unwrap();
        let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                "2015-01-04".parse().unwrap(),
                "2015-01-05".parse().unwrap(),
                "2015-01-06".parse().unwrap(),
            ]
        );
    }

    #[test]
    fn flat_series_projects_the_constant() {
        let series = series_of(&[
            ("2015-01-01", 100),
            ("2015-01-02", 100),
            ("2015-01-03", 100),
        ]);
        let points = forecast(&series, 2).unwrap();
        for p in points {
            assert!((p.trips - 100.0).abs() < 1e-9);
        }
    }
}
