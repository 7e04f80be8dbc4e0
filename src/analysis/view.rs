use super::aggregate::{
    self, DailySeries, MonthTotals, WeekdayTotals,
};
use super::forecast::{self, ForecastPoint, FORECAST_HORIZON};
use super::insight::{self, Insights, Kpis};
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// ViewModel – everything one interaction produces
// ---------------------------------------------------------------------------

/// Scatter data for the vehicles-vs-trips chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterView {
    /// One `(active_vehicles, trips)` point per record in the view.
    pub points: Vec<[f64; 2]>,
    /// OLS trendline `(intercept, slope)`; `None` with < 2 points or when
    /// every record has the same vehicle count.
    pub trendline: Option<(f64, f64)>,
}

/// The complete output of one filter interaction, ready for the UI.
///
/// Pure value: no handle back to the dataset, no identity between runs. It is
/// rebuilt from scratch whenever the selection changes and replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    pub kpis: Kpis,
    pub daily: DailySeries,
    pub scatter: ScatterView,
    pub weekdays: WeekdayTotals,
    pub months: MonthTotals,
    /// Daily series of the selected base over the FULL dataset.
    pub base_daily: DailySeries,
    /// `None` when the daily series has fewer than 2 points.
    pub forecast: Option<Vec<ForecastPoint>>,
    pub insights: Insights,
}

/// Run the whole pipeline: filter → aggregate → forecast → insights.
///
/// Synchronous, allocation-bounded by the dataset size, and independent of
/// any UI toolkit, so the dashboard's behavior is testable headlessly.
pub fn build_view(
    dataset: &Dataset,
    selection: &FilterSelection,
    selected_base: Option<&str>,
) -> ViewModel {
    let indices = filtered_indices(dataset, selection);

    let daily = aggregate::daily_series(dataset, &indices);
    let weekdays = aggregate::weekday_totals(dataset, &indices);
    let months = aggregate::month_totals(dataset, &indices);

    let points = aggregate::scatter_points(dataset, &indices);
    let scatter = ScatterView {
        trendline: forecast::fit_line(&points),
        points,
    };

    let base_daily = selected_base
        .map(|base| aggregate::base_daily_series(dataset, base))
        .unwrap_or_default();

    let projected = match forecast::forecast(&daily, FORECAST_HORIZON) {
        Ok(points) => Some(points),
        Err(err) => {
            log::debug!("forecast unavailable: {err}");
            None
        }
    };

    ViewModel {
        kpis: insight::kpis(dataset, &indices, &weekdays),
        insights: insight::insights(&weekdays, &months),
        daily,
        scatter,
        weekdays,
        months,
        base_daily,
        forecast: projected,
    }
}
