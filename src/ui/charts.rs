use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, LineStyle, Plot, PlotPoints, Points};

use crate::analysis::aggregate::{DailySeries, MonthTotals, WeekdayTotals};
use crate::analysis::forecast::ForecastPoint;
use crate::analysis::insight::{Insights, Kpis};
use crate::analysis::view::ScatterView;
use crate::color::generate_palette;
use crate::data::model::{month_name, weekday_name};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 240.0;
const PRIMARY: Color32 = Color32::from_rgb(0x25, 0x63, 0xEB);
const ACCENT: Color32 = Color32::from_rgb(0xF9, 0x73, 0x16);
const GROWTH: Color32 = Color32::from_rgb(0x16, 0xA3, 0x4A);

// ---------------------------------------------------------------------------
// Central panel – the dashboard itself
// ---------------------------------------------------------------------------

/// Render the whole dashboard in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let (dataset, view) = match (&state.dataset, &state.view) {
        (Some(ds), Some(view)) => (ds, view),
        _ => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a trip CSV to start  (File → Open…)");
            });
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Uber Trip Analytics");
            ui.add_space(4.0);
            kpi_strip(ui, &view.kpis);
            ui.separator();

            if view.daily.is_empty() && !dataset.is_empty() {
                warning(ui, "No data available for the selected filters.");
            }

            section(ui, "Trip Demand Over Time");
            trend_chart(ui, &view.daily);

            section(ui, "Vehicles vs Trips Relationship");
            scatter_chart(ui, &view.scatter);

            ui.columns(2, |cols: &mut [Ui]| {
                section(&mut cols[0], "Trips by Day of Week");
                weekday_chart(&mut cols[0], &view.weekdays);

                section(&mut cols[1], "Trips by Month");
                month_chart(&mut cols[1], &view.months);
            });

            section(ui, "Base Performance Trend");
            let base = state.selected_base.as_deref().unwrap_or("?");
            let color = state.base_colors.color_for(base);
            base_chart(ui, &view.base_daily, base, color);

            section(ui, "Insights");
            insight_box(ui, &view.insights);

            section(ui, "Next 7-Day Trip Forecast");
            forecast_chart(ui, &view.daily, view.forecast.as_deref());
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(10.0);
    ui.strong(title);
}

fn warning(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(Color32::YELLOW));
}

// ---------------------------------------------------------------------------
// KPI strip
// ---------------------------------------------------------------------------

fn kpi_strip(ui: &mut Ui, kpis: &Kpis) {
    let busiest = kpis
        .busiest_day
        .map(weekday_name)
        .unwrap_or("N/A")
        .to_string();
    let per_vehicle = kpis
        .trips_per_vehicle
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "N/A".to_string());

    let metrics = [
        ("Total Trips", group_thousands(kpis.total_trips)),
        ("Active Vehicles", group_thousands(kpis.total_vehicles)),
        ("Peak Day Trips", group_thousands(kpis.peak_trips)),
        ("Busiest Day", busiest),
        ("Trips per Vehicle", per_vehicle),
    ];

    ui.columns(metrics.len(), |cols: &mut [Ui]| {
        for (col, (label, value)) in cols.iter_mut().zip(metrics) {
            col.vertical_centered(|ui: &mut Ui| {
                ui.label(RichText::new(label).small());
                ui.heading(value);
            });
        }
    });
}

/// `1234567` → `"1,234,567"`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Date axis helpers
// ---------------------------------------------------------------------------

/// Plot x-coordinate for a date: days since the Common Era.
fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

fn x_to_date_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| format!("{} {}", &month_name(d.month())[..3], d.day()))
        .unwrap_or_default()
}

/// `(date, trips)` pairs in plot coordinates.
fn daily_points(series: &DailySeries) -> Vec<[f64; 2]> {
    series
        .points
        .iter()
        .map(|p| [date_to_x(p.date), p.trips as f64])
        .collect()
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Daily trips plus the dashed 7-day moving average.
fn trend_chart(ui: &mut Ui, series: &DailySeries) {
    if series.is_empty() {
        warning(ui, "No data available for selected filters.");
        return;
    }

    let daily: PlotPoints = daily_points(series).into();
    let rolling: PlotPoints = series
        .points
        .iter()
        .filter_map(|p| p.rolling_avg.map(|avg| [date_to_x(p.date), avg]))
        .collect();

    Plot::new("trend")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Trips")
        .x_axis_formatter(|mark, _range| x_to_date_label(mark.value))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(daily).name("Daily Trips").color(PRIMARY).width(2.0));
            plot_ui.line(
                Line::new(rolling)
                    .name("7-Day Avg")
                    .color(ACCENT)
                    .width(3.0)
                    .style(LineStyle::Dashed { length: 8.0 }),
            );
        });
}

/// Active vehicles vs trips with the OLS trendline.
fn scatter_chart(ui: &mut Ui, scatter: &ScatterView) {
    if scatter.points.is_empty() {
        warning(ui, "No data available for selected filters.");
        return;
    }

    let min_x = scatter.points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
    let max_x = scatter.points.iter().map(|p| p[0]).fold(f64::NEG_INFINITY, f64::max);
    let points: PlotPoints = scatter.points.clone().into();

    Plot::new("scatter")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Active Vehicles")
        .y_axis_label("Trips")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(points).name("Records").color(PRIMARY).radius(2.5));
            if let Some((intercept, slope)) = scatter.trendline {
                let fit: PlotPoints = [min_x, max_x]
                    .iter()
                    .map(|&x| [x, intercept + slope * x])
                    .collect();
                plot_ui.line(Line::new(fit).name("OLS fit").color(ACCENT).width(2.0));
            }
        });
}

/// Bar per weekday, Monday first, one palette colour each.
fn weekday_chart(ui: &mut Ui, weekdays: &WeekdayTotals) {
    if weekdays.is_empty() {
        warning(ui, "No data available for selected filters.");
        return;
    }

    let palette = generate_palette(7);
    let bars: Vec<Bar> = weekdays
        .iter()
        .enumerate()
        .map(|(i, (day, trips))| {
            Bar::new(i as f64, trips as f64)
                .name(weekday_name(day))
                .fill(palette[day.num_days_from_monday() as usize])
                .width(0.7)
        })
        .collect();

    Plot::new("weekdays")
        .height(CHART_HEIGHT)
        .y_axis_label("Trips")
        .show_axes([false, true])
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Trips by weekday"));
        });
}

/// Month share as labelled bars (stand-in for the original pie chart).
fn month_chart(ui: &mut Ui, months: &MonthTotals) {
    if months.is_empty() {
        warning(ui, "No monthly data available.");
        return;
    }

    let total = months.total() as f64;
    let palette = generate_palette(12);
    let bars: Vec<Bar> = months
        .iter()
        .enumerate()
        .map(|(i, (month, trips))| {
            let share = 100.0 * trips as f64 / total;
            Bar::new(i as f64, trips as f64)
                .name(format!("{} ({share:.1}%)", month_name(month)))
                .fill(palette[(month - 1) as usize])
                .width(0.7)
        })
        .collect();

    Plot::new("months")
        .height(CHART_HEIGHT)
        .y_axis_label("Trips")
        .show_axes([false, true])
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Trips by month"));
        });
}

/// Daily trend of the single selected base (unfiltered dataset).
fn base_chart(ui: &mut Ui, series: &DailySeries, base: &str, color: Color32) {
    if series.is_empty() {
        warning(ui, "No data for this base.");
        return;
    }

    let points: PlotPoints = daily_points(series).into();

    Plot::new("base_trend")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Trips")
        .x_axis_formatter(|mark, _range| x_to_date_label(mark.value))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name(format!("Trips for base {base}"))
                    .color(color)
                    .width(3.0),
            );
        });
}

/// Observed series plus the dashed 7-day projection.
fn forecast_chart(ui: &mut Ui, series: &DailySeries, forecast: Option<&[ForecastPoint]>) {
    let Some(forecast) = forecast else {
        warning(ui, "Not enough data to build forecast.");
        return;
    };

    let actual: PlotPoints = daily_points(series).into();
    let projected: Vec<[f64; 2]> = forecast
        .iter()
        .map(|p| [date_to_x(p.date), p.trips])
        .collect();
    let markers: PlotPoints = projected.clone().into();
    let projected: PlotPoints = projected.into();

    Plot::new("forecast")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Trips")
        .x_axis_formatter(|mark, _range| x_to_date_label(mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(actual).name("Actual").color(PRIMARY).width(2.0));
            plot_ui.line(
                Line::new(projected)
                    .name("Forecast")
                    .color(GROWTH)
                    .width(3.0)
                    .style(LineStyle::Dashed { length: 8.0 }),
            );
            plot_ui.points(Points::new(markers).color(GROWTH).radius(3.0));
        });
}

// ---------------------------------------------------------------------------
// Insights box
// ---------------------------------------------------------------------------

fn insight_box(ui: &mut Ui, insights: &Insights) {
    let best = insights.best_day.map(weekday_name).unwrap_or("N/A");
    let worst = insights.worst_day.map(weekday_name).unwrap_or("N/A");
    let top_month = insights.top_month.map(month_name).unwrap_or("N/A");

    ui.group(|ui: &mut Ui| {
        ui.label(format!("• Trips are highest on {best} and lowest on {worst}."));
        ui.label("• There is a strong positive relationship between active vehicles and trips.");
        ui.label(format!("• {top_month} shows the highest demand."));
    });
}
