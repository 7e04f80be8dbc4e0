use crate::analysis::view::{build_view, ViewModel};
use crate::color::ColorMap;
use crate::data::filter::FilterSelection;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded once and never mutated; everything derived from it
/// lives in `view` and is rebuilt on every selection change.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<Dataset>,

    /// Sidebar month / base selections.
    pub selection: FilterSelection,

    /// Base chosen for the base-performance chart.
    pub selected_base: Option<String>,

    /// Output of the last pipeline run (cached between interactions).
    pub view: Option<ViewModel>,

    /// Colour per base code, stable across charts.
    pub base_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset: select everything, pick the first base
    /// for the base chart, and run the pipeline once.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selection = FilterSelection::all_of(&dataset);
        self.selected_base = dataset.bases.first().cloned();
        self.base_colors = ColorMap::new(dataset.bases.iter().cloned());
        self.dataset = Some(dataset);
        self.status_message = None;
        self.rebuild_view();
    }

    /// Re-run the whole pipeline against the current selection.
    pub fn rebuild_view(&mut self) {
        self.view = self.dataset.as_ref().map(|ds| {
            build_view(ds, &self.selection, self.selected_base.as_deref())
        });
    }

    /// Toggle one month in the filter.
    pub fn toggle_month(&mut self, month: u32) {
        if !self.selection.months.remove(&month) {
            self.selection.months.insert(month);
        }
        self.rebuild_view();
    }

    /// Toggle one base in the filter.
    pub fn toggle_base(&mut self, base: &str) {
        if !self.selection.bases.remove(base) {
            self.selection.bases.insert(base.to_string());
        }
        self.rebuild_view();
    }

    /// Select every month and base present in the dataset.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection = FilterSelection::all_of(ds);
        }
        self.rebuild_view();
    }

    /// Clear the whole selection (the view becomes empty, not an error).
    pub fn select_none(&mut self) {
        self.selection = FilterSelection::default();
        self.rebuild_view();
    }

    /// Change the base analysed in the base-performance chart.
    pub fn set_selected_base(&mut self, base: String) {
        self.selected_base = Some(base);
        self.rebuild_view();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::TripRecord;

    fn dataset() -> Dataset {
        let rec = |date: &str, base: &str| TripRecord {
            date: date.parse().unwrap(),
            base: base.to_string(),
            active_vehicles: 10,
            trips: 100,
        };
        Dataset::from_records(vec![
            rec("2015-01-01", "B02512"),
            rec("2015-02-01", "B02598"),
        ])
    }

    #[test]
    fn loading_selects_everything_and_builds_a_view() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        assert_eq!(state.selection.months.len(), 2);
        assert_eq!(state.selection.bases.len(), 2);
        assert_eq!(state.selected_base.as_deref(), Some("B02512"));
        assert_eq!(state.view.as_ref().unwrap().kpis.total_trips, 200);
    }

    #[test]
    fn toggling_a_month_rebuilds_the_view() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.toggle_month(2);
        assert_eq!(state.view.as_ref().unwrap().kpis.total_trips, 100);

        state.toggle_month(2);
        assert_eq!(state.view.as_ref().unwrap().kpis.total_trips, 200);
    }

    #[test]
    fn select_none_gives_an_empty_view() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.select_none();

        let view = state.view.as_ref().unwrap();
        assert_eq!(view.kpis.total_trips, 0);
        assert!(view.daily.is_empty());
    }
}
