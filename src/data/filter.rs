use std::collections::BTreeSet;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter predicate: which months / bases are selected
// ---------------------------------------------------------------------------

/// The sidebar selection: which months and which dispatching bases to keep.
///
/// A record passes when its month AND its base are both selected. Empty sets
/// are legal and simply match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    /// Selected month numbers (1–12).
    pub months: BTreeSet<u32>,
    /// Selected dispatching base codes.
    pub bases: BTreeSet<String>,
}

impl FilterSelection {
    /// Select everything present in the dataset (the default after a load).
    pub fn all_of(dataset: &Dataset) -> Self {
        FilterSelection {
            months: dataset.months.iter().copied().collect(),
            bases: dataset.bases.iter().cloned().collect(),
        }
    }
}

/// Return indices of records that pass the current selection, in the
/// dataset's original order.
///
/// Pure and total: selected values not present in the dataset are harmless,
/// and an empty selection yields an empty view rather than an error.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            selection.months.contains(&rec.month()) && selection.bases.contains(&rec.base)
        })
        .map(|(i, _)| i)
        .collect()
}
