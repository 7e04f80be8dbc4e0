/// Analytics layer: the pure pipeline behind the dashboard.
///
/// Every function here is a synchronous reduction over `(dataset, indices)`;
/// the UI only ever calls [`view::build_view`], which re-runs the whole
/// pipeline on each interaction. No incremental recomputation is attempted,
/// the dataset is small enough that a full pass is cheap.

pub mod aggregate;
pub mod forecast;
pub mod insight;
pub mod view;
