/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  Uber FOIL .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<TripRecord>, distinct months / bases
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  month ∧ base predicate → filtered indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
