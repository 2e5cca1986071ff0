/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │   Dataset    │  Vec<Penguin>, species index, mass range
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  species ∧ mass < threshold → FilteredView
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
