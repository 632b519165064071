/// Data layer: source rows, cleaning, and the derived tables.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → Vec<RawListing>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ prepare   │  dedupe, parsers + label + industry → CleanedListing
///   └──────────┘
///        │
///        ├──────────────► FeatureTable + labels  (classifier)
///        ▼
///   ┌───────────┐
///   │ reference  │  company/title → ratings, reviews, post age
///   └───────────┘
/// ```

pub mod industry;
pub mod label;
pub mod loader;
pub mod model;
pub mod parsers;
pub mod prepare;
pub mod reference;
