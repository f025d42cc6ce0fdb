/// Data layer: core types, loading, filtering and export.
///
/// Architecture:
/// ```text
///        .csv
///          │
///          ▼
///   ┌──────────┐
///   │  loader  │  parse file → Dataset (typed columns)
///   └──────────┘
///          │
///          ▼
///   ┌───────────┐   ┌───────┐
///   │ selection │ + │ rules │  columns to keep, keyword filters
///   └───────────┘   └───────┘
///          │
///          ▼
///   ┌──────────┐
///   │  filter  │  project columns, narrow rows → FilteredDataset
///   └──────────┘
///          │
///          ▼
///   ┌──────────┐
///   │  export  │  resolve target, settle conflicts, write CSV
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod rules;
pub mod selection;
