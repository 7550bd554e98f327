/// Data layer: benchmark records, region selection and chart series.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │  Dataset  │────▶│  region    │  valid geocodes, group presets
///   └──────────┘      └───────────┘
///        │                  │
///        │                  ▼
///        │            ┌───────────┐
///        │            │ selection  │  immutable set of region codes
///        │            └───────────┘
///        ▼                  │
///   ┌──────────┐           │
///   │  filter   │◀──────────┘  selected ∧ score > 0
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  four label/value series, zeros dropped per kind
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  series → JSON
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod region;
pub mod selection;
pub mod series;
