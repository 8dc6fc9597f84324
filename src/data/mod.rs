/// Data layer: table model, CSV loading, column classification and filtering.
///
/// Architecture:
/// ```text
///        .csv
///          │
///          ▼
///   ┌──────────┐
///   │  loader  │  parse + infer column types → Table
///   └──────────┘
///          │
///          ▼
///   ┌──────────┐
///   │ classify │  (dtype, distinct count) → categorical / temporal / continuous
///   └──────────┘
///          │
///          ▼
///   ┌──────────┐
///   │  filter  │  one control per column, AND-combined → visible row indices
///   └──────────┘
/// ```

pub mod classify;
pub mod filter;
pub mod loader;
pub mod model;
