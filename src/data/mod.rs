/// Data layer: the table model and the delimited-text loader.
///
/// Architecture:
/// ```text
///     .csv
///       │
///       ▼
///  ┌──────────┐
///  │  loader   │  parse file → Table, optional date re-parse
///  └──────────┘
///       │
///       ▼
///  ┌──────────┐
///  │  Table    │  Vec<Column>, ColumnRef dispatch
///  └──────────┘
///       │
///       ├──────────────► stats   (numeric series, summary statistics)
///       └──────────────► render  (line chart / histogram)
/// ```

pub mod loader;
pub mod model;
