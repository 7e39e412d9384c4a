//! statplot: load delimited data, compute column statistics, render charts.
//!
//! The crate is three small layers. The loader parses a CSV file into a
//! [`Table`] of dynamically-typed columns. The statistics engine coerces one
//! column to a numeric series (non-numeric values degrade to missing, never
//! to an error) and summarizes it. The renderer draws that column as a line
//! chart, optionally with a trailing moving-average overlay, or a histogram,
//! written to a PNG file.
//!
//! ```no_run
//! use statplot::{compute_stats, load_table, render_series, SeriesOptions};
//!
//! let table = load_table("data.csv".as_ref(), None)?;
//! let stats = compute_stats(&table, &"temperature".into())?;
//! println!("mean = {}", stats.mean);
//! render_series(&table, &"temperature".into(), None, &SeriesOptions::default())?;
//! # Ok::<(), statplot::AnalyzerError>(())
//! ```

pub mod data;
pub mod error;
pub mod render;
pub mod stats;

pub use data::loader::load_table;
pub use data::model::{CellValue, Column, ColumnRef, Table};
pub use error::{AnalyzerError, Result};
pub use render::{
    render_histogram, render_series, HistogramOptions, SeriesOptions, Theme, DEFAULT_HIST_BINS,
};
pub use stats::{compute_stats, moving_average, numeric_series, Stats};
