use crate::data::model::{ColumnRef, Table};
use crate::error::{AnalyzerError, Result};

// ---------------------------------------------------------------------------
// Numeric series extraction
// ---------------------------------------------------------------------------

/// Resolve a column reference and coerce every cell to a float.
///
/// Non-coercible values become `None`; the result always has the same
/// length and order as the source column.
pub fn numeric_series(table: &Table, column: &ColumnRef) -> Result<Vec<Option<f64>>> {
    let cells = column.resolve(table)?;
    Ok(cells.iter().map(|c| c.to_f64()).collect())
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Summary statistics of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation (divisor n−1); exactly 0.0 for one value.
    pub std: f64,
}

impl Stats {
    /// The statistics as ordered name/value pairs, for printing.
    pub fn fields(&self) -> [(&'static str, f64); 4] {
        [
            ("mean", self.mean),
            ("min", self.min),
            ("max", self.max),
            ("std", self.std),
        ]
    }
}

/// Compute mean, min, max, and sample standard deviation over the column's
/// numeric values, missing entries excluded.
pub fn compute_stats(table: &Table, column: &ColumnRef) -> Result<Stats> {
    let values: Vec<f64> = numeric_series(table, column)?
        .into_iter()
        .flatten()
        .collect();

    if values.is_empty() {
        return Err(AnalyzerError::EmptyData);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let std = if values.len() > 1 {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    } else {
        0.0
    };

    Ok(Stats {
        mean,
        min,
        max,
        std,
    })
}

// ---------------------------------------------------------------------------
// Moving average
// ---------------------------------------------------------------------------

/// Trailing moving average over the last `window` points, with a minimum
/// period of 1 so the result is defined from the first element on. A window
/// holding only missing values yields `None` at that position.
pub fn moving_average(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    debug_assert!(window >= 1, "window must be at least 1");
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let mut sum = 0.0;
            let mut count = 0usize;
            for v in values[start..=i].iter().flatten() {
                sum += v;
                count += 1;
            }
            (count > 0).then(|| sum / count as f64)
        })
        .collect()
}
