use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use super::model::{CellValue, Column, Table};
use crate::error::{AnalyzerError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a delimited text file into a [`Table`].
///
/// The first row is taken as column headers, every following row as data.
/// Cell types are inferred per value (integer, float, bool, string; empty
/// fields become null). Short rows are padded with nulls and long rows
/// truncated to the header width.
///
/// `parse_dates` names columns to re-parse as calendar timestamps after
/// load; values that do not parse become null rather than failing.
pub fn load_table(path: &Path, parse_dates: Option<&[&str]>) -> Result<Table> {
    if !path.exists() {
        return Err(AnalyzerError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let width = headers.len();

    let mut columns: Vec<Vec<CellValue>> = vec![Vec::new(); width];
    for result in reader.records() {
        let record = result?;
        for (i, column) in columns.iter_mut().enumerate() {
            match record.get(i) {
                Some(field) => column.push(infer_cell(field)),
                None => column.push(CellValue::Null),
            }
        }
    }

    let mut table = Table::from_columns(
        headers
            .into_iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name, values))
            .collect(),
    );

    if let Some(date_columns) = parse_dates {
        for name in date_columns {
            apply_date_parse(&mut table, name);
        }
    }

    log::debug!(
        "loaded {} rows x {} columns from {}",
        table.row_count(),
        table.width(),
        path.display()
    );

    Ok(table)
}

// ---------------------------------------------------------------------------
// Cell type inference
// ---------------------------------------------------------------------------

/// Infer the type of one raw field.
fn infer_cell(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

/// Parse a timestamp from text, trying datetime forms first and date-only
/// forms (resolved to midnight) after.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Interpret a loaded cell as a timestamp, if it can be one.
pub fn cell_to_datetime(cell: &CellValue) -> Option<NaiveDateTime> {
    match cell {
        CellValue::Date(dt) => Some(*dt),
        CellValue::String(s) => parse_datetime(s),
        _ => None,
    }
}

/// Re-parse one column's values as timestamps; unparseable cells go null.
fn apply_date_parse(table: &mut Table, name: &str) {
    let Some(column) = table.column(name) else {
        log::warn!("date column '{name}' not found, skipping");
        return;
    };
    let reparsed: Vec<CellValue> = column
        .values
        .iter()
        .map(|cell| match cell_to_datetime(cell) {
            Some(dt) => CellValue::Date(dt),
            None => CellValue::Null,
        })
        .collect();
    table.replace_values(name, reparsed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_the_usual_shapes() {
        assert_eq!(infer_cell("42"), CellValue::Integer(42));
        assert_eq!(infer_cell("4.5"), CellValue::Float(4.5));
        assert_eq!(infer_cell("true"), CellValue::Bool(true));
        assert_eq!(infer_cell(""), CellValue::Null);
        assert_eq!(infer_cell("hello"), CellValue::String("hello".into()));
    }

    #[test]
    fn datetime_formats_ladder() {
        assert!(parse_datetime("2025-01-02 03:04:05").is_some());
        assert!(parse_datetime("2025-01-02T03:04:05").is_some());
        assert!(parse_datetime("2025-01-02").is_some());
        assert!(parse_datetime("2025/01/02").is_some());
        assert!(parse_datetime("01/02/2025").is_some());
        assert!(parse_datetime("not a date").is_none());
    }

    #[test]
    fn date_only_resolves_to_midnight() {
        let dt = parse_datetime("2025-06-01").unwrap();
        assert_eq!(dt.time(), NaiveTime::MIN);
    }
}
