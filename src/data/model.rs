use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{AnalyzerError, Result};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as inferred from delimited text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// A calendar timestamp (date-only inputs resolve to midnight).
    Date(NaiveDateTime),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Coerce the cell to a floating-point number.
    ///
    /// Numeric strings parse, booleans map to 1/0, and everything else
    /// (dates, nulls, non-numeric text) yields `None`, the missing marker.
    /// NaN counts as missing too, so a literal "nan" in the input cannot
    /// poison downstream arithmetic.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => (!v.is_nan()).then_some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::String(s) => s.trim().parse::<f64>().ok().filter(|v| !v.is_nan()),
            CellValue::Date(_) | CellValue::Null => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Column – one named column of the table
// ---------------------------------------------------------------------------

/// A named ordered sequence of cell values.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table. All columns share one row count; the struct is
/// treated as immutable once the loader hands it out.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from loaded columns.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].len() == w[1].len()),
            "all columns must share one row count"
        );
        Table { columns }
    }

    /// Ordered column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Look up a column by position.
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Replace a column's values in place. Only the loader uses this, for
    /// the date-parsing transform applied before the table is handed out.
    pub(crate) fn replace_values(&mut self, name: &str, values: Vec<CellValue>) {
        if let Some(col) = self.columns.iter_mut().find(|c| c.name == name) {
            col.values = values;
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnRef – name, position, or a literal value sequence
// ---------------------------------------------------------------------------

/// Identifies the column an operation works on: by header name, by
/// positional index, or as an already-extracted value sequence.
#[derive(Debug, Clone)]
pub enum ColumnRef {
    Name(String),
    Index(usize),
    Values(Vec<CellValue>),
}

impl ColumnRef {
    /// Resolve the reference against a table, yielding the concrete cells.
    pub fn resolve<'a>(&'a self, table: &'a Table) -> Result<&'a [CellValue]> {
        match self {
            ColumnRef::Name(name) => table
                .column(name)
                .map(|c| c.values.as_slice())
                .ok_or_else(|| AnalyzerError::UnknownColumn(name.clone())),
            ColumnRef::Index(index) => table
                .column_at(*index)
                .map(|c| c.values.as_slice())
                .ok_or(AnalyzerError::ColumnIndexOutOfRange {
                    index: *index,
                    width: table.width(),
                }),
            ColumnRef::Values(values) => Ok(values.as_slice()),
        }
    }

    /// Human-readable name for axis labels and synthesized titles.
    pub fn display_name(&self, table: &Table) -> String {
        match self {
            ColumnRef::Name(name) => name.clone(),
            ColumnRef::Index(index) => table
                .column_at(*index)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("column {index}")),
            ColumnRef::Values(_) => "series".to_string(),
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Name(name)
    }
}

impl From<usize> for ColumnRef {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

impl From<Vec<CellValue>> for ColumnRef {
    fn from(values: Vec<CellValue>) -> Self {
        ColumnRef::Values(values)
    }
}
