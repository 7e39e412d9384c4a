use std::fs;
use std::path::{Path, PathBuf};

use statplot::{
    compute_stats, load_table, render_histogram, render_series, AnalyzerError, CellValue,
    ColumnRef, HistogramOptions, SeriesOptions,
};
use tempfile::tempdir;

const TEMPERATURES: &str = "date,temperature\n2025-01-01,10\n2025-01-02,12\n2025-01-03,14\n";

fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn saved_file_is_non_empty(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

#[test]
fn load_preserves_shape() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);

    let table = load_table(&path, None).unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column_names(), vec!["date", "temperature"]);
}

#[test]
fn load_missing_file_is_not_found() {
    let dir = tempdir().unwrap();
    let err = load_table(&dir.path().join("missing.csv"), None).unwrap_err();
    assert!(matches!(err, AnalyzerError::NotFound(_)));
}

#[test]
fn load_pads_ragged_rows() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "ragged.csv", "a,b\n1\n2,3\n");

    let table = load_table(&path, None).unwrap();
    assert_eq!(table.row_count(), 2);
    let b = table.column("b").unwrap();
    assert_eq!(b.values[0], CellValue::Null);
    assert_eq!(b.values[1], CellValue::Integer(3));
}

#[test]
fn parse_dates_turns_garbage_into_null() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "dates.csv",
        "date,v\n2025-01-01,1\nnot-a-date,2\n2025-01-03,3\n",
    );

    let table = load_table(&path, Some(&["date"])).unwrap();
    let date = table.column("date").unwrap();
    assert!(matches!(date.values[0], CellValue::Date(_)));
    assert_eq!(date.values[1], CellValue::Null);
    assert!(matches!(date.values[2], CellValue::Date(_)));
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[test]
fn compute_stats_basic() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);
    let table = load_table(&path, None).unwrap();

    let stats = compute_stats(&table, &"temperature".into()).unwrap();
    assert_eq!(stats.mean, 12.0);
    assert_eq!(stats.min, 10.0);
    assert_eq!(stats.max, 14.0);
    // sample std of [10, 12, 14] is sqrt((4 + 0 + 4) / 2) = 2.0
    assert_eq!(stats.std, 2.0);
}

#[test]
fn compute_stats_rejects_text_only_column() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "text.csv", "name\nalpha\nbeta\n");
    let table = load_table(&path, None).unwrap();

    let err = compute_stats(&table, &"name".into()).unwrap_err();
    assert!(matches!(err, AnalyzerError::EmptyData));
}

#[test]
fn compute_stats_unknown_column() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);
    let table = load_table(&path, None).unwrap();

    let err = compute_stats(&table, &"pressure".into()).unwrap_err();
    assert!(matches!(err, AnalyzerError::UnknownColumn(_)));
}

#[test]
fn compute_stats_by_index_and_literal_values() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);
    let table = load_table(&path, None).unwrap();

    let by_index = compute_stats(&table, &ColumnRef::Index(1)).unwrap();
    assert_eq!(by_index.mean, 12.0);

    let literal = ColumnRef::Values(vec![
        CellValue::Integer(1),
        CellValue::String("skip".into()),
        CellValue::Integer(3),
    ]);
    let from_values = compute_stats(&table, &literal).unwrap();
    assert_eq!(from_values.mean, 2.0);
}

// ---------------------------------------------------------------------------
// Line-series renderer
// ---------------------------------------------------------------------------

#[test]
fn render_series_writes_file_with_time_axis() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);
    let table = load_table(&path, None).unwrap();

    let out = dir.path().join("plot.png");
    let saved = render_series(
        &table,
        &"temperature".into(),
        Some(&out),
        &SeriesOptions::default(),
    )
    .unwrap();
    assert_eq!(saved, out);
    assert!(saved_file_is_non_empty(&saved));
}

#[test]
fn render_series_index_axis_without_date_column() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "plain.csv", "value\n1\n2\n3\n");
    let table = load_table(&path, None).unwrap();

    let out = dir.path().join("plain.png");
    render_series(&table, &"value".into(), Some(&out), &SeriesOptions::default()).unwrap();
    assert!(saved_file_is_non_empty(&out));
}

#[test]
fn render_series_with_show_still_saves() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);
    let table = load_table(&path, None).unwrap();

    let out = dir.path().join("shown.png");
    let options = SeriesOptions {
        show: true,
        ..SeriesOptions::default()
    };
    render_series(&table, &"temperature".into(), Some(&out), &options).unwrap();
    assert!(saved_file_is_non_empty(&out));
}

#[test]
fn render_series_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);
    let table = load_table(&path, None).unwrap();

    let out = dir.path().join("nested").join("deep").join("plot.png");
    render_series(&table, &"temperature".into(), Some(&out), &SeriesOptions::default()).unwrap();
    assert!(saved_file_is_non_empty(&out));
}

#[test]
fn render_series_overlay_window_exceeding_length() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);
    let table = load_table(&path, None).unwrap();

    let out = dir.path().join("ma.png");
    let options = SeriesOptions {
        ma_window: Some(10),
        ..SeriesOptions::default()
    };
    render_series(&table, &"temperature".into(), Some(&out), &options).unwrap();
    assert!(saved_file_is_non_empty(&out));
}

#[test]
fn render_series_rejects_zero_window() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);
    let table = load_table(&path, None).unwrap();

    let out = dir.path().join("bad.png");
    let options = SeriesOptions {
        ma_window: Some(0),
        ..SeriesOptions::default()
    };
    let err =
        render_series(&table, &"temperature".into(), Some(&out), &options).unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidOption(_)));
    assert!(!out.exists());
}

#[test]
fn render_series_unknown_style_falls_back() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);
    let table = load_table(&path, None).unwrap();

    let out = dir.path().join("styled.png");
    let options = SeriesOptions {
        style: Some("neon".to_string()),
        ..SeriesOptions::default()
    };
    render_series(&table, &"temperature".into(), Some(&out), &options).unwrap();
    assert!(saved_file_is_non_empty(&out));
}

#[test]
fn render_series_with_gaps_in_data() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "gaps.csv",
        "value\n1\n\nnot numeric\n4\n5\n",
    );
    let table = load_table(&path, None).unwrap();

    let out = dir.path().join("gaps.png");
    render_series(&table, &"value".into(), Some(&out), &SeriesOptions::default()).unwrap();
    assert!(saved_file_is_non_empty(&out));
}

#[test]
fn render_series_all_missing_still_saves() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "words.csv", "word\nalpha\nbeta\n");
    let table = load_table(&path, None).unwrap();

    let out = dir.path().join("empty.png");
    render_series(&table, &"word".into(), Some(&out), &SeriesOptions::default()).unwrap();
    assert!(saved_file_is_non_empty(&out));
}

// ---------------------------------------------------------------------------
// Histogram renderer
// ---------------------------------------------------------------------------

#[test]
fn render_histogram_writes_file() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);
    let table = load_table(&path, None).unwrap();

    let out = dir.path().join("hist.png");
    let saved = render_histogram(
        &table,
        &"temperature".into(),
        5,
        Some(&out),
        &HistogramOptions::default(),
    )
    .unwrap();
    assert_eq!(saved, out);
    assert!(saved_file_is_non_empty(&saved));
}

#[test]
fn render_histogram_constant_column() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "flat.csv", "v\n3\n3\n3\n");
    let table = load_table(&path, None).unwrap();

    let out = dir.path().join("flat.png");
    render_histogram(&table, &"v".into(), 10, Some(&out), &HistogramOptions::default())
        .unwrap();
    assert!(saved_file_is_non_empty(&out));
}

#[test]
fn render_histogram_rejects_zero_bins() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "data.csv", TEMPERATURES);
    let table = load_table(&path, None).unwrap();

    let err = render_histogram(
        &table,
        &"temperature".into(),
        0,
        Some(&dir.path().join("zero.png")),
        &HistogramOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidOption(_)));
}

#[test]
fn render_histogram_all_missing_is_empty_data() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "words.csv", "word\nalpha\nbeta\n");
    let table = load_table(&path, None).unwrap();

    let err = render_histogram(
        &table,
        &"word".into(),
        20,
        Some(&dir.path().join("none.png")),
        &HistogramOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, AnalyzerError::EmptyData));
}
