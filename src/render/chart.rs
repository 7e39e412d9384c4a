use std::ops::Range;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::DateTime;
use plotters::prelude::*;

use super::theme::Theme;
use crate::data::loader::cell_to_datetime;
use crate::data::model::{ColumnRef, Table};
use crate::error::{AnalyzerError, Result};
use crate::stats::{moving_average, numeric_series};

// ---------------------------------------------------------------------------
// Options and defaults
// ---------------------------------------------------------------------------

const CHART_SIZE: (u32, u32) = (960, 540);
const DEFAULT_SERIES_PATH: &str = "plot.png";
const DEFAULT_HISTOGRAM_PATH: &str = "hist.png";

/// Default bucket count for histograms.
pub const DEFAULT_HIST_BINS: usize = 20;

/// Columns probed (in this order) for a time x-axis.
const TIME_COLUMN_CANDIDATES: [&str; 6] =
    ["date", "time", "timestamp", "Date", "Time", "Timestamp"];

/// Options for [`render_series`].
#[derive(Debug, Clone, Default)]
pub struct SeriesOptions {
    /// Chart title; defaults to `Series: <column>`.
    pub title: Option<String>,
    /// Also open the saved file in the platform image viewer (best-effort).
    pub show: bool,
    /// Overlay a trailing moving average with this window.
    pub ma_window: Option<usize>,
    /// Named theme; unknown names fall back to the default theme.
    pub style: Option<String>,
}

/// Options for [`render_histogram`].
#[derive(Debug, Clone, Default)]
pub struct HistogramOptions {
    /// Chart title; defaults to `Histogram: <column>`.
    pub title: Option<String>,
    pub show: bool,
    pub style: Option<String>,
}

// ---------------------------------------------------------------------------
// Line-series renderer
// ---------------------------------------------------------------------------

/// Render a column as a connected line with point markers and save it as a
/// PNG at `output` (default `plot.png`).
///
/// Rows whose x or y value is missing split the line into segments; gaps
/// are never bridged. When a `date`/`time`/`timestamp` column parses, it
/// becomes the x-axis, otherwise the row index does.
pub fn render_series(
    table: &Table,
    column: &ColumnRef,
    output: Option<&Path>,
    options: &SeriesOptions,
) -> Result<PathBuf> {
    if options.ma_window == Some(0) {
        return Err(AnalyzerError::InvalidOption(
            "moving average window must be at least 1".to_string(),
        ));
    }

    let series = numeric_series(table, column)?;
    let overlay = options
        .ma_window
        .map(|w| (w, moving_average(&series, w)));
    let theme = Theme::resolve(options.style.as_deref());

    let label = column.display_name(table);
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| format!("Series: {label}"));

    let x_axis = select_x_axis(table, series.len());
    let out = resolve_output(output, DEFAULT_SERIES_PATH)?;

    draw_series_chart(
        &out,
        &series,
        overlay.as_ref().map(|(w, ma)| (*w, ma.as_slice())),
        &x_axis,
        &label,
        &title,
        &theme,
    )
    .map_err(|e| AnalyzerError::Render(e.to_string()))?;

    log::info!("line chart saved to {}", out.display());
    if options.show {
        try_display(&out);
    }
    Ok(out)
}

/// Per-row x positions plus axis metadata. Timestamps are carried as epoch
/// seconds so the drawing path is shared with the index axis; tick labels
/// are formatted back into dates.
struct XAxis {
    positions: Vec<Option<f64>>,
    label: &'static str,
    time: bool,
}

/// Probe the table for a usable time column; fall back to the row index.
fn select_x_axis(table: &Table, rows: usize) -> XAxis {
    for candidate in TIME_COLUMN_CANDIDATES {
        let Some(col) = table.column(candidate) else {
            continue;
        };
        if col.len() != rows {
            continue;
        }
        let parsed: Vec<Option<f64>> = col
            .values
            .iter()
            .map(|c| cell_to_datetime(c).map(|dt| dt.and_utc().timestamp() as f64))
            .collect();
        if parsed.iter().any(Option::is_some) {
            return XAxis {
                positions: parsed,
                label: "Time",
                time: true,
            };
        }
    }
    XAxis {
        positions: (0..rows).map(|i| Some(i as f64)).collect(),
        label: "Index",
        time: false,
    }
}

fn draw_series_chart(
    out: &Path,
    series: &[Option<f64>],
    overlay: Option<(usize, &[Option<f64>])>,
    x_axis: &XAxis,
    label: &str,
    title: &str,
    theme: &Theme,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(out, CHART_SIZE).into_drawing_area();
    root.fill(&theme.background)?;

    let points = paired_points(&x_axis.positions, series);
    let overlay_points = overlay.map(|(w, ma)| (w, paired_points(&x_axis.positions, ma)));

    let (x_range, y_range) = axis_ranges(
        &points,
        overlay_points.as_ref().map(|(_, p)| p.as_slice()),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28).into_font().color(&theme.foreground))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(52)
        .build_cartesian_2d(x_range, y_range)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(x_axis.label)
        .y_desc(label)
        .axis_style(theme.foreground)
        .label_style(("sans-serif", 13).into_font().color(&theme.foreground))
        .bold_line_style(theme.grid.mix(0.25))
        .light_line_style(theme.grid.mix(0.1));
    if x_axis.time {
        mesh.x_label_formatter(&format_timestamp);
    }
    mesh.draw()?;

    let series_color = theme.series;
    let mut labeled = false;
    for segment in segments(&points) {
        let anno = chart.draw_series(LineSeries::new(
            segment.clone(),
            series_color.stroke_width(2),
        ))?;
        if !labeled {
            anno.label(label.to_string()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], series_color.stroke_width(2))
            });
            labeled = true;
        }
        chart.draw_series(
            segment
                .into_iter()
                .map(|p| Circle::new(p, 3, series_color.filled())),
        )?;
    }

    if let Some((window, opoints)) = overlay_points {
        let overlay_color = theme.overlay;
        let mut overlay_labeled = false;
        for segment in segments(&opoints) {
            let anno = chart.draw_series(LineSeries::new(
                segment,
                overlay_color.stroke_width(3),
            ))?;
            if !overlay_labeled {
                anno.label(format!("moving avg ({window})")).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], overlay_color.stroke_width(3))
                });
                overlay_labeled = true;
                labeled = true;
            }
        }
    }

    if labeled {
        chart
            .configure_series_labels()
            .background_style(theme.background.mix(0.8))
            .border_style(theme.foreground)
            .label_font(("sans-serif", 13).into_font().color(&theme.foreground))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Histogram renderer
// ---------------------------------------------------------------------------

/// Render a histogram of a column's numeric values (missing values dropped)
/// and save it as a PNG at `output` (default `hist.png`).
pub fn render_histogram(
    table: &Table,
    column: &ColumnRef,
    bins: usize,
    output: Option<&Path>,
    options: &HistogramOptions,
) -> Result<PathBuf> {
    if bins == 0 {
        return Err(AnalyzerError::InvalidOption(
            "histogram needs at least one bin".to_string(),
        ));
    }

    let values: Vec<f64> = numeric_series(table, column)?
        .into_iter()
        .flatten()
        .collect();
    if values.is_empty() {
        return Err(AnalyzerError::EmptyData);
    }

    let theme = Theme::resolve(options.style.as_deref());
    let label = column.display_name(table);
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| format!("Histogram: {label}"));

    let out = resolve_output(output, DEFAULT_HISTOGRAM_PATH)?;

    draw_histogram_chart(&out, &values, bins, &label, &title, &theme)
        .map_err(|e| AnalyzerError::Render(e.to_string()))?;

    log::info!("histogram saved to {}", out.display());
    if options.show {
        try_display(&out);
    }
    Ok(out)
}

fn draw_histogram_chart(
    out: &Path,
    values: &[f64],
    bins: usize,
    label: &str,
    title: &str,
    theme: &Theme,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        // A constant column still gets one visible bar.
        min -= 0.5;
        max += 0.5;
    }
    let bin_width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let index = ((v - min) / bin_width).floor() as usize;
        // Values at the upper edge land in the last bin.
        counts[index.min(bins - 1)] += 1;
    }
    let max_count = counts.iter().copied().max().unwrap_or(0) as f64;

    let root = BitMapBackend::new(out, CHART_SIZE).into_drawing_area();
    root.fill(&theme.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28).into_font().color(&theme.foreground))
        .margin(12)
        .x_label_area_size(42)
        .y_label_area_size(52)
        .build_cartesian_2d(min..max, 0.0..max_count * 1.1)?;

    chart
        .configure_mesh()
        .x_desc(label)
        .y_desc("Count")
        .axis_style(theme.foreground)
        .label_style(("sans-serif", 13).into_font().color(&theme.foreground))
        .bold_line_style(theme.grid.mix(0.25))
        .light_line_style(theme.grid.mix(0.1))
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let x0 = min + i as f64 * bin_width;
        let x1 = min + (i + 1) as f64 * bin_width;
        Rectangle::new([(x0, 0.0), (x1, count as f64)], theme.series.filled())
    }))?;

    root.present()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Pair x positions with y values; a row is plottable only when both exist.
fn paired_points(xs: &[Option<f64>], ys: &[Option<f64>]) -> Vec<Option<(f64, f64)>> {
    xs.iter().zip(ys).map(|(x, y)| x.zip(*y)).collect()
}

/// Split the per-row points into runs of consecutive plottable points.
fn segments(points: &[Option<(f64, f64)>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for p in points {
        match p {
            Some(pt) => current.push(*pt),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Padded axis ranges over all plottable points (series plus overlay).
/// A series with nothing to plot still gets a drawable unit range.
fn axis_ranges(
    points: &[Option<(f64, f64)>],
    overlay: Option<&[Option<(f64, f64)>]>,
) -> (Range<f64>, Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    let all = points.iter().chain(overlay.into_iter().flatten());
    for (x, y) in all.copied().flatten() {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !x_min.is_finite() {
        return (0.0..1.0, 0.0..1.0);
    }

    let mut x_pad = (x_max - x_min) * 0.05;
    if x_pad == 0.0 {
        x_pad = 0.5;
    }
    let mut y_pad = (y_max - y_min) * 0.05;
    if y_pad == 0.0 {
        y_pad = 0.5;
    }
    (
        (x_min - x_pad)..(x_max + x_pad),
        (y_min - y_pad)..(y_max + y_pad),
    )
}

/// Format an epoch-second tick position as a calendar date.
fn format_timestamp(v: &f64) -> String {
    DateTime::from_timestamp(*v as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| format!("{v:.0}"))
}

/// Resolve the output path and make sure its parent directory exists.
fn resolve_output(output: Option<&Path>, default: &str) -> Result<PathBuf> {
    let out = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default));
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(out)
}

/// Best-effort: open the saved image in the platform viewer. Failures are
/// logged and swallowed; the saved file is already on disk either way.
fn try_display(path: &Path) {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = Command::new("open");
        c.arg(path);
        c
    };
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]).arg(path);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut c = Command::new("xdg-open");
        c.arg(path);
        c
    };

    match command.spawn() {
        Ok(_) => log::debug!("opened image viewer for {}", path.display()),
        Err(e) => log::warn!("could not open image viewer for {}: {e}", path.display()),
    }
}
