/// Chart rendering: line series and histograms drawn to PNG files, plus the
/// per-call theme values that style them.

pub mod chart;
pub mod theme;

pub use chart::{
    render_histogram, render_series, HistogramOptions, SeriesOptions, DEFAULT_HIST_BINS,
};
pub use theme::Theme;
