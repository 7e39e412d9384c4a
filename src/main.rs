use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use statplot::{
    compute_stats, load_table, render_histogram, render_series, ColumnRef, HistogramOptions,
    SeriesOptions, DEFAULT_HIST_BINS,
};

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "statplot",
    about = "Load delimited data, compute column statistics, and render charts",
    version
)]
struct Cli {
    /// Path to the input CSV file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Column to analyze and plot
    #[arg(value_name = "COLUMN")]
    column: String,

    /// Output path for the line chart
    #[arg(short, long, default_value = "plot.png")]
    output: PathBuf,

    /// Open saved charts in the system image viewer
    #[arg(long)]
    show: bool,

    /// Moving-average window to overlay on the line chart
    #[arg(long, value_name = "N")]
    ma_window: Option<usize>,

    /// Title for the line chart
    #[arg(short, long)]
    title: Option<String>,

    /// Visual theme (default, dark, grayscale)
    #[arg(long, default_value = "default")]
    style: String,

    /// Also render a histogram of the column
    #[arg(long)]
    hist: bool,

    /// Number of histogram buckets
    #[arg(long, value_name = "N", default_value_t = DEFAULT_HIST_BINS)]
    hist_bins: usize,

    /// Output path for the histogram
    #[arg(long, default_value = "hist.png")]
    hist_output: PathBuf,
}

// One exit code per pipeline stage, so scripts can tell failures apart.
const EXIT_INPUT: u8 = 2;
const EXIT_STATS: u8 = 3;
const EXIT_PLOT: u8 = 4;
const EXIT_HIST: u8 = 5;

fn main() -> ExitCode {
    env_logger::init();
    run(Cli::parse())
}

fn run(args: Cli) -> ExitCode {
    let table = match load_table(&args.file, None) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("failed to load {}: {e}", args.file.display());
            return ExitCode::from(EXIT_INPUT);
        }
    };

    let column = ColumnRef::Name(args.column.clone());

    let stats = match compute_stats(&table, &column) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("failed to compute stats for column '{}': {e}", args.column);
            return ExitCode::from(EXIT_STATS);
        }
    };

    println!("Statistics:");
    for (name, value) in stats.fields() {
        println!("  {name}: {value}");
    }

    let series_options = SeriesOptions {
        title: args.title.clone(),
        show: args.show,
        ma_window: args.ma_window,
        style: Some(args.style.clone()),
    };
    match render_series(&table, &column, Some(&args.output), &series_options) {
        Ok(saved) => println!("Line plot saved to: {}", saved.display()),
        Err(e) => {
            eprintln!("failed to create line plot: {e}");
            return ExitCode::from(EXIT_PLOT);
        }
    }

    if args.hist {
        let hist_options = HistogramOptions {
            title: None,
            show: args.show,
            style: Some(args.style.clone()),
        };
        match render_histogram(
            &table,
            &column,
            args.hist_bins,
            Some(&args.hist_output),
            &hist_options,
        ) {
            Ok(saved) => println!("Histogram saved to: {}", saved.display()),
            Err(e) => {
                eprintln!("failed to create histogram: {e}");
                return ExitCode::from(EXIT_HIST);
            }
        }
    }

    ExitCode::SUCCESS
}
