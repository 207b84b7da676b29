//! alpha-detect - estimate the alpha peak of one EEG channel
//!
//! Reads `channel-N` from a CSV recording, prints the peak frequency and
//! writes `<recording stem>.svg` with the smoothed spectrum.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use alpha_peak::render::{plot_path, render_estimate, title_for, Figure};
use alpha_peak::{io, AlphaPeakEstimator, BandWindow, EstimatorConfig, WindowType};

/// Alpha peak detector for single-channel EEG recordings
#[derive(Parser, Debug)]
#[command(name = "alpha-detect")]
#[command(version, about, long_about = None)]
struct Cli {
    /// CSV recording with `channel-N` columns
    #[arg(long)]
    path: PathBuf,

    /// Channel index to analyze
    #[arg(long, default_value_t = 0)]
    channel: usize,

    /// Lower band edge in Hz, excluded [default: 5]
    #[arg(long)]
    min_freq: Option<f64>,

    /// Upper band edge in Hz, excluded [default: 40]
    #[arg(long)]
    max_freq: Option<f64>,

    /// Sample rate in Hz [default: 250]
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Moving-average window in spectral bins [default: 30]
    #[arg(long)]
    window_size: Option<usize>,

    /// Interior knots of the smoothing spline [default: 30]
    #[arg(long)]
    interior_knots: Option<usize>,

    /// Window applied before the FFT: rectangular, hann, hamming, blackman
    #[arg(long)]
    spectral_window: Option<WindowType>,

    /// JSON file with estimator settings; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the plot
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Skip writing the plot
    #[arg(long)]
    no_plot: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn estimator_config(&self) -> Result<EstimatorConfig> {
        let mut config = match &self.config {
            Some(path) => EstimatorConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => EstimatorConfig::default(),
        };

        if self.min_freq.is_some() || self.max_freq.is_some() {
            config.band = BandWindow::new(
                self.min_freq.unwrap_or(config.band.min_freq()),
                self.max_freq.unwrap_or(config.band.max_freq()),
            )?;
        }
        if let Some(rate) = self.sample_rate {
            config.sample_rate = rate;
        }
        if let Some(window) = self.window_size {
            config.window_size = window;
        }
        if let Some(knots) = self.interior_knots {
            config.interior_knots = knots;
        }
        if let Some(window) = self.spectral_window {
            config.spectral_window = window;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = cli.estimator_config()?;
    info!(
        "analyzing {} channel {} at {} Hz",
        cli.path.display(),
        cli.channel,
        config.sample_rate
    );

    let samples = io::read_channel(&cli.path, cli.channel)
        .with_context(|| format!("reading {}", cli.path.display()))?;

    let estimator = AlphaPeakEstimator::new(&config)?;
    let estimate = estimator
        .estimate(&samples)
        .with_context(|| format!("estimating alpha peak of {}", cli.path.display()))?;

    println!("{}", estimate.label());

    if !cli.no_plot {
        let title = title_for(&cli.path);
        let mut figure = Figure::default();
        render_estimate(&mut figure, &estimate, &title);

        let out = plot_path(&cli.output_dir, &title);
        figure
            .save(&out)
            .with_context(|| format!("writing plot {}", out.display()))?;
        info!("plot saved to {}", out.display());
    }

    Ok(())
}
