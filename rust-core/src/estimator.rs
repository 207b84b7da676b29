//! Alpha peak estimation pipeline
//!
//! samples -> magnitude spectrum -> band restriction -> moving average ->
//! cubic spline -> argmax. Each stage fails fast and the first error is
//! returned unchanged.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::band::BandWindow;
use crate::error::{AlphaError, Result};
use crate::peak::find_peak;
use crate::smoothing::{Curve, Smoother, DEFAULT_INTERIOR_KNOTS, DEFAULT_WINDOW_SIZE};
use crate::spectrum::{SpectrumAnalyzer, WindowType};

/// Sampling rate of the recordings the tool was built for
pub const DEFAULT_SAMPLE_RATE: f64 = 250.0;

/// Estimator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Band searched for the peak
    pub band: BandWindow,

    /// Moving-average window, in spectral bins
    pub window_size: usize,

    /// Interior knots of the smoothing spline
    pub interior_knots: usize,

    /// Window applied before the FFT
    pub spectral_window: WindowType,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            band: BandWindow::default(),
            window_size: DEFAULT_WINDOW_SIZE,
            interior_knots: DEFAULT_INTERIOR_KNOTS,
            spectral_window: WindowType::default(),
        }
    }
}

impl EstimatorConfig {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: EstimatorConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(AlphaError::invalid_input(format!(
                "sampling rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.window_size == 0 {
            return Err(AlphaError::invalid_input(
                "moving-average window must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Result of one estimation run
#[derive(Debug, Clone)]
pub struct PeakEstimate {
    /// Frequency of maximal smoothed energy, in Hz
    pub peak_hz: f64,

    /// Band that was searched
    pub band: BandWindow,

    /// Moving-averaged band spectrum (diagnostic overlay)
    pub averaged: Curve,

    /// Spline-smoothed band spectrum
    pub smoothed: Curve,
}

impl PeakEstimate {
    /// Human-readable summary, peak rounded to two decimals
    pub fn label(&self) -> String {
        format!("Alpha peak: {:.2} Hz", self.peak_hz)
    }
}

/// Alpha peak estimator
///
/// Immutable after construction; every call to [`estimate`](Self::estimate)
/// is independent.
#[derive(Debug, Clone)]
pub struct AlphaPeakEstimator {
    analyzer: SpectrumAnalyzer,
    band: BandWindow,
    smoother: Smoother,
}

impl AlphaPeakEstimator {
    pub fn new(config: &EstimatorConfig) -> Result<Self> {
        config.validate()?;

        let analyzer = SpectrumAnalyzer::new(config.sample_rate, config.spectral_window)?;
        if config.band.max_freq() > analyzer.nyquist() {
            warn!(
                "band upper edge {} Hz is above Nyquist ({} Hz)",
                config.band.max_freq(),
                analyzer.nyquist()
            );
        }

        Ok(Self {
            analyzer,
            band: config.band,
            smoother: Smoother::new(config.window_size, config.interior_knots),
        })
    }

    pub fn band(&self) -> BandWindow {
        self.band
    }

    pub fn smoother(&self) -> Smoother {
        self.smoother
    }

    pub fn sample_rate(&self) -> f64 {
        self.analyzer.sample_rate()
    }

    /// Run the full pipeline on one channel
    pub fn estimate(&self, samples: &[f64]) -> Result<PeakEstimate> {
        debug!("estimating alpha peak over {} samples", samples.len());

        let spectrum = self.analyzer.analyze(samples)?;
        let band_spectrum = spectrum.restrict(&self.band)?;
        let smoothed = self.smoother.smooth(&band_spectrum)?;
        let peak_hz = find_peak(&smoothed.smoothed)?;

        info!(
            "alpha peak at {:.2} Hz (band {}-{} Hz)",
            peak_hz,
            self.band.min_freq(),
            self.band.max_freq()
        );

        Ok(PeakEstimate {
            peak_hz,
            band: self.band,
            averaged: smoothed.averaged,
            smoothed: smoothed.smoothed,
        })
    }
}
