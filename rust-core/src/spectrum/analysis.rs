//! Spectral estimator
//!
//! Combines the FFT engine with windowing to produce the one-sided magnitude
//! spectrum of a whole recording.

use log::debug;

use super::fft::FftEngine;
use super::windowing::{apply_window, WindowType};
use crate::band::BandWindow;
use crate::error::{AlphaError, Result};

/// One-sided magnitude spectrum
///
/// `frequencies` is strictly ascending and aligned with `magnitudes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Build a spectrum from aligned sequences
    pub fn new(frequencies: Vec<f64>, magnitudes: Vec<f64>) -> Result<Self> {
        if frequencies.len() != magnitudes.len() {
            return Err(AlphaError::invalid_input(format!(
                "{} frequency bins but {} magnitudes",
                frequencies.len(),
                magnitudes.len()
            )));
        }
        if frequencies.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AlphaError::invalid_input(
                "spectrum frequencies must be strictly ascending",
            ));
        }

        Ok(Self {
            frequencies,
            magnitudes,
        })
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Restrict to the bins strictly inside `band`
    ///
    /// Bins equal to either edge are excluded. Fails with `EmptyBand` when no
    /// bin remains.
    pub fn restrict(&self, band: &BandWindow) -> Result<Spectrum> {
        let (frequencies, magnitudes): (Vec<f64>, Vec<f64>) = self
            .frequencies
            .iter()
            .zip(self.magnitudes.iter())
            .filter(|(&f, _)| band.contains(f))
            .map(|(&f, &m)| (f, m))
            .unzip();

        if frequencies.is_empty() {
            return Err(AlphaError::EmptyBand {
                min_freq: band.min_freq(),
                max_freq: band.max_freq(),
            });
        }

        debug!(
            "band ({}, {}) Hz keeps {} of {} bins",
            band.min_freq(),
            band.max_freq(),
            frequencies.len(),
            self.len()
        );

        Ok(Spectrum {
            frequencies,
            magnitudes,
        })
    }
}

/// Spectral estimator for single-channel recordings
#[derive(Debug, Clone, Copy)]
pub struct SpectrumAnalyzer {
    sample_rate: f64,
    window_type: WindowType,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz, positive and finite
    /// * `window_type` - Window applied before the transform
    pub fn new(sample_rate: f64, window_type: WindowType) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(AlphaError::invalid_input(format!(
                "sampling rate must be positive, got {sample_rate}"
            )));
        }

        Ok(Self {
            sample_rate,
            window_type,
        })
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    /// Nyquist frequency in Hz
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Analyze signal and return the magnitude spectrum
    ///
    /// Magnitudes are `|X[k]|` divided by the sum of the window coefficients,
    /// so a unit-amplitude sinusoid on a bin reads 0.5 with the rectangular
    /// window.
    pub fn analyze(&self, signal: &[f64]) -> Result<Spectrum> {
        if signal.is_empty() {
            return Err(AlphaError::invalid_input("sample sequence is empty"));
        }
        if let Some(i) = signal.iter().position(|s| !s.is_finite()) {
            return Err(AlphaError::invalid_input(format!(
                "sample {i} is not a finite number"
            )));
        }

        let (windowed, gain) = apply_window(signal, self.window_type);
        if gain <= 0.0 {
            return Err(AlphaError::invalid_input(format!(
                "{} window of length {} has zero gain",
                self.window_type,
                signal.len()
            )));
        }

        let engine = FftEngine::new(signal.len())?;
        let magnitudes = engine
            .compute_magnitude(&windowed)?
            .into_iter()
            .map(|m| m / gain)
            .collect();
        let frequencies = engine.frequency_axis_hz(self.sample_rate);

        debug!(
            "magnitude spectrum: {} samples -> {} bins ({} window, {} Hz)",
            signal.len(),
            engine.num_bins(),
            self.window_type,
            self.sample_rate
        );

        Ok(Spectrum {
            frequencies,
            magnitudes,
        })
    }
}
