//! FFT engine using realfft for real-valued signals
//!
//! The transform length always equals the signal length, so the frequency
//! grid is `k * sample_rate / N` for `k = 0..=N/2`.

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

use crate::error::{AlphaError, Result};

/// FFT engine for real-valued signals
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples, must be non-zero)
    pub fn new(fft_size: usize) -> Result<Self> {
        if fft_size == 0 {
            return Err(AlphaError::invalid_input("FFT size must be non-zero"));
        }

        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        Ok(Self { fft_size, r2c })
    }

    /// Compute FFT and return the unnormalized magnitude |X[k]|
    ///
    /// # Arguments
    /// * `signal` - Input signal, exactly `fft_size` samples
    ///
    /// # Returns
    /// Magnitude spectrum for k = 0..=fft_size/2 (positive frequencies only)
    pub fn compute_magnitude(&self, signal: &[f64]) -> Result<Vec<f64>> {
        if signal.len() != self.fft_size {
            return Err(AlphaError::invalid_input(format!(
                "expected {} samples, got {}",
                self.fft_size,
                signal.len()
            )));
        }

        let mut input = signal.to_vec();
        let mut output = vec![Complex::new(0.0, 0.0); self.num_bins()];

        self.r2c
            .process(&mut input, &mut output)
            .map_err(|e| AlphaError::invalid_input(format!("FFT processing failed: {e}")))?;

        Ok(output.iter().map(|c| c.norm()).collect())
    }

    /// Get number of frequency bins (fft_size/2 + 1 for real FFT)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Convert bin index to frequency in Hz
    pub fn bin_to_hz(&self, bin: usize, sample_rate: f64) -> f64 {
        bin as f64 * sample_rate / self.fft_size as f64
    }

    /// Frequency axis in Hz, ascending from DC
    pub fn frequency_axis_hz(&self, sample_rate: f64) -> Vec<f64> {
        (0..self.num_bins())
            .map(|bin| self.bin_to_hz(bin, sample_rate))
            .collect()
    }
}
