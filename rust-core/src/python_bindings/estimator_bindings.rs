//! Python bindings for the alpha peak estimator

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use crate::band::BandWindow;
use crate::estimator::{AlphaPeakEstimator, EstimatorConfig, PeakEstimate};
use crate::spectrum::WindowType;

/// Alpha peak estimator exposed to Python
#[pyclass(name = "AlphaPeakEstimator")]
pub struct PyAlphaPeakEstimator {
    estimator: AlphaPeakEstimator,
}

impl PyAlphaPeakEstimator {
    fn run(&self, signal: &PyReadonlyArray1<f64>) -> PyResult<PeakEstimate> {
        let samples = signal.as_slice()?;
        Ok(self.estimator.estimate(samples)?)
    }
}

#[pymethods]
impl PyAlphaPeakEstimator {
    /// Create a new estimator
    ///
    /// Args:
    ///     sample_rate: Sample rate in Hz
    ///     min_freq: Lower band edge in Hz (excluded)
    ///     max_freq: Upper band edge in Hz (excluded)
    ///     window_size: Moving-average window in spectral bins
    ///     interior_knots: Interior knots of the smoothing spline
    ///     spectral_window: "rectangular", "hann", "hamming" or "blackman"
    #[new]
    #[pyo3(signature = (sample_rate=250.0, min_freq=5.0, max_freq=40.0, window_size=30, interior_knots=30, spectral_window="rectangular"))]
    fn new(
        sample_rate: f64,
        min_freq: f64,
        max_freq: f64,
        window_size: usize,
        interior_knots: usize,
        spectral_window: &str,
    ) -> PyResult<Self> {
        let spectral_window = spectral_window
            .parse::<WindowType>()
            .map_err(pyo3::exceptions::PyValueError::new_err)?;
        let config = EstimatorConfig {
            sample_rate,
            band: BandWindow::new(min_freq, max_freq)?,
            window_size,
            interior_knots,
            spectral_window,
        };

        Ok(Self {
            estimator: AlphaPeakEstimator::new(&config)?,
        })
    }

    /// Estimate the alpha peak of a signal
    ///
    /// Args:
    ///     signal: Samples as a contiguous numpy array
    ///
    /// Returns:
    ///     Tuple (peak_hz, smoothed_x, smoothed_y)
    fn estimate<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<(f64, &'py PyArray1<f64>, &'py PyArray1<f64>)> {
        let estimate = self.run(&signal)?;

        Ok((
            estimate.peak_hz,
            PyArray1::from_slice(py, estimate.smoothed.x()),
            PyArray1::from_slice(py, estimate.smoothed.y()),
        ))
    }

    /// Estimate and return the rounded label, e.g. "Alpha peak: 10.02 Hz"
    fn label(&self, signal: PyReadonlyArray1<f64>) -> PyResult<String> {
        Ok(self.run(&signal)?.label())
    }

    /// Get sample rate
    fn get_sample_rate(&self) -> f64 {
        self.estimator.sample_rate()
    }

    /// Get band as (min_freq, max_freq)
    fn get_band(&self) -> (f64, f64) {
        let band = self.estimator.band();
        (band.min_freq(), band.max_freq())
    }
}
