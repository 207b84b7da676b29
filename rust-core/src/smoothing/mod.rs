//! Spectrum smoothing: moving average followed by a cubic spline fit

pub mod moving_average;
pub mod spline;

pub use moving_average::{moving_average, paired_moving_average, DEFAULT_WINDOW_SIZE};
pub use spline::{quantile_knots, CubicSpline, DEFAULT_INTERIOR_KNOTS};

use log::debug;

use crate::error::{AlphaError, Result};
use crate::spectrum::Spectrum;

/// Two aligned sequences: frequency axis `x` and energy `y`
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Curve {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(AlphaError::invalid_input(format!(
                "curve axes differ in length ({} vs {})",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Largest y value, NaN-free curves only
    pub fn max_y(&self) -> Option<f64> {
        self.y.iter().cloned().reduce(f64::max)
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().cloned().zip(self.y.iter().cloned())
    }
}

impl From<&Spectrum> for Curve {
    fn from(spectrum: &Spectrum) -> Self {
        Curve {
            x: spectrum.frequencies().to_vec(),
            y: spectrum.magnitudes().to_vec(),
        }
    }
}

/// Output of the smoother
#[derive(Debug, Clone)]
pub struct SmoothedSpectrum {
    /// Moving-averaged spectrum, before the spline fit
    pub averaged: Curve,
    /// Spline evaluated at the averaged frequencies
    pub smoothed: Curve,
}

/// Moving average plus quantile-knot cubic spline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smoother {
    window_size: usize,
    interior_knots: usize,
}

impl Default for Smoother {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            interior_knots: DEFAULT_INTERIOR_KNOTS,
        }
    }
}

impl Smoother {
    pub fn new(window_size: usize, interior_knots: usize) -> Self {
        Self {
            window_size,
            interior_knots,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn interior_knots(&self) -> usize {
        self.interior_knots
    }

    /// Smallest band-restricted spectrum this smoother accepts
    ///
    /// Saturates at `usize::MAX` for knot counts no input can satisfy.
    pub fn min_input_len(&self) -> usize {
        self.window_size
            .saturating_add(self.interior_knots)
            .saturating_add(3)
    }

    pub fn smooth(&self, spectrum: &Spectrum) -> Result<SmoothedSpectrum> {
        let averaged = paired_moving_average(&Curve::from(spectrum), self.window_size)?;
        debug!(
            "moving average (window {}) -> {} points",
            self.window_size,
            averaged.len()
        );

        let spline = CubicSpline::fit(averaged.x(), averaged.y(), self.interior_knots)
            .map_err(|err| match err {
                AlphaError::FitFailure { reason } => AlphaError::fit_failure(format!(
                    "{reason}; band needs at least {} bins for window {} and {} knots, got {}",
                    self.min_input_len(),
                    self.window_size,
                    self.interior_knots,
                    spectrum.len()
                )),
                other => other,
            })?;
        let smoothed = Curve::new(averaged.x().to_vec(), spline.evaluate_all(averaged.x()))?;
        debug!(
            "cubic spline with {} interior knots fitted",
            self.interior_knots
        );

        Ok(SmoothedSpectrum { averaged, smoothed })
    }
}
