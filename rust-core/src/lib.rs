//! Alpha Peak - EEG Alpha Frequency Estimation
//!
//! Estimates the dominant oscillation frequency inside a frequency band of a
//! single-channel recording: magnitude spectrum, band restriction, moving
//! average plus cubic spline smoothing, then argmax.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod band;
pub mod error;
pub mod estimator;
pub mod io;
pub mod peak;
pub mod render;
pub mod smoothing;
pub mod spectrum;

#[cfg(feature = "python")]
mod python_bindings;

pub use band::BandWindow;
pub use error::{AlphaError, Result};
pub use estimator::{AlphaPeakEstimator, EstimatorConfig, PeakEstimate};
pub use smoothing::{Curve, Smoother};
pub use spectrum::{Spectrum, SpectrumAnalyzer, WindowType};
