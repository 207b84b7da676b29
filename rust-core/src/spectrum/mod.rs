//! Spectral estimation with FFT

pub mod analysis;
pub mod fft;
pub mod windowing;

pub use analysis::{Spectrum, SpectrumAnalyzer};
pub use fft::FftEngine;
pub use windowing::{apply_window, generate_window, WindowType};
