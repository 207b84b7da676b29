//! Window functions for spectral estimation
//!
//! The default is rectangular: the spectrum is taken over the raw samples.
//! Tapered windows are available for recordings with strong edge
//! discontinuities.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Rectangular window (no windowing)
    #[default]
    Rectangular,

    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    /// Sidelobe attenuation: ~31 dB (spectral), fast sidelobe rolloff
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,
}

impl WindowType {
    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Rectangular => "rectangular",
            WindowType::Hann => "hann",
            WindowType::Hamming => "hamming",
            WindowType::Blackman => "blackman",
        }
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rectangular" | "rect" | "none" => Ok(WindowType::Rectangular),
            "hann" | "hanning" => Ok(WindowType::Hann),
            "hamming" => Ok(WindowType::Hamming),
            "blackman" => Ok(WindowType::Blackman),
            other => Err(format!(
                "unknown window '{other}' (expected rectangular, hann, hamming or blackman)"
            )),
        }
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    if length == 1 {
        return vec![1.0];
    }

    let denom = length as f64 - 1.0;
    let angle = |n: usize, k: f64| k * PI * n as f64 / denom;

    match window_type {
        WindowType::Rectangular => vec![1.0; length],
        WindowType::Hann => (0..length)
            .map(|n| 0.5 - 0.5 * angle(n, 2.0).cos())
            .collect(),
        WindowType::Hamming => (0..length)
            .map(|n| 0.54 - 0.46 * angle(n, 2.0).cos())
            .collect(),
        WindowType::Blackman => (0..length)
            .map(|n| 0.42 - 0.5 * angle(n, 2.0).cos() + 0.08 * angle(n, 4.0).cos())
            .collect(),
    }
}

/// Apply window to signal
///
/// # Returns
/// Windowed signal and the sum of the window coefficients, which is the
/// normalization used for the magnitude spectrum
pub fn apply_window(signal: &[f64], window_type: WindowType) -> (Vec<f64>, f64) {
    let window = generate_window(window_type, signal.len());
    let gain = window.iter().sum();

    let windowed = signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect();

    (windowed, gain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_generation() {
        let length = 161;

        let hann = generate_window(WindowType::Hann, length);
        let hamming = generate_window(WindowType::Hamming, length);
        let blackman = generate_window(WindowType::Blackman, length);

        assert_eq!(hann.len(), length);

        // Symmetric
        assert!((hann[0] - hann[length - 1]).abs() < 1e-10);
        assert!((blackman[0] - blackman[length - 1]).abs() < 1e-10);

        let center = length / 2;
        assert!((hann[center] - 1.0).abs() < 1e-10);
        assert!((hamming[center] - 1.0).abs() < 1e-10);
        assert!((blackman[center] - 1.0).abs() < 1e-10);

        // Hamming has non-zero endpoints (0.08)
        assert!(hamming[0] > 0.07 && hamming[0] < 0.09);
        assert!(hann[0].abs() < 1e-12);
    }

    #[test]
    fn test_rectangular_window() {
        let (windowed, gain) = apply_window(&[2.0, -1.0, 0.5], WindowType::Rectangular);
        assert_eq!(windowed, vec![2.0, -1.0, 0.5]);
        assert_eq!(gain, 3.0);
    }

    #[test]
    fn test_single_sample_window() {
        assert_eq!(generate_window(WindowType::Hann, 1), vec![1.0]);
    }

    #[test]
    fn test_parse_window_names() {
        assert_eq!("Hanning".parse::<WindowType>(), Ok(WindowType::Hann));
        assert_eq!("rect".parse::<WindowType>(), Ok(WindowType::Rectangular));
        assert!("kaiser".parse::<WindowType>().is_err());
        assert_eq!(WindowType::Blackman.to_string(), "blackman");
    }
}
