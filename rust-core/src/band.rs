//! Frequency band of interest

use serde::{Deserialize, Serialize};

use crate::error::{AlphaError, Result};

/// Default lower band edge in Hz
pub const DEFAULT_MIN_FREQ: f64 = 5.0;
/// Default upper band edge in Hz
pub const DEFAULT_MAX_FREQ: f64 = 40.0;

/// Open frequency interval `(min_freq, max_freq)` searched for the peak
///
/// Both edges are excluded: a bin exactly on an edge is outside the band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBand", into = "RawBand")]
pub struct BandWindow {
    min_freq: f64,
    max_freq: f64,
}

impl BandWindow {
    pub fn new(min_freq: f64, max_freq: f64) -> Result<Self> {
        if !min_freq.is_finite() || !max_freq.is_finite() {
            return Err(AlphaError::invalid_input(format!(
                "band edges must be finite, got ({min_freq}, {max_freq})"
            )));
        }
        if min_freq >= max_freq {
            return Err(AlphaError::invalid_input(format!(
                "band lower edge {min_freq} Hz must be below upper edge {max_freq} Hz"
            )));
        }

        Ok(Self { min_freq, max_freq })
    }

    pub fn min_freq(&self) -> f64 {
        self.min_freq
    }

    pub fn max_freq(&self) -> f64 {
        self.max_freq
    }

    /// Strict containment test
    pub fn contains(&self, freq: f64) -> bool {
        self.min_freq < freq && freq < self.max_freq
    }
}

impl Default for BandWindow {
    fn default() -> Self {
        Self {
            min_freq: DEFAULT_MIN_FREQ,
            max_freq: DEFAULT_MAX_FREQ,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawBand {
    min_freq: f64,
    max_freq: f64,
}

impl TryFrom<RawBand> for BandWindow {
    type Error = AlphaError;

    fn try_from(raw: RawBand) -> Result<Self> {
        BandWindow::new(raw.min_freq, raw.max_freq)
    }
}

impl From<BandWindow> for RawBand {
    fn from(band: BandWindow) -> Self {
        RawBand {
            min_freq: band.min_freq,
            max_freq: band.max_freq,
        }
    }
}
