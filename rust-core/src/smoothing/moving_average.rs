//! Fixed-window moving average
//!
//! Output element `i` is the mean of inputs `i..i + window`, so the output is
//! `window - 1` elements shorter than the input.

use super::Curve;
use crate::error::{AlphaError, Result};

/// Default moving-average window, in spectral bins
pub const DEFAULT_WINDOW_SIZE: usize = 30;

fn check_window(len: usize, window: usize) -> Result<()> {
    if window == 0 {
        return Err(AlphaError::invalid_input(
            "moving-average window must be at least 1",
        ));
    }
    if len < window {
        return Err(AlphaError::InsufficientData { len, window });
    }
    Ok(())
}

/// Running-sum mean over one axis. Caller has validated `window`.
fn running_mean(values: &[f64], window: usize) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(values.len());
    let mut acc = 0.0;
    for &v in values {
        acc += v;
        cumulative.push(acc);
    }

    let scale = window as f64;
    (0..=values.len() - window)
        .map(|i| {
            let end = cumulative[i + window - 1];
            let start = if i == 0 { 0.0 } else { cumulative[i - 1] };
            (end - start) / scale
        })
        .collect()
}

/// Moving average of a single sequence
///
/// # Returns
/// `values.len() - window + 1` means, or `InsufficientData` when the window
/// is longer than the input
pub fn moving_average(values: &[f64], window: usize) -> Result<Vec<f64>> {
    check_window(values.len(), window)?;
    Ok(running_mean(values, window))
}

/// Moving average applied to both axes of a curve at once
///
/// The frequency axis is averaged exactly like the magnitudes so that each
/// averaged magnitude sits at the mean frequency of the bins it covers.
pub fn paired_moving_average(curve: &Curve, window: usize) -> Result<Curve> {
    check_window(curve.len(), window)?;

    Curve::new(
        running_mean(curve.x(), window),
        running_mean(curve.y(), window),
    )
}
