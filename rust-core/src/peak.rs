//! Peak extraction on the smoothed curve

use crate::error::{AlphaError, Result};
use crate::smoothing::Curve;

/// Index of the largest value, first occurrence on ties
///
/// NaN entries never win.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, max)) if !(v > max) => {}
            _ if v.is_nan() => {}
            _ => best = Some((i, v)),
        }
    }

    best.map(|(i, _)| i)
}

/// Frequency of maximal smoothed energy
pub fn find_peak(curve: &Curve) -> Result<f64> {
    if curve.is_empty() {
        return Err(AlphaError::EmptyCurve);
    }

    argmax(curve.y())
        .map(|i| curve.x()[i])
        .ok_or(AlphaError::EmptyCurve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_maximum() {
        let x: Vec<f64> = (0..20).map(|i| 5.0 + i as f64).collect();
        let mut y = vec![0.1; 20];
        y[7] = 4.0;
        let curve = Curve::new(x, y).unwrap();

        assert_eq!(find_peak(&curve).unwrap(), 12.0);
    }

    #[test]
    fn test_first_occurrence_on_tie() {
        assert_eq!(argmax(&[1.0, 3.0, 2.0, 3.0]), Some(1));

        let curve = Curve::new(vec![8.0, 9.0, 10.0], vec![2.0, 2.0, 2.0]).unwrap();
        assert_eq!(find_peak(&curve).unwrap(), 8.0);
    }

    #[test]
    fn test_nan_is_skipped() {
        assert_eq!(argmax(&[f64::NAN, 1.0, 0.5]), Some(1));
        assert_eq!(argmax(&[f64::NAN]), None);
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_empty_curve() {
        let curve = Curve::new(vec![], vec![]).unwrap();
        assert!(matches!(find_peak(&curve), Err(AlphaError::EmptyCurve)));
    }
}
