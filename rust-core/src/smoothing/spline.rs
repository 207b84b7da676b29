//! Least-squares cubic B-spline with quantile-placed knots
//!
//! The spline has `K` interior knots at the quantiles `i / (K + 1)` of the
//! abscissae and boundary knots of multiplicity 4 at the first and last
//! abscissa. Coefficients minimize the squared residual over all points,
//! solved through the normal equations with a Cholesky factorization.

use ndarray::{Array1, Array2};

use crate::error::{AlphaError, Result};

/// Default number of interior knots
pub const DEFAULT_INTERIOR_KNOTS: usize = 30;

const DEGREE: usize = 3;
const ORDER: usize = DEGREE + 1;

/// Linear-interpolated quantile of ascending data
///
/// `q` in [0, 1]; position `q * (n - 1)` is interpolated between neighbours.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = pos - lo as f64;

    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Interior knots at the evenly spaced quantiles `1/(K+1) .. K/(K+1)`
pub fn quantile_knots(sorted: &[f64], count: usize) -> Vec<f64> {
    let denom = count as f64 + 1.0;
    (1..=count)
        .filter_map(|i| quantile(sorted, i as f64 / denom))
        .collect()
}

/// Fitted cubic spline
#[derive(Debug, Clone)]
pub struct CubicSpline {
    /// Full knot vector, `K + 8` entries
    knots: Vec<f64>,
    /// B-spline coefficients, `K + 4` entries
    coefficients: Vec<f64>,
}

impl CubicSpline {
    /// Fit to `(x, y)` with `interior_knots` knots at the quantiles of `x`
    ///
    /// `x` must be non-decreasing. Fails with `FitFailure` when there are not
    /// more than `interior_knots + 3` points, when the knots do not lie
    /// strictly inside the data range, or when the system is singular.
    pub fn fit(x: &[f64], y: &[f64], interior_knots: usize) -> Result<Self> {
        if x.len() != y.len() {
            return Err(AlphaError::fit_failure(format!(
                "{} abscissae but {} ordinates",
                x.len(),
                y.len()
            )));
        }

        let min_points = interior_knots.checked_add(ORDER).ok_or_else(|| {
            AlphaError::fit_failure(format!("{interior_knots} interior knots is too many"))
        })?;
        if x.len() < min_points {
            return Err(AlphaError::fit_failure(format!(
                "{} points cannot support {} interior knots (need at least {})",
                x.len(),
                interior_knots,
                min_points
            )));
        }
        if x.windows(2).any(|w| w[0] > w[1]) {
            return Err(AlphaError::fit_failure("abscissae must be non-decreasing"));
        }

        let first = x[0];
        let last = x[x.len() - 1];
        let interior = quantile_knots(x, interior_knots);
        if let (Some(&lo), Some(&hi)) = (interior.first(), interior.last()) {
            if lo <= first || hi >= last {
                return Err(AlphaError::fit_failure(format!(
                    "interior knots [{lo}, {hi}] not strictly inside data range [{first}, {last}]"
                )));
            }
        } else if first >= last {
            return Err(AlphaError::fit_failure("data range is degenerate"));
        }

        let mut knots = Vec::with_capacity(interior.len() + 2 * ORDER);
        knots.extend(std::iter::repeat(first).take(ORDER));
        knots.extend(interior);
        knots.extend(std::iter::repeat(last).take(ORDER));

        let mut spline = Self {
            knots,
            coefficients: Vec::new(),
        };
        spline.coefficients = spline.solve_least_squares(x, y)?;

        Ok(spline)
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    fn num_coefficients(&self) -> usize {
        self.knots.len() - ORDER
    }

    /// Evaluate the spline at `x`
    ///
    /// Points outside the knot range are evaluated on the boundary polynomial.
    pub fn evaluate(&self, x: f64) -> f64 {
        let span = self.find_span(x);
        let basis = self.basis_functions(span, x);

        basis
            .iter()
            .enumerate()
            .map(|(i, b)| b * self.coefficients[span - DEGREE + i])
            .sum()
    }

    pub fn evaluate_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Index `s` with `knots[s] <= x < knots[s + 1]`, clamped to the valid
    /// span range `DEGREE..n`
    fn find_span(&self, x: f64) -> usize {
        let n = self.num_coefficients();
        if x >= self.knots[n] {
            return n - 1;
        }
        if x <= self.knots[DEGREE] {
            return DEGREE;
        }

        // Last knot in DEGREE..=n that is <= x
        let upper = self.knots[DEGREE..=n].partition_point(|&k| k <= x);
        DEGREE + upper - 1
    }

    /// The four non-zero basis functions on `span` (Cox-de Boor recursion)
    fn basis_functions(&self, span: usize, x: f64) -> [f64; ORDER] {
        let t = &self.knots;
        let mut n = [0.0; ORDER];
        let mut left = [0.0; ORDER];
        let mut right = [0.0; ORDER];

        n[0] = 1.0;
        for j in 1..ORDER {
            left[j] = x - t[span + 1 - j];
            right[j] = t[span + j] - x;

            let mut saved = 0.0;
            for r in 0..j {
                let temp = n[r] / (right[r + 1] + left[j - r]);
                n[r] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            }
            n[j] = saved;
        }

        n
    }

    fn solve_least_squares(&self, x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
        let n = self.num_coefficients();
        let mut normal = Array2::<f64>::zeros((n, n));
        let mut rhs = Array1::<f64>::zeros(n);

        for (&xi, &yi) in x.iter().zip(y.iter()) {
            let span = self.find_span(xi);
            let basis = self.basis_functions(span, xi);
            let offset = span - DEGREE;

            for (i, bi) in basis.iter().enumerate() {
                rhs[offset + i] += bi * yi;
                for (j, bj) in basis.iter().enumerate() {
                    normal[[offset + i, offset + j]] += bi * bj;
                }
            }
        }

        cholesky_solve(normal, rhs)
    }
}

/// Solve `A c = b` for symmetric positive definite `A`
fn cholesky_solve(mut a: Array2<f64>, b: Array1<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    let scale = (0..n).map(|i| a[[i, i]]).fold(0.0_f64, f64::max);
    let tolerance = scale * 1e-14;

    // In-place factorization, L stored in the lower triangle
    for j in 0..n {
        let mut diag = a[[j, j]];
        for k in 0..j {
            diag -= a[[j, k]] * a[[j, k]];
        }
        if !(diag > tolerance) {
            return Err(AlphaError::fit_failure(format!(
                "least-squares system is singular at coefficient {j}"
            )));
        }
        let diag = diag.sqrt();
        a[[j, j]] = diag;

        for i in (j + 1)..n {
            let mut value = a[[i, j]];
            for k in 0..j {
                value -= a[[i, k]] * a[[j, k]];
            }
            a[[i, j]] = value / diag;
        }
    }

    // L z = b
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut value = b[i];
        for k in 0..i {
            value -= a[[i, k]] * z[k];
        }
        z[i] = value / a[[i, i]];
    }

    // L^T c = z
    let mut c = vec![0.0; n];
    for i in (0..n).rev() {
        let mut value = z[i];
        for k in (i + 1)..n {
            value -= a[[k, i]] * c[k];
        }
        c[i] = value / a[[i, i]];
    }

    Ok(c)
}
