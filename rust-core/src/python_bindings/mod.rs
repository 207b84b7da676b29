//! PyO3 bindings for Python integration

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::error::AlphaError;

mod estimator_bindings;

impl From<AlphaError> for PyErr {
    fn from(err: AlphaError) -> Self {
        let message = format!("[{}] {}", err.error_code(), err);
        if err.is_pipeline_error() {
            PyValueError::new_err(message)
        } else {
            PyIOError::new_err(message)
        }
    }
}

/// Python module definition
#[pymodule]
fn alpha_peak(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<estimator_bindings::PyAlphaPeakEstimator>()?;
    Ok(())
}
