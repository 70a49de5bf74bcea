//! Python-callable functions of the `_toto` module

use numpy::PyArrayDyn;
use pyo3::exceptions::{PyOverflowError, PyValueError};
use pyo3::prelude::*;

use super::types::{
    export_static, LayoutError, NumpyHost, PyStaticBuffer, RankMismatchError, ShapeError,
    TypeMismatchError, ViewIndexError,
};
use crate::api;
use crate::boundary::{adapt_in, host_index, HostArray};
use crate::core::DType;
use crate::view::{ViewError, ViewInfo};

/// A function that returns a Hello string.
#[pyfunction]
#[pyo3(name = "greeting")]
fn py_greeting() -> &'static str {
    api::greeting()
}

/// A function that adds two integers.
///
/// Raises OverflowError if the sum does not fit in 64 bits.
#[pyfunction]
#[pyo3(name = "add")]
fn py_add(a: i64, b: i64) -> PyResult<i64> {
    api::add(a, b)
        .ok_or_else(|| PyOverflowError::new_err(format!("{} + {} overflows int64", a, b)))
}

/// A function that takes a 3D float64 array and prints its extents.
///
/// Raises TypeMismatchError or RankMismatchError before any element is read.
#[pyfunction]
#[pyo3(name = "consume_view")]
fn py_consume_view(array: &Bound<'_, PyAny>) -> PyResult<()> {
    let host = NumpyHost::extract(array, DType::F64)?;
    api::consume_host_array(&host)?;
    Ok(())
}

/// A function that makes and returns a 3D array.
///
/// The result is a read-only view over a 4x5x6 buffer owned by the
/// extension and shared by every call. No data is copied.
#[pyfunction]
#[pyo3(name = "produce_view")]
fn py_produce_view(py: Python<'_>) -> PyResult<Bound<'_, PyArrayDyn<f64>>> {
    export_static(py, api::produce_view())
}

/// Shape summary of a 1-, 2- or 3-D float64 array, as JSON.
#[pyfunction]
#[pyo3(name = "view_info")]
fn py_view_info(array: &Bound<'_, PyAny>) -> PyResult<String> {
    let host = NumpyHost::extract(array, DType::F64)?;
    let info: ViewInfo = match host.ndim() {
        1 => adapt_in::<f64, 1, _>(&host)?.info(),
        2 => adapt_in::<f64, 2, _>(&host)?.info(),
        3 => adapt_in::<f64, 3, _>(&host)?.info(),
        found => return Err(unsupported_rank(found).into()),
    };
    info.to_json()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Element of a 1-, 2- or 3-D float64 array, with bounds checking.
#[pyfunction]
#[pyo3(name = "element_at")]
fn py_element_at(array: &Bound<'_, PyAny>, index: Vec<i64>) -> PyResult<f64> {
    let host = NumpyHost::extract(array, DType::F64)?;
    let value = match host.ndim() {
        1 => element_at::<1>(&host, &index)?,
        2 => element_at::<2>(&host, &index)?,
        3 => element_at::<3>(&host, &index)?,
        found => return Err(unsupported_rank(found).into()),
    };
    Ok(value)
}

/// Ranks accepted by `view_info` and `element_at`
const MIN_RANK: usize = 1;
const MAX_RANK: usize = 3;

fn unsupported_rank(found: usize) -> ViewError {
    ViewError::RankOutOfRange {
        min: MIN_RANK,
        max: MAX_RANK,
        found,
    }
}

fn element_at<const R: usize>(host: &NumpyHost<'_>, raw: &[i64]) -> Result<f64, ViewError> {
    let view = adapt_in::<f64, R, _>(host)?;
    let indices = host_index(raw, &view.extent())?;
    Ok(*view.at(indices)?)
}

/// Register functions, exceptions and classes on the module
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();

    m.add_function(wrap_pyfunction!(py_greeting, m)?)?;
    m.add_function(wrap_pyfunction!(py_add, m)?)?;
    m.add_function(wrap_pyfunction!(py_consume_view, m)?)?;
    m.add_function(wrap_pyfunction!(py_produce_view, m)?)?;
    m.add_function(wrap_pyfunction!(py_view_info, m)?)?;
    m.add_function(wrap_pyfunction!(py_element_at, m)?)?;

    // Names the extension has always exported
    m.add("hello_from_bin", m.getattr("greeting")?)?;
    m.add("take_mdspan", m.getattr("consume_view")?)?;
    m.add("return_mdspan", m.getattr("produce_view")?)?;

    m.add("ShapeError", py.get_type_bound::<ShapeError>())?;
    m.add("ViewIndexError", py.get_type_bound::<ViewIndexError>())?;
    m.add("TypeMismatchError", py.get_type_bound::<TypeMismatchError>())?;
    m.add("RankMismatchError", py.get_type_bound::<RankMismatchError>())?;
    m.add("LayoutError", py.get_type_bound::<LayoutError>())?;

    m.add_class::<PyStaticBuffer>()?;
    Ok(())
}
