//! Type conversion utilities for FFI boundary
//!
//! Converts between numpy arrays and native views, and between
//! [`ViewError`] and Python exceptions.

use numpy::ndarray::{ArrayViewD, IxDyn, ShapeBuilder};
use numpy::{PyArrayDyn, PyArrayMethods, PyReadonlyArrayDyn, PyUntypedArray, PyUntypedArrayMethods};
use pyo3::create_exception;
use pyo3::exceptions::{PyIndexError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::IntoPyDict;

use crate::boundary::{adapt_out, HostArray};
use crate::core::{DType, Element, Layout};
use crate::view::{MdView, ViewError};

// ========================================================================
// Exceptions
// ========================================================================

create_exception!(_toto, ShapeError, PyValueError, "Extents do not fit the buffer.");
create_exception!(_toto, ViewIndexError, PyIndexError, "Index outside the view's extents.");
create_exception!(_toto, TypeMismatchError, PyTypeError, "Array element type does not match.");
create_exception!(_toto, RankMismatchError, PyValueError, "Array rank does not match.");
create_exception!(_toto, LayoutError, PyValueError, "Array buffer is strided or misaligned.");

impl From<ViewError> for PyErr {
    fn from(err: ViewError) -> PyErr {
        let message = err.to_string();
        match err {
            ViewError::Shape { .. } => ShapeError::new_err(message),
            ViewError::Index { .. } => ViewIndexError::new_err(message),
            ViewError::TypeMismatch { .. } => TypeMismatchError::new_err(message),
            ViewError::RankMismatch { .. } | ViewError::RankOutOfRange { .. } => {
                RankMismatchError::new_err(message)
            }
            ViewError::Layout(_) => LayoutError::new_err(message),
        }
    }
}

// ========================================================================
// Host-to-native: numpy arrays as host arrays
// ========================================================================

/// A read-only borrow of a numpy array with a supported element type
///
/// Holding the readonly borrow keeps numpy from handing out a mutable
/// borrow of the same array while a native view exists. It does not keep
/// the array alive beyond the current call.
pub enum NumpyHost<'py> {
    U8(PyReadonlyArrayDyn<'py, u8>),
    I32(PyReadonlyArrayDyn<'py, i32>),
    U32(PyReadonlyArrayDyn<'py, u32>),
    I64(PyReadonlyArrayDyn<'py, i64>),
    F32(PyReadonlyArrayDyn<'py, f32>),
    F64(PyReadonlyArrayDyn<'py, f64>),
}

macro_rules! try_typed {
    ($obj:expr, $t:ty, $variant:ident) => {
        if let Ok(array) = $obj.downcast::<PyArrayDyn<$t>>() {
            return Ok(NumpyHost::$variant(array.try_readonly()?));
        }
    };
}

macro_rules! with_array {
    ($host:expr, $array:ident => $body:expr) => {
        match $host {
            NumpyHost::U8($array) => $body,
            NumpyHost::I32($array) => $body,
            NumpyHost::U32($array) => $body,
            NumpyHost::I64($array) => $body,
            NumpyHost::F32($array) => $body,
            NumpyHost::F64($array) => $body,
        }
    };
}

impl<'py> NumpyHost<'py> {
    /// Borrow `obj` as a numpy array
    ///
    /// # Errors
    ///
    /// - `TypeError` if `obj` is not a numpy array
    /// - `TypeMismatchError` if its element type is not one we can view,
    ///   reported against `expected`
    pub fn extract(obj: &Bound<'py, PyAny>, expected: DType) -> PyResult<Self> {
        let untyped = obj.downcast::<PyUntypedArray>()?;

        try_typed!(obj, f64, F64);
        try_typed!(obj, f32, F32);
        try_typed!(obj, i64, I64);
        try_typed!(obj, i32, I32);
        try_typed!(obj, u32, U32);
        try_typed!(obj, u8, U8);

        Err(ViewError::TypeMismatch {
            expected,
            found: untyped.dtype().to_string(),
        }
        .into())
    }
}

impl HostArray for NumpyHost<'_> {
    fn dtype(&self) -> DType {
        match self {
            NumpyHost::U8(_) => DType::U8,
            NumpyHost::I32(_) => DType::I32,
            NumpyHost::U32(_) => DType::U32,
            NumpyHost::I64(_) => DType::I64,
            NumpyHost::F32(_) => DType::F32,
            NumpyHost::F64(_) => DType::F64,
        }
    }

    fn shape(&self) -> &[usize] {
        with_array!(self, array => array.shape())
    }

    fn layout(&self) -> Option<Layout> {
        with_array!(self, array => {
            if array.is_c_contiguous() {
                Some(Layout::RowMajor)
            } else if array.is_fortran_contiguous() {
                Some(Layout::ColumnMajor)
            } else {
                None
            }
        })
    }

    fn bytes(&self) -> Option<&[u8]> {
        with_array!(self, array => array.as_slice().ok().map(bytemuck::cast_slice))
    }
}

// ========================================================================
// Native-to-host: static views as numpy arrays
// ========================================================================

/// Base object of arrays exported from native storage
///
/// Owns nothing: the storage it stands for is `'static`.
#[pyclass(frozen, name = "StaticBuffer")]
pub struct PyStaticBuffer {
    #[pyo3(get)]
    description: String,
}

/// Export a view over `'static` storage as a read-only numpy array
///
/// No data is copied. The `'static` bound is what makes this sound: the
/// array may outlive every Rust frame, so only storage that is never freed
/// may back it.
pub fn export_static<'py, T, const R: usize>(
    py: Python<'py>,
    view: MdView<'static, T, R>,
) -> PyResult<Bound<'py, PyArrayDyn<T>>>
where
    T: Element + numpy::Element,
{
    let host = adapt_out(view);
    let data: &'static [T] = host.as_typed::<T>()?;
    let shape = IxDyn(host.shape()).strides(IxDyn(host.strides()));
    let array = ArrayViewD::from_shape(shape, data)
        .map_err(|e| ShapeError::new_err(e.to_string()))?;

    let base = Bound::new(
        py,
        PyStaticBuffer {
            description: view.info().to_string(),
        },
    )?;

    // SAFETY: `data` borrows 'static storage, so it outlives `base` and
    // every array that keeps `base` alive.
    let exported = unsafe { PyArrayDyn::borrow_from_array_bound(&array, base.into_any()) };
    let flags = [("write", false)].into_py_dict_bound(py);
    exported.call_method("setflags", (), Some(&flags))?;
    Ok(exported)
}
