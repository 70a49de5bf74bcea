//! Host-side array representation
//!
//! Anything the host hands across the boundary must describe itself
//! through [`HostArray`]: element type, shape, memory order and the raw
//! bytes. Python's numpy arrays implement it in [`crate::ffi`]; the
//! pure-Rust [`HostView`] implements it for the native-to-host direction.

use crate::core::{DType, Element, Layout};
use crate::view::ViewError;

/// An array-like object living on the host side of the boundary
pub trait HostArray {
    fn dtype(&self) -> DType;

    fn shape(&self) -> &[usize];

    /// Memory order of a contiguous buffer, `None` if the array is strided
    fn layout(&self) -> Option<Layout>;

    /// Raw bytes of a contiguous buffer, `None` if the array is strided
    fn bytes(&self) -> Option<&[u8]>;

    fn ndim(&self) -> usize {
        self.shape().len()
    }
}

/// Host-visible wrapper produced by [`crate::boundary::adapt_out`]
///
/// Type-erased: it carries the element type as a [`DType`] tag next to the
/// raw bytes, the way a host runtime sees a foreign buffer. It borrows the
/// buffer for `'a` and never owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct HostView<'a> {
    bytes: &'a [u8],
    dtype: DType,
    shape: Vec<usize>,
    strides: Vec<usize>,
    layout: Layout,
}

impl<'a> HostView<'a> {
    pub(crate) fn new(
        bytes: &'a [u8],
        dtype: DType,
        shape: Vec<usize>,
        strides: Vec<usize>,
        layout: Layout,
    ) -> Self {
        Self {
            bytes,
            dtype,
            shape,
            strides,
            layout,
        }
    }

    /// Element strides, one per dimension
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.bytes.as_ptr()
    }

    /// Reinterpret the bytes as elements of `T`
    ///
    /// # Errors
    ///
    /// Returns `ViewError::TypeMismatch` if `T` is not the wrapped element
    /// type.
    pub fn as_typed<T: Element>(&self) -> Result<&'a [T], ViewError> {
        if self.dtype != T::DTYPE {
            return Err(ViewError::TypeMismatch {
                expected: T::DTYPE,
                found: self.dtype.to_string(),
            });
        }
        bytemuck::try_cast_slice(self.bytes)
            .map_err(|_| ViewError::Layout("buffer is misaligned for its element type"))
    }
}

impl HostArray for HostView<'_> {
    fn dtype(&self) -> DType {
        self.dtype
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn layout(&self) -> Option<Layout> {
        Some(self.layout)
    }

    fn bytes(&self) -> Option<&[u8]> {
        Some(self.bytes)
    }
}
