//! Non-owning multi-dimensional views over contiguous buffers
//!
//! A view pairs a borrowed slice with a fixed number of extents. It never
//! allocates, copies or frees: dropping a view leaves the buffer exactly
//! as it was.
//!
//! # Lifetime contract
//!
//! The buffer owner must keep the buffer alive for as long as any view
//! over it is used. Inside Rust the borrow checker enforces this through
//! the `'a` lifetime. Once a view crosses into a host language (see
//! [`crate::boundary`]) the contract becomes a documented caller
//! obligation again.

use std::fmt;

use crate::core::{shape_size, DType, Element, Layout};
use crate::view::error::ViewError;
use crate::view::info::ViewInfo;

/// Extents, strides and layout of a rank-`R` view, already validated
/// against a buffer capacity
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ViewShape<const R: usize> {
    extents: [usize; R],
    strides: [usize; R],
    layout: Layout,
    total_size: usize,
}

impl<const R: usize> ViewShape<R> {
    const RANK_IS_POSITIVE: () = assert!(R > 0, "a view needs at least one dimension");

    /// Validate `extents` against a buffer holding `capacity` elements
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Shape` if the element count overflows or
    /// exceeds `capacity`.
    pub fn fit(extents: [usize; R], layout: Layout, capacity: usize) -> Result<Self, ViewError> {
        #[allow(clippy::let_unit_value)]
        let () = Self::RANK_IS_POSITIVE;

        let total_size = shape_size(&extents)
            .filter(|&required| required <= capacity)
            .ok_or_else(|| ViewError::Shape {
                extents: extents.to_vec(),
                capacity,
            })?;

        Ok(Self {
            extents,
            strides: layout.strides(&extents),
            layout,
            total_size,
        })
    }

    /// Linear offset of `indices`: `sum(indices[k] * strides[k])`
    ///
    /// Every component is checked before any arithmetic happens.
    pub fn offset(&self, indices: [usize; R]) -> Result<usize, ViewError> {
        for (dim, (&index, &extent)) in indices.iter().zip(self.extents.iter()).enumerate() {
            if index >= extent {
                return Err(ViewError::index(dim, index, extent));
            }
        }
        Ok(indices
            .iter()
            .zip(self.strides.iter())
            .map(|(&index, &stride)| index * stride)
            .sum())
    }

    pub fn extents(&self) -> [usize; R] {
        self.extents
    }

    pub fn strides(&self) -> [usize; R] {
        self.strides
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn total_size(&self) -> usize {
        self.total_size
    }
}

/// Shared, zero-copy view over `&'a [T]`
///
/// # Example
/// ```
/// use toto_core_rs::MdView;
///
/// let buffer: Vec<f64> = (0..24).map(f64::from).collect();
/// let view = MdView::create(&buffer, [2, 3, 4]).unwrap();
///
/// assert_eq!(view.total_size(), 24);
/// assert_eq!(*view.at([1, 2, 3]).unwrap(), 23.0);
/// assert!(view.at([2, 0, 0]).is_err());
/// ```
#[derive(Copy, Clone)]
pub struct MdView<'a, T, const R: usize> {
    data: &'a [T],
    shape: ViewShape<R>,
}

impl<'a, T: Element, const R: usize> MdView<'a, T, R> {
    /// Wrap `data` as a row-major view with the given extents
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Shape` if `product(extents) > data.len()`.
    pub fn create(data: &'a [T], extents: [usize; R]) -> Result<Self, ViewError> {
        Self::create_with_layout(data, extents, Layout::RowMajor)
    }

    pub fn create_with_layout(
        data: &'a [T],
        extents: [usize; R],
        layout: Layout,
    ) -> Result<Self, ViewError> {
        let shape = ViewShape::fit(extents, layout, data.len())?;
        log::debug!(
            "wrapped {} buffer of {} elements as {:?} view with extents {:?}",
            T::DTYPE,
            data.len(),
            layout,
            extents
        );
        Ok(Self { data, shape })
    }

    /// Pair `data` with a shape already fitted to `data.len()`
    pub(crate) fn from_shape(data: &'a [T], shape: ViewShape<R>) -> Self {
        debug_assert!(shape.total_size() <= data.len());
        Self { data, shape }
    }

    /// Reference to the element at `indices`, pointing into the original buffer
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Index` if any component is outside `[0, extent)`.
    pub fn at(&self, indices: [usize; R]) -> Result<&'a T, ViewError> {
        let offset = self.shape.offset(indices)?;
        Ok(&self.data[offset])
    }

    pub fn get(&self, indices: [usize; R]) -> Option<&'a T> {
        self.at(indices).ok()
    }

    pub fn offset(&self, indices: [usize; R]) -> Result<usize, ViewError> {
        self.shape.offset(indices)
    }

    pub fn extent(&self) -> [usize; R] {
        self.shape.extents()
    }

    pub fn rank(&self) -> usize {
        R
    }

    pub fn total_size(&self) -> usize {
        self.shape.total_size()
    }

    pub fn strides(&self) -> [usize; R] {
        self.shape.strides()
    }

    pub fn layout(&self) -> Layout {
        self.shape.layout()
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    pub fn shape(&self) -> &ViewShape<R> {
        &self.shape
    }

    /// The `total_size()` elements covered by the view, in memory order
    pub fn as_slice(&self) -> &'a [T] {
        &self.data[..self.shape.total_size()]
    }

    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Iterate elements in memory order (row-major or column-major
    /// depending on the view's layout)
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    pub fn info(&self) -> ViewInfo {
        ViewInfo::new(&self.shape, T::DTYPE)
    }
}

impl<T: Element, const R: usize> fmt::Debug for MdView<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MdView")
            .field("dtype", &T::DTYPE)
            .field("extents", &self.shape.extents)
            .field("layout", &self.shape.layout)
            .field("capacity", &self.data.len())
            .finish()
    }
}

/// Exclusive view over `&'a mut [T]`; writes go straight to the buffer
pub struct MdViewMut<'a, T, const R: usize> {
    data: &'a mut [T],
    shape: ViewShape<R>,
}

impl<'a, T: Element, const R: usize> MdViewMut<'a, T, R> {
    pub fn create(data: &'a mut [T], extents: [usize; R]) -> Result<Self, ViewError> {
        Self::create_with_layout(data, extents, Layout::RowMajor)
    }

    pub fn create_with_layout(
        data: &'a mut [T],
        extents: [usize; R],
        layout: Layout,
    ) -> Result<Self, ViewError> {
        let shape = ViewShape::fit(extents, layout, data.len())?;
        log::debug!(
            "wrapped mutable {} buffer of {} elements as {:?} view with extents {:?}",
            T::DTYPE,
            data.len(),
            layout,
            extents
        );
        Ok(Self { data, shape })
    }

    pub fn at(&self, indices: [usize; R]) -> Result<&T, ViewError> {
        let offset = self.shape.offset(indices)?;
        Ok(&self.data[offset])
    }

    /// Mutable reference into the original buffer
    ///
    /// # Example
    /// ```
    /// use toto_core_rs::MdViewMut;
    ///
    /// let mut buffer = vec![0.0f64; 6];
    /// {
    ///     let mut view = MdViewMut::create(&mut buffer, [2, 3]).unwrap();
    ///     *view.at_mut([1, 0]).unwrap() = 7.5;
    /// }
    /// assert_eq!(buffer[3], 7.5);
    /// ```
    pub fn at_mut(&mut self, indices: [usize; R]) -> Result<&mut T, ViewError> {
        let offset = self.shape.offset(indices)?;
        Ok(&mut self.data[offset])
    }

    pub fn get_mut(&mut self, indices: [usize; R]) -> Option<&mut T> {
        self.at_mut(indices).ok()
    }

    /// Overwrite every element covered by the view
    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    pub fn extent(&self) -> [usize; R] {
        self.shape.extents()
    }

    pub fn rank(&self) -> usize {
        R
    }

    pub fn total_size(&self) -> usize {
        self.shape.total_size()
    }

    pub fn strides(&self) -> [usize; R] {
        self.shape.strides()
    }

    pub fn layout(&self) -> Layout {
        self.shape.layout()
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    pub fn shape(&self) -> &ViewShape<R> {
        &self.shape
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data[..self.shape.total_size()]
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let total = self.shape.total_size();
        &mut self.data[..total]
    }

    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Iterate elements in memory order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    pub fn info(&self) -> ViewInfo {
        ViewInfo::new(&self.shape, T::DTYPE)
    }

    /// Reborrow as a shared view
    pub fn as_view(&self) -> MdView<'_, T, R> {
        MdView {
            data: &*self.data,
            shape: self.shape,
        }
    }

    pub fn into_view(self) -> MdView<'a, T, R> {
        MdView {
            data: self.data,
            shape: self.shape,
        }
    }
}

impl<T: Element, const R: usize> fmt::Debug for MdViewMut<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MdViewMut")
            .field("dtype", &T::DTYPE)
            .field("extents", &self.shape.extents)
            .field("layout", &self.shape.layout)
            .field("capacity", &self.data.len())
            .finish()
    }
}
