//! Memory layout conventions and stride derivation
//!
//! A stride is the number of elements to skip to advance one unit along
//! a dimension. Strides are always derived from the extents; a view never
//! stores arbitrary strides.

use serde::{Deserialize, Serialize};

/// Order in which a contiguous buffer is laid out
///
/// # Example
/// ```
/// use toto_core_rs::Layout;
///
/// assert_eq!(Layout::RowMajor.strides(&[2, 3, 4]), [12, 4, 1]);
/// assert_eq!(Layout::ColumnMajor.strides(&[2, 3, 4]), [1, 2, 6]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Last dimension varies fastest (C order)
    #[default]
    RowMajor,
    /// First dimension varies fastest (Fortran order)
    ColumnMajor,
}

impl Layout {
    /// Derive per-dimension strides for `extents`
    ///
    /// Saturates instead of overflowing: a shape whose element count
    /// overflows is rejected before any stride is used, and a shape with a
    /// zero extent has no valid index to apply a stride to.
    pub fn strides<const R: usize>(self, extents: &[usize; R]) -> [usize; R] {
        let mut strides = [0; R];
        let mut stride = 1usize;
        match self {
            Layout::RowMajor => {
                for k in (0..R).rev() {
                    strides[k] = stride;
                    stride = stride.saturating_mul(extents[k]);
                }
            }
            Layout::ColumnMajor => {
                for k in 0..R {
                    strides[k] = stride;
                    stride = stride.saturating_mul(extents[k]);
                }
            }
        }
        strides
    }
}

/// Number of elements described by `extents`, or `None` on overflow
pub fn shape_size(extents: &[usize]) -> Option<usize> {
    extents
        .iter()
        .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
}
