//! Serializable summary of a view's shape and element type

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{DType, Layout};
use crate::view::mdview::ViewShape;

/// Shape metadata of a view, without the data
///
/// Used for logging and handed to the host as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewInfo {
    pub rank: usize,
    pub extents: Vec<usize>,
    pub strides: Vec<usize>,
    pub layout: Layout,
    pub dtype: DType,
    pub total_size: usize,
}

impl ViewInfo {
    pub(crate) fn new<const R: usize>(shape: &ViewShape<R>, dtype: DType) -> Self {
        Self {
            rank: R,
            extents: shape.extents().to_vec(),
            strides: shape.strides().to_vec(),
            layout: shape.layout(),
            dtype,
            total_size: shape.total_size(),
        }
    }

    /// Render as a JSON object
    ///
    /// # Errors
    ///
    /// Propagates the serializer error; the struct holds only plain data so
    /// this does not fail in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for ViewInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = match self.layout {
            Layout::RowMajor => "row-major",
            Layout::ColumnMajor => "column-major",
        };
        write!(
            f,
            "rank-{} {} view, extents {:?}, {}",
            self.rank, self.dtype, self.extents, layout
        )
    }
}
