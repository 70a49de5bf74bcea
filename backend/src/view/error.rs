//! Errors raised by view construction, element access and boundary adaptation

use crate::core::DType;
use thiserror::Error;

/// Errors that can occur while building, indexing or adapting a view
///
/// All of them are raised before any element is read or written, so a
/// failed operation leaves the buffer untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Shape error: extents {extents:?} do not fit in a buffer of {capacity} elements")]
    Shape { extents: Vec<usize>, capacity: usize },

    #[error("Index error: index {index} out of range for dimension {dim} with extent {extent}")]
    Index { dim: usize, index: i64, extent: usize },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: DType, found: String },

    #[error("Rank mismatch: expected rank {expected}, found rank {found}")]
    RankMismatch { expected: usize, found: usize },

    #[error("Rank mismatch: expected rank {min} to {max}, found rank {found}")]
    RankOutOfRange { min: usize, max: usize, found: usize },

    #[error("Layout error: {0}")]
    Layout(&'static str),
}

impl ViewError {
    pub(crate) fn index(dim: usize, index: usize, extent: usize) -> Self {
        ViewError::Index {
            dim,
            index: i64::try_from(index).unwrap_or(i64::MAX),
            extent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_out_of_range_names_accepted_ranks() {
        let err = ViewError::RankOutOfRange {
            min: 1,
            max: 3,
            found: 4,
        };

        assert_eq!(
            err.to_string(),
            "Rank mismatch: expected rank 1 to 3, found rank 4"
        );
    }

    #[test]
    fn test_index_saturates_huge_components() {
        assert_eq!(
            ViewError::index(0, usize::MAX, 2),
            ViewError::Index {
                dim: 0,
                index: i64::MAX,
                extent: 2
            }
        );
    }
}
