//! Multi-dimensional views
//!
//! - **mdview**: `MdView` / `MdViewMut`, the zero-copy views themselves
//! - **info**: serializable shape summary
//! - **error**: the error taxonomy shared with the boundary adapter

pub mod error;
pub mod info;
pub mod mdview;

// Re-exports
pub use error::ViewError;
pub use info::ViewInfo;
pub use mdview::{MdView, MdViewMut, ViewShape};
