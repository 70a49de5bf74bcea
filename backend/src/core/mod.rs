//! Element types and layout conventions shared by views and the boundary

pub mod dtype;
pub mod layout;

pub use dtype::{DType, Element};
pub use layout::{shape_size, Layout};
