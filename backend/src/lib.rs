//! toto core - Rust engine behind the `_toto` extension module
//!
//! Zero-copy multi-dimensional views and the boundary convention for
//! exchanging them with Python.
//!
//! # Architecture
//!
//! - **core**: Element types (`DType`) and layout/stride conventions
//! - **view**: `MdView` / `MdViewMut`, non-owning rank-`R` views
//! - **boundary**: Host array abstraction, `adapt_in` / `adapt_out`
//! - **api**: Module functions (`greeting`, `add`, `consume_view`,
//!   `produce_view`) and the process-wide demo storage
//! - **ffi**: PyO3 + numpy bindings (feature `pyo3`)
//!
//! # Critical Invariants
//!
//! 1. A view never allocates, copies or frees its buffer
//! 2. `product(extents) <= buffer length` for every view
//! 3. Element type and rank are validated before a host buffer is read
//! 4. Only `'static` native storage is ever exported to the host

// Module declarations
pub mod api;
pub mod boundary;
pub mod core;
pub mod view;

// Re-exports for convenience
pub use api::{DemoConfig, DemoStorage, Span3};
pub use boundary::{adapt_in, adapt_out, HostArray, HostView};
pub use core::{DType, Element, Layout};
pub use view::{MdView, MdViewMut, ViewError, ViewInfo};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

/// toto hello module
#[cfg(feature = "pyo3")]
#[pymodule]
#[pyo3(name = "_toto")]
fn toto_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::register(m)
}
