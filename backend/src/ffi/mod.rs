//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings exposing the module API to Python as `_toto`.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: only the functions in [`crate::api`] are exposed
//! 2. **Validate inputs**: element type and rank are checked before any
//!    element is read
//! 3. **Typed errors**: every `ViewError` maps to its own Python exception
//! 4. **Zero copy**: arrays cross the boundary as views, never as copies;
//!    only `'static` native storage is ever exported
//!
//! # Testing
//!
//! The tests in this module embed an interpreter, so they run under
//! `cargo test --features pyo3` with numpy importable. The importable
//! extension itself is built with the `extension-module` feature.

pub mod functions;
pub mod types;

pub use functions::register;
