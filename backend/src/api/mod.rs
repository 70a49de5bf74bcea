//! Functions exposed by the `_toto` extension module
//!
//! These are plain Rust functions; [`crate::ffi`] only wires them to
//! Python. Keeping them here means they are tested without an interpreter.

pub mod storage;

pub use storage::{DemoConfig, DemoStorage};

use crate::boundary::{adapt_in, HostArray};
use crate::view::{MdView, ViewError};

/// The fixed greeting returned by [`greeting`]
pub const GREETING: &str = "Hello from scikit-ext!";

/// Rank-3 view over `f64`, the span type exchanged by the module
pub type Span3<'a> = MdView<'a, f64, 3>;

/// Returns the module's greeting string
///
/// # Example
/// ```
/// assert_eq!(toto_core_rs::api::greeting(), "Hello from scikit-ext!");
/// ```
pub fn greeting() -> &'static str {
    GREETING
}

/// Adds two integers
///
/// Returns `None` when the sum does not fit in an `i64`.
///
/// # Example
/// ```
/// assert_eq!(toto_core_rs::api::add(2, 3), Some(5));
/// assert_eq!(toto_core_rs::api::add(i64::MAX, 1), None);
/// ```
pub fn add(a: i64, b: i64) -> Option<i64> {
    a.checked_add(b)
}

/// Message reported by [`consume_view`]
pub fn describe_extents(view: &Span3<'_>) -> String {
    format!("Received mdspan with extents: {:?}", view.extent())
}

/// Report the extents of a rank-3 view on stdout
///
/// Only the shape is inspected; no element is read.
pub fn consume_view(view: &Span3<'_>) {
    let message = describe_extents(view);
    log::info!("{}", message);
    println!("{}", message);
}

/// Adapt a host array and hand it to [`consume_view`]
///
/// # Errors
///
/// Returns `ViewError::TypeMismatch` or `ViewError::RankMismatch` (or a
/// layout/shape error) before any element is read.
pub fn consume_host_array<H: HostArray + ?Sized>(host: &H) -> Result<(), ViewError> {
    let view: Span3<'_> = adapt_in(host)?;
    consume_view(&view);
    Ok(())
}

/// View over the process-wide 4×5×6 demo buffer
///
/// Every call returns a view over the same storage, which lives until
/// process exit. A host holding the exported view must not use it past
/// that point.
pub fn produce_view() -> Span3<'static> {
    DemoStorage::get().view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::adapt_out;

    #[test]
    fn test_add() {
        assert_eq!(add(2, 3), Some(5));
        assert_eq!(add(-7, 7), Some(0));
        assert_eq!(add(i64::MAX, 1), None);
    }

    #[test]
    fn test_describe_extents_format() {
        let buffer = vec![0.0f64; 6];
        let view = MdView::create(&buffer, [1, 2, 3]).unwrap();

        assert_eq!(
            describe_extents(&view),
            "Received mdspan with extents: [1, 2, 3]"
        );
    }

    #[test]
    fn test_consume_host_array_rank_two_fails() {
        let buffer = vec![0.0f64; 6];
        let host = adapt_out(MdView::create(&buffer, [2, 3]).unwrap());

        assert_eq!(
            consume_host_array(&host),
            Err(ViewError::RankMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
