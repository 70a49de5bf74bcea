//! Boundary adapter
//!
//! Converts views to and from the host representation at a call
//! boundary. Neither direction copies data.
//!
//! # Host-to-native (`adapt_in`)
//!
//! Checks, in order: element type, rank, contiguity/alignment, then shape
//! against capacity. The resulting view borrows the host's buffer; the
//! adapter does **not** extend the host object's lifetime.
//!
//! # Native-to-host (`adapt_out`)
//!
//! Wraps a view in a [`HostView`] over the same bytes. Once that wrapper is
//! handed to a host runtime, the native buffer must stay alive for as long
//! as the host uses it. Deallocating or reusing the storage first is
//! undefined behavior; nothing here can detect it. The FFI layer only
//! exports `'static` storage for this reason.

mod host;

pub use host::{HostArray, HostView};

use crate::core::Element;
use crate::view::{MdView, ViewError};

/// Adapt a host array into a native view of rank `R` over `T`
///
/// # Errors
///
/// - `ViewError::TypeMismatch` if the host element type is not `T`
/// - `ViewError::RankMismatch` if the host array does not have `R` dimensions
/// - `ViewError::Layout` if the host buffer is strided or misaligned
/// - `ViewError::Shape` if the shape does not fit the bytes provided
///
/// # Example
/// ```
/// use toto_core_rs::boundary::{adapt_in, adapt_out};
/// use toto_core_rs::MdView;
///
/// let buffer = vec![1.0f64; 120];
/// let host = adapt_out(MdView::create(&buffer, [4, 5, 6]).unwrap());
///
/// let view = adapt_in::<f64, 3, _>(&host).unwrap();
/// assert_eq!(view.extent(), [4, 5, 6]);
///
/// assert!(adapt_in::<f64, 2, _>(&host).is_err());
/// ```
pub fn adapt_in<T, const R: usize, H>(host: &H) -> Result<MdView<'_, T, R>, ViewError>
where
    T: Element,
    H: HostArray + ?Sized,
{
    if host.dtype() != T::DTYPE {
        log::warn!(
            "rejecting host array: expected {}, found {}",
            T::DTYPE,
            host.dtype()
        );
        return Err(ViewError::TypeMismatch {
            expected: T::DTYPE,
            found: host.dtype().to_string(),
        });
    }

    let extents: [usize; R] = host.shape().try_into().map_err(|_| {
        log::warn!(
            "rejecting host array: expected rank {}, found rank {}",
            R,
            host.ndim()
        );
        ViewError::RankMismatch {
            expected: R,
            found: host.ndim(),
        }
    })?;

    let (layout, bytes) = match (host.layout(), host.bytes()) {
        (Some(layout), Some(bytes)) => (layout, bytes),
        _ => return Err(ViewError::Layout("host array is not contiguous")),
    };

    let data: &[T] = bytemuck::try_cast_slice(bytes)
        .map_err(|_| ViewError::Layout("host buffer is misaligned for its element type"))?;

    let view = MdView::create_with_layout(data, extents, layout)?;
    log::debug!("adapted host array in: {}", view.info());
    Ok(view)
}

/// Expose a native view to the host without copying
///
/// The returned wrapper borrows the same buffer for `'a`.
pub fn adapt_out<T: Element, const R: usize>(view: MdView<'_, T, R>) -> HostView<'_> {
    log::debug!("adapting view out: {}", view.info());
    HostView::new(
        bytemuck::cast_slice(view.as_slice()),
        T::DTYPE,
        view.extent().to_vec(),
        view.strides().to_vec(),
        view.layout(),
    )
}

/// Convert host-supplied signed indices into a native index tuple
///
/// Host languages allow negative integers; they are rejected here with
/// `ViewError::Index` rather than wrapped. Upper bounds are checked by the
/// view on access.
///
/// # Errors
///
/// - `ViewError::RankMismatch` if `raw.len() != R`
/// - `ViewError::Index` for a negative component
pub fn host_index<const R: usize>(
    raw: &[i64],
    extents: &[usize; R],
) -> Result<[usize; R], ViewError> {
    if raw.len() != R {
        return Err(ViewError::RankMismatch {
            expected: R,
            found: raw.len(),
        });
    }

    let mut indices = [0usize; R];
    for (dim, (&index, &extent)) in raw.iter().zip(extents.iter()).enumerate() {
        indices[dim] =
            usize::try_from(index).map_err(|_| ViewError::Index { dim, index, extent })?;
    }
    Ok(indices)
}
