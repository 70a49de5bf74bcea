//! Tests for the boundary adapter
//!
//! Host-to-native validation order, zero-copy round trips, and the
//! lifetime contract of exported views.

use toto_core_rs::boundary::{adapt_in, adapt_out, host_index, HostArray};
use toto_core_rs::{DType, Layout, MdView, ViewError};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Host array double with arbitrary metadata over a byte buffer
struct FakeHost {
    dtype: DType,
    shape: Vec<usize>,
    layout: Option<Layout>,
    bytes: Vec<u8>,
}

impl HostArray for FakeHost {
    fn dtype(&self) -> DType {
        self.dtype
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn layout(&self) -> Option<Layout> {
        self.layout
    }

    fn bytes(&self) -> Option<&[u8]> {
        self.layout.map(|_| self.bytes.as_slice())
    }
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_round_trip_preserves_shape_and_values() {
    init_logging();
    let buffer: Vec<f64> = (0..60).map(|i| i as f64 * 0.5).collect();
    let original = MdView::create(&buffer, [3, 4, 5]).unwrap();

    let host = adapt_out(original);
    let back = adapt_in::<f64, 3, _>(&host).unwrap();

    assert_eq!(back.extent(), original.extent());
    assert_eq!(back.rank(), original.rank());
    assert_eq!(back.as_slice(), original.as_slice());
    assert_eq!(back.as_ptr(), buffer.as_ptr());
}

#[test]
fn test_round_trip_column_major() {
    let buffer: Vec<i32> = (0..24).collect();
    let original = MdView::create_with_layout(&buffer, [2, 3, 4], Layout::ColumnMajor).unwrap();

    let host = adapt_out(original);
    let back = adapt_in::<i32, 3, _>(&host).unwrap();

    assert_eq!(back.layout(), Layout::ColumnMajor);
    assert_eq!(back.at([1, 2, 3]).unwrap(), original.at([1, 2, 3]).unwrap());
}

#[test]
fn test_adapt_out_exposes_metadata() {
    let buffer = vec![1.0f32; 20];
    let host = adapt_out(MdView::create(&buffer, [4, 5]).unwrap());

    assert_eq!(host.dtype(), DType::F32);
    assert_eq!(host.ndim(), 2);
    assert_eq!(host.shape(), &[4, 5]);
    assert_eq!(host.strides(), &[5, 1]);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_type_mismatch() {
    let buffer = vec![0i64; 120];
    let host = adapt_out(MdView::create(&buffer, [4, 5, 6]).unwrap());

    let err = adapt_in::<f64, 3, _>(&host).unwrap_err();
    assert_eq!(
        err,
        ViewError::TypeMismatch {
            expected: DType::F64,
            found: "int64".to_string()
        }
    );
}

#[test]
fn test_rank_mismatch() {
    let buffer = vec![0.0f64; 20];
    let host = adapt_out(MdView::create(&buffer, [4, 5]).unwrap());

    let err = adapt_in::<f64, 3, _>(&host).unwrap_err();
    assert_eq!(
        err,
        ViewError::RankMismatch {
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn test_strided_host_is_rejected() {
    let host = FakeHost {
        dtype: DType::U8,
        shape: vec![2, 2],
        layout: None,
        bytes: vec![0; 8],
    };

    assert!(matches!(
        adapt_in::<u8, 2, _>(&host),
        Err(ViewError::Layout(_))
    ));
}

#[test]
fn test_host_shape_larger_than_buffer() {
    let host = FakeHost {
        dtype: DType::U8,
        shape: vec![3, 3],
        layout: Some(Layout::RowMajor),
        bytes: vec![0; 8],
    };

    assert_eq!(
        adapt_in::<u8, 2, _>(&host).unwrap_err(),
        ViewError::Shape {
            extents: vec![3, 3],
            capacity: 8
        }
    );
}

#[test]
fn test_host_index_then_access() {
    let buffer: Vec<f64> = (0..24).map(f64::from).collect();
    let view = MdView::create(&buffer, [2, 3, 4]).unwrap();

    let indices = host_index(&[1, 2, 3], &view.extent()).unwrap();
    assert_eq!(*view.at(indices).unwrap(), 23.0);

    assert!(matches!(
        host_index(&[-1, 0, 0], &view.extent()),
        Err(ViewError::Index { dim: 0, index: -1, .. })
    ));
}

// ============================================================================
// Lifetime contract
// ============================================================================

/// The exported wrapper borrows the native buffer instead of copying it;
/// the borrow checker refuses to let it outlive the buffer.
#[test]
fn test_exported_wrapper_aliases_native_buffer() {
    let mut buffer = vec![0.0f64; 6];
    buffer[4] = 2.0;

    let host = adapt_out(MdView::create(&buffer, [2, 3]).unwrap());
    let seen = adapt_in::<f64, 2, _>(&host).unwrap();

    assert_eq!(*seen.at([1, 1]).unwrap(), 2.0);
    assert_eq!(host.as_ptr(), buffer.as_ptr() as *const u8);
}
