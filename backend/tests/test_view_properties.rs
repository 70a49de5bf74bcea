//! Property-based tests for views and the boundary adapter

use proptest::prelude::*;
use toto_core_rs::boundary::{adapt_in, adapt_out};
use toto_core_rs::{Layout, MdView, ViewError};

fn extents_3d() -> impl Strategy<Value = [usize; 3]> {
    [0usize..8, 0usize..8, 0usize..8]
}

fn layout() -> impl Strategy<Value = Layout> {
    prop_oneof![Just(Layout::RowMajor), Just(Layout::ColumnMajor)]
}

proptest! {
    #[test]
    fn prop_create_succeeds_when_buffer_is_large_enough(
        extents in extents_3d(),
        slack in 0usize..16,
    ) {
        let required = extents.iter().product::<usize>();
        let buffer = vec![0.0f64; required + slack];
        let view = MdView::create(&buffer, extents).unwrap();

        prop_assert_eq!(view.total_size(), required);
        prop_assert_eq!(view.extent(), extents);
    }

    #[test]
    fn prop_create_fails_when_buffer_is_too_small(
        extents in [1usize..8, 1usize..8, 1usize..8],
        deficit in 1usize..8,
    ) {
        let required = extents.iter().product::<usize>();
        let capacity = required.saturating_sub(deficit);
        let buffer = vec![0.0f64; capacity];

        let result = MdView::create(&buffer, extents);
        prop_assert!(
            matches!(result, Err(ViewError::Shape { .. })),
            "expected shape error, got {:?}",
            result
        );
    }

    #[test]
    fn prop_at_matches_manual_row_major_offset(
        extents in [1usize..8, 1usize..8, 1usize..8],
        seed in any::<[usize; 3]>(),
    ) {
        let buffer: Vec<f64> = (0..extents.iter().product::<usize>()).map(|i| i as f64).collect();
        let view = MdView::create(&buffer, extents).unwrap();
        let indices = [seed[0] % extents[0], seed[1] % extents[1], seed[2] % extents[2]];

        let manual = indices[0] * extents[1] * extents[2] + indices[1] * extents[2] + indices[2];
        prop_assert!(std::ptr::eq(view.at(indices).unwrap(), &buffer[manual]));
    }

    #[test]
    fn prop_any_component_at_or_past_extent_is_index_error(
        extents in [1usize..8, 1usize..8, 1usize..8],
        dim in 0usize..3,
        past in 0usize..4,
    ) {
        let buffer = vec![0.0f64; extents.iter().product::<usize>()];
        let view = MdView::create(&buffer, extents).unwrap();

        let mut indices = [0usize; 3];
        indices[dim] = extents[dim] + past;

        let result = view.at(indices);
        prop_assert!(
            matches!(result, Err(ViewError::Index { dim: d, .. }) if d == dim),
            "expected index error in dimension {}, got {:?}",
            dim,
            result
        );
    }

    #[test]
    fn prop_round_trip_through_host(
        extents in extents_3d(),
        layout in layout(),
    ) {
        let buffer: Vec<f64> = (0..extents.iter().product::<usize>()).map(|i| i as f64).collect();
        let original = MdView::create_with_layout(&buffer, extents, layout).unwrap();

        let host = adapt_out(original);
        let back = adapt_in::<f64, 3, _>(&host).unwrap();

        prop_assert_eq!(back.extent(), original.extent());
        prop_assert_eq!(back.rank(), original.rank());
        prop_assert_eq!(back.layout(), original.layout());
        prop_assert_eq!(back.as_slice(), original.as_slice());
    }
}
