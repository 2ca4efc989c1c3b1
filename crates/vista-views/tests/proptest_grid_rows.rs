//! Property-based tests for grid row packing.
//!
//! 1. Realized rows carry contiguous, in-bounds item ranges.
//! 2. Every row except the last is full; the last is never empty.
//! 3. Row geometry tiles the content together with the paddings.

use proptest::prelude::*;
use vista_core::EngineOptions;
use vista_views::VirtualGrid;

fn grid_strategy() -> impl Strategy<Value = (usize, usize, f64, f64)> {
    (0usize..2_000, 1usize..12, 0.0f64..200_000.0, 50.0f64..2_000.0)
}

proptest! {
    #[test]
    fn row_ranges_are_contiguous_and_in_bounds(
        (item_count, columns, scroll, viewport) in grid_strategy(),
    ) {
        let mut grid = VirtualGrid::new(item_count, columns).unwrap();
        grid.notify_resize(viewport);
        grid.notify_scroll(scroll);
        let layout = grid.layout();

        for pair in layout.rows.windows(2) {
            prop_assert_eq!(pair[0].row + 1, pair[1].row);
            prop_assert_eq!(pair[0].items.end, pair[1].items.start);
        }
        for row in &layout.rows {
            prop_assert_eq!(row.items.start, row.row * columns);
            prop_assert!(row.items.end <= item_count);
            prop_assert!(!row.items.is_empty());
        }
    }

    #[test]
    fn only_the_last_row_is_short(
        (item_count, columns, scroll, viewport) in grid_strategy(),
    ) {
        let mut grid = VirtualGrid::new(item_count, columns).unwrap();
        grid.notify_resize(viewport);
        grid.notify_scroll(scroll);
        let last_row = grid.row_count().saturating_sub(1);

        for row in &grid.layout().rows {
            if row.row < last_row {
                prop_assert_eq!(
                    row.items.len(), columns,
                    "interior row {} is short", row.row
                );
            }
        }
    }

    #[test]
    fn rows_and_paddings_tile_the_content(
        (item_count, columns, scroll, viewport) in grid_strategy(),
    ) {
        let mut grid = VirtualGrid::with_options(
            item_count,
            columns,
            EngineOptions::new().estimate(|row| (row % 5 + 1) as f64 * 60.0),
        )
        .unwrap();
        grid.notify_resize(viewport);
        grid.notify_scroll(scroll);
        let layout = grid.layout();

        let span: f64 = layout.rows.iter().map(|r| r.size).sum();
        let tiled = layout.lead + span + layout.trail;
        prop_assert!(
            (tiled - layout.total_extent).abs() <= 1e-9 * layout.total_extent.max(1.0),
            "lead {} + rows {} + trail {} != total {}",
            layout.lead, span, layout.trail, layout.total_extent
        );
    }
}
