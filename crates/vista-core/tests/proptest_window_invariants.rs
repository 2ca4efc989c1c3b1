//! Property-based invariant tests for the extent table and window selection.
//!
//! These tests verify invariants that must hold for any item geometry and
//! any viewport state:
//!
//! 1. Cached offsets are bit-identical to a naive left-fold sum.
//! 2. Offset endpoints: offset(0) = 0 and offset(n) = total.
//! 3. The window range is valid and non-empty for a non-empty table.
//! 4. With zero overscan the range is exactly the items intersecting the
//!    clamped viewport.
//! 5. Lead + realized span + trail tiles the total extent.
//! 6. Window computation is idempotent.
//! 7. Growing the overscan never shrinks the range.
//! 8. Extreme scroll positions never panic and never produce negative
//!    paddings.
//! 9. index_at_offset agrees with the window's first item.
//! 10. Resize keeps surviving offsets unchanged.

use proptest::prelude::*;
use vista_core::{ExtentTable, compute_window};

// ── Helpers ─────────────────────────────────────────────────────────────

/// Positive, finite starting extents.
fn extents_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..500.0, 1..200)
}

/// Measurement batches: (index, extent) pairs, extents may be zero.
fn measurements_strategy(max_len: usize) -> impl Strategy<Value = Vec<(usize, f64)>> {
    prop::collection::vec((0..max_len, 0.0f64..500.0), 0..50)
}

fn table_from(extents: &[f64]) -> ExtentTable {
    ExtentTable::with_estimate(extents.len(), |i| extents[i])
        .expect("strategy produces positive finite extents")
}

fn viewport_strategy() -> impl Strategy<Value = (f64, f64, usize)> {
    (-1_000.0f64..200_000.0, 0.0f64..5_000.0, 0usize..20)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Cached offsets are bit-identical to a naive left-fold sum
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offsets_match_naive_left_fold(
        extents in extents_strategy(),
        updates in measurements_strategy(200),
    ) {
        let mut table = table_from(&extents);
        // Interleave queries with writes to exercise the dirty watermark.
        for (k, &(index, extent)) in updates.iter().enumerate() {
            table.record(index, extent);
            if k % 3 == 0 {
                let _ = table.total_extent();
            }
        }

        let mut acc = 0.0f64;
        for i in 0..table.len() {
            let cached = table.offset_at(i).unwrap();
            prop_assert_eq!(
                cached.to_bits(),
                acc.to_bits(),
                "offset at {} drifted: cached {} vs naive {}",
                i, cached, acc
            );
            acc += table.extent_at(i).unwrap();
        }
        prop_assert_eq!(table.total_extent().to_bits(), acc.to_bits());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Offset endpoints
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_endpoints(extents in extents_strategy()) {
        let mut table = table_from(&extents);
        prop_assert_eq!(table.offset_at(0).unwrap(), 0.0);
        let n = table.len();
        let total = table.total_extent();
        prop_assert_eq!(table.offset_at(n).unwrap(), total);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Window range is valid and non-empty
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn window_range_is_valid(
        extents in extents_strategy(),
        (scroll, viewport, overscan) in viewport_strategy(),
    ) {
        let mut table = table_from(&extents);
        let window = compute_window(&mut table, scroll, viewport, overscan);
        prop_assert!(window.range.start < window.range.end);
        prop_assert!(window.range.end <= table.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Zero overscan selects exactly the intersecting items
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn exact_range_matches_span_intersection(
        extents in extents_strategy(),
        (scroll, viewport, _) in viewport_strategy(),
    ) {
        let mut table = table_from(&extents);
        let total = table.total_extent();
        let viewport = viewport.max(0.0);
        let clamped = scroll.clamp(0.0, (total - viewport).max(0.0));
        let window = compute_window(&mut table, scroll, viewport, 0);

        let top = clamped;
        let bottom = clamped + viewport;
        for i in 0..table.len() {
            let start = table.offset_at(i).unwrap();
            let end = table.offset_at(i + 1).unwrap();
            if start < bottom && end > top {
                // Half-open span intersection: in.
                prop_assert!(
                    window.range.contains(&i),
                    "item {} spans [{start}, {end}) inside viewport [{top}, {bottom}) \
                     but range is {:?}",
                    i, window.range
                );
            } else if end < top || start > bottom {
                // Strictly outside: out. Boundary ties (flush edges,
                // degenerate viewports) are pinned down by unit tests.
                prop_assert!(
                    !window.range.contains(&i),
                    "item {} spans [{start}, {end}) outside viewport [{top}, {bottom}) \
                     but range is {:?}",
                    i, window.range
                );
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Lead + span + trail tiles the total extent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn paddings_tile_the_content(
        extents in extents_strategy(),
        updates in measurements_strategy(200),
        (scroll, viewport, overscan) in viewport_strategy(),
    ) {
        let mut table = table_from(&extents);
        for &(index, extent) in &updates {
            table.record(index, extent);
        }
        let total = table.total_extent();
        let window = compute_window(&mut table, scroll, viewport, overscan);
        let span = table.offset_at(window.range.end).unwrap()
            - table.offset_at(window.range.start).unwrap();
        let sum = window.lead + span + window.trail;
        prop_assert!(
            (sum - total).abs() <= 1e-9 * total.max(1.0),
            "lead {} + span {} + trail {} != total {}",
            window.lead, span, window.trail, total
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Window computation is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn recomputation_is_idempotent(
        extents in extents_strategy(),
        (scroll, viewport, overscan) in viewport_strategy(),
    ) {
        let mut table = table_from(&extents);
        let a = compute_window(&mut table, scroll, viewport, overscan);
        let b = compute_window(&mut table, scroll, viewport, overscan);
        prop_assert_eq!(a, b);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Growing the overscan never shrinks the range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overscan_is_monotone(
        extents in extents_strategy(),
        (scroll, viewport, overscan) in viewport_strategy(),
    ) {
        let mut table = table_from(&extents);
        let tight = compute_window(&mut table, scroll, viewport, overscan);
        let wide = compute_window(&mut table, scroll, viewport, overscan + 3);
        prop_assert!(wide.range.start <= tight.range.start);
        prop_assert!(wide.range.end >= tight.range.end);
        prop_assert!(wide.lead <= tight.lead);
        prop_assert!(wide.trail <= tight.trail);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Extreme scroll positions are harmless
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn extreme_scroll_never_panics(
        extents in extents_strategy(),
        scroll in prop_oneof![
            Just(f64::MIN),
            Just(f64::MAX),
            Just(-1e300),
            Just(1e300),
            -1e9f64..1e9,
        ],
        viewport in 0.0f64..5_000.0,
    ) {
        let mut table = table_from(&extents);
        let window = compute_window(&mut table, scroll, viewport, 5);
        prop_assert!(window.lead >= 0.0);
        prop_assert!(window.trail >= 0.0);
        prop_assert!(window.range.end <= table.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. index_at_offset agrees with the window's first item
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn index_at_offset_agrees_with_window(
        extents in extents_strategy(),
        scroll in 0.0f64..100_000.0,
    ) {
        let mut table = table_from(&extents);
        let total = table.total_extent();
        // Zero viewport, zero overscan: the window is exactly the anchor
        // item, which index_at_offset must also find.
        let window = compute_window(&mut table, scroll, 0.0, 0);
        let clamped = scroll.clamp(0.0, total);
        prop_assert_eq!(window.range.start, table.index_at_offset(clamped));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 10. Resize keeps surviving offsets unchanged
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resize_preserves_surviving_offsets(
        extents in extents_strategy(),
        new_count in 0usize..300,
    ) {
        let mut table = table_from(&extents);
        let keep = new_count.min(table.len());
        let before: Vec<f64> = (0..=keep).map(|i| table.offset_at(i).unwrap()).collect();

        table.resize(new_count, |_| 33.0).unwrap();
        for (i, &expected) in before.iter().enumerate() {
            prop_assert_eq!(
                table.offset_at(i).unwrap().to_bits(),
                expected.to_bits(),
                "offset at {} changed across resize", i
            );
        }
    }
}
