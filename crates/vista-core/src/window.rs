#![forbid(unsafe_code)]

//! Visible-window selection over an [`ExtentTable`].
//!
//! Given a scroll position and viewport extent, [`compute_window`] locates
//! the contiguous index range of items whose spans intersect the viewport,
//! expands it symmetrically by an overscan margin, and derives the leading
//! and trailing padding extents that let a host reserve correct scrollable
//! space for everything it does not render.
//!
//! Range location is two binary searches over the offset cache, O(log n)
//! per recomputation, and the whole computation is a pure function of the
//! table and viewport state: identical inputs always produce an identical
//! window.
//!
//! Span intersection uses half-open intervals: an item whose span *ends*
//! exactly at the viewport top is out, an item whose span *starts* exactly
//! at the viewport bottom is out, and an item starting flush with the
//! viewport top is in.

use std::ops::Range;

use crate::extents::ExtentTable;

/// Transient descriptor for one item inside the rendered window.
///
/// Carries no identity beyond `index`; it is recomputed on every window
/// change and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualItem {
    /// Index into the underlying item sequence.
    pub index: usize,
    /// Offset of the item's leading edge from the start of the content.
    pub start: f64,
    /// Extent of the item along the scroll axis.
    pub size: f64,
}

impl VirtualItem {
    /// Offset of the item's trailing edge.
    #[inline]
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.size
    }
}

/// The overscanned visible range plus its padding extents.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    /// Overscanned `[lo, hi)` index range to realize.
    pub range: Range<usize>,
    /// Extent of all items before `range.start`.
    pub lead: f64,
    /// Extent of all items at or after `range.end`.
    pub trail: f64,
}

impl Window {
    /// An empty window with zero paddings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            range: 0..0,
            lead: 0.0,
            trail: 0.0,
        }
    }

    /// Number of items in the window.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Whether the window contains no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Computes the overscanned visible window for the given viewport state.
///
/// `scroll` is clamped to `[0, max(0, total - viewport)]` first, so
/// momentum overscroll can never produce negative paddings or out-of-range
/// indices. A zero or negative viewport extent degenerates to the single
/// item at the scroll position.
pub fn compute_window(
    extents: &mut ExtentTable,
    scroll: f64,
    viewport: f64,
    overscan: usize,
) -> Window {
    let n = extents.len();
    if n == 0 {
        return Window::empty();
    }

    let offsets = extents.offsets();
    let total = offsets[n];
    let viewport = viewport.max(0.0);
    let scroll = scroll.clamp(0.0, (total - viewport).max(0.0));

    // First item whose span ends after the viewport top. offsets[0] == 0
    // keeps the partition point >= 1 for any clamped scroll.
    let first = offsets
        .partition_point(|&p| p <= scroll)
        .saturating_sub(1)
        .min(n - 1);
    // Last item whose span starts before the viewport bottom.
    let last = offsets
        .partition_point(|&p| p < scroll + viewport)
        .saturating_sub(1)
        .min(n - 1)
        .max(first);

    let lo = first.saturating_sub(overscan);
    let hi = (last + 1 + overscan).min(n);

    Window {
        lead: offsets[lo],
        trail: total - offsets[hi],
        range: lo..hi,
    }
}

/// Materializes [`VirtualItem`]s for every index in `window.range`.
pub fn virtual_items(extents: &mut ExtentTable, window: &Window) -> Vec<VirtualItem> {
    let offsets = extents.offsets();
    window
        .range
        .clone()
        .map(|index| VirtualItem {
            index,
            start: offsets[index],
            size: offsets[index + 1] - offsets[index],
        })
        .collect()
}
