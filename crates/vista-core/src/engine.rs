#![forbid(unsafe_code)]

//! The engine handle that hosts drive.
//!
//! [`Virtualizer`] bundles an [`ExtentTable`] with the viewport state owned
//! by the hosting surface: current scroll offset, viewport extent, overscan
//! margin, and scroll axis. The host adapter wires native scroll/resize
//! events to [`Virtualizer::notify_scroll`] / [`Virtualizer::notify_resize`]
//! and feeds measured item sizes back via
//! [`Virtualizer::record_measurement`]; the engine itself never touches the
//! environment (inversion of control keeps it portable and testable).
//!
//! Behavior is injected through [`EngineOptions`]: the per-index estimator
//! is a function value, not a trait hierarchy, so hosts can close over
//! whatever data they size items from.

use std::fmt;
use std::sync::Arc;

use crate::error::GeometryError;
use crate::extents::ExtentTable;
use crate::window::{VirtualItem, Window, compute_window, virtual_items};

/// Default per-item extent estimate, in layout units.
pub const DEFAULT_ESTIMATE: f64 = 50.0;
/// Default overscan margin, in items per side.
pub const DEFAULT_OVERSCAN: usize = 5;

type Estimator = Arc<dyn Fn(usize) -> f64 + Send + Sync>;

/// Configuration for a [`Virtualizer`].
///
/// ```
/// use vista_core::EngineOptions;
///
/// let options = EngineOptions::new()
///     .estimate(|i| if i == 0 { 120.0 } else { 40.0 })
///     .overscan(3)
///     .horizontal(true);
/// assert_eq!(options.overscan_items(), 3);
/// ```
#[derive(Clone)]
pub struct EngineOptions {
    estimate: Estimator,
    overscan: usize,
    horizontal: bool,
}

impl EngineOptions {
    /// Options with a uniform 50-unit estimate, overscan 5, vertical axis.
    #[must_use]
    pub fn new() -> Self {
        Self {
            estimate: Arc::new(|_| DEFAULT_ESTIMATE),
            overscan: DEFAULT_OVERSCAN,
            horizontal: false,
        }
    }

    /// Sets the per-index extent estimator.
    #[must_use]
    pub fn estimate(mut self, estimate: impl Fn(usize) -> f64 + Send + Sync + 'static) -> Self {
        self.estimate = Arc::new(estimate);
        self
    }

    /// Sets a uniform extent estimate for every index.
    #[must_use]
    pub fn uniform(self, extent: f64) -> Self {
        self.estimate(move |_| extent)
    }

    /// Sets the overscan margin (items realized beyond the visible range on
    /// each side). Zero is valid and means the exact visible range only.
    #[must_use]
    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Selects the horizontal axis (extents are widths, scroll is x).
    #[must_use]
    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    /// The configured overscan margin.
    #[must_use]
    pub fn overscan_items(&self) -> usize {
        self.overscan
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("overscan", &self.overscan)
            .field("horizontal", &self.horizontal)
            .finish_non_exhaustive()
    }
}

/// A windowed-rendering engine for one scrolling view.
///
/// Single-threaded and synchronous: every recomputation happens inline in
/// response to a notification, and identical state always yields an
/// identical window. One instance must not be shared between concurrently
/// rendering views; the extent table is exclusively owned.
pub struct Virtualizer {
    extents: ExtentTable,
    estimate: Estimator,
    overscan: usize,
    horizontal: bool,
    scroll_offset: f64,
    viewport_extent: f64,
}

impl Virtualizer {
    /// Creates an engine over `count` items.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidEstimate`] if the configured
    /// estimator yields a non-finite or non-positive extent for any index.
    pub fn new(count: usize, options: EngineOptions) -> Result<Self, GeometryError> {
        let EngineOptions {
            estimate,
            overscan,
            horizontal,
        } = options;
        let extents = ExtentTable::with_estimate(count, |i| estimate(i))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(count, overscan, horizontal, "virtualizer created");
        Ok(Self {
            extents,
            estimate,
            overscan,
            horizontal,
            scroll_offset: 0.0,
            viewport_extent: 0.0,
        })
    }

    /// Number of items the engine currently covers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.extents.len()
    }

    /// The configured overscan margin.
    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Whether the engine virtualizes along the horizontal axis.
    #[must_use]
    pub fn horizontal(&self) -> bool {
        self.horizontal
    }

    /// Last scroll position delivered by the host.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Last viewport extent delivered by the host.
    #[must_use]
    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Total extent of the content. Equals the sum of all item extents.
    pub fn total_extent(&mut self) -> f64 {
        self.extents.total_extent()
    }

    /// Shared access to the underlying extent table.
    #[must_use]
    pub fn extents(&self) -> &ExtentTable {
        &self.extents
    }

    /// Mutable access to the underlying extent table.
    pub fn extents_mut(&mut self) -> &mut ExtentTable {
        &mut self.extents
    }

    /// Records a measured extent for `index`.
    ///
    /// Late measurements for indices a shrink already dropped are absorbed
    /// silently; see [`ExtentTable::record`].
    pub fn record_measurement(&mut self, index: usize, extent: f64) {
        self.extents.record(index, extent);
    }

    /// Updates the scroll position. Non-finite positions are ignored.
    ///
    /// The position is clamped against the content extent during window
    /// computation, so momentum overscroll is safe to deliver as-is.
    pub fn notify_scroll(&mut self, position: f64) {
        if !position.is_finite() {
            #[cfg(feature = "tracing")]
            tracing::debug!(position, "non-finite scroll position ignored");
            return;
        }
        self.scroll_offset = position;
    }

    /// Updates the viewport extent. Non-finite extents are ignored.
    pub fn notify_resize(&mut self, viewport_extent: f64) {
        if !viewport_extent.is_finite() {
            #[cfg(feature = "tracing")]
            tracing::debug!(viewport_extent, "non-finite viewport extent ignored");
            return;
        }
        self.viewport_extent = viewport_extent;
    }

    /// Grows or shrinks the item count, reusing the configured estimator
    /// for appended entries.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidEstimate`] if the estimator yields a
    /// non-finite or non-positive extent for an appended index.
    pub fn resize(&mut self, new_count: usize) -> Result<(), GeometryError> {
        let estimate = Arc::clone(&self.estimate);
        self.extents.resize(new_count, |i| estimate(i))
    }

    /// Computes the current overscanned window.
    pub fn window(&mut self) -> Window {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!(
            "virtual_window",
            count = self.extents.len(),
            scroll = self.scroll_offset,
            viewport = self.viewport_extent,
            overscan = self.overscan
        )
        .entered();
        compute_window(
            &mut self.extents,
            self.scroll_offset,
            self.viewport_extent,
            self.overscan,
        )
    }

    /// Materializes the virtual items for the current window.
    ///
    /// Recomputed on demand from current state; the result is a plain
    /// snapshot, not a live view.
    pub fn virtual_items(&mut self) -> Vec<VirtualItem> {
        let window = self.window();
        virtual_items(&mut self.extents, &window)
    }
}

impl fmt::Debug for Virtualizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Virtualizer")
            .field("count", &self.extents.len())
            .field("overscan", &self.overscan)
            .field("horizontal", &self.horizontal)
            .field("scroll_offset", &self.scroll_offset)
            .field("viewport_extent", &self.viewport_extent)
            .finish_non_exhaustive()
    }
}
