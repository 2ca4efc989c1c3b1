#![forbid(unsafe_code)]

//! Infinite list with a trailing sentinel and load-more trigger.
//!
//! While more pages may exist, the engine covers one phantom index past the
//! known items. When the overscanned window's trailing edge reaches the last
//! known item, the view fires its `load_more` callback exactly once and
//! enters [`LoadPhase::LoadingMore`]; the caller later resolves the load by
//! updating the item count or clearing the loading flag, which re-arms the
//! trigger.
//!
//! The callback is fire-and-forget: the view never retries, times out, or
//! cancels a load. That lifecycle belongs entirely to the caller.

use std::fmt;

use vista_core::{EngineOptions, GeometryError, VirtualItem, Virtualizer};

/// Whether a load-more dispatch is currently outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No dispatch outstanding; the trigger is armed.
    #[default]
    Idle,
    /// `load_more` fired and the caller has not resolved it yet.
    LoadingMore,
}

/// What the trailing sentinel row should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// A load is in flight (or was just requested): show a busy indicator.
    Loading,
    /// No further pages: show an end-of-data marker.
    End,
}

/// Layout plan for one frame of an [`InfiniteList`].
#[derive(Debug, Clone, PartialEq)]
pub struct InfiniteLayout {
    /// Known items to realize, in index order.
    pub items: Vec<VirtualItem>,
    /// The phantom trailing row, when it falls inside the window.
    pub sentinel: Option<(VirtualItem, Sentinel)>,
    /// Spacer extent before the first realized row.
    pub lead: f64,
    /// Spacer extent after the last realized row.
    pub trail: f64,
    /// Full content extent, including the phantom row while present.
    pub total_extent: f64,
}

/// A list view that grows as the user approaches the end of known data.
pub struct InfiniteList {
    engine: Virtualizer,
    item_count: usize,
    has_next_page: bool,
    is_loading: bool,
    phase: LoadPhase,
    load_more: Option<Box<dyn FnMut()>>,
}

impl InfiniteList {
    /// Creates an infinite list over `count` known items with default
    /// engine options.
    #[must_use]
    pub fn new(count: usize, has_next_page: bool) -> Self {
        Self::with_options(count, has_next_page, EngineOptions::new())
            .expect("default estimate is positive and finite")
    }

    /// Creates an infinite list with explicit engine options.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidEstimate`] if the estimator yields a
    /// non-finite or non-positive extent for any index (the phantom row is
    /// estimated like any other).
    pub fn with_options(
        count: usize,
        has_next_page: bool,
        options: EngineOptions,
    ) -> Result<Self, GeometryError> {
        let engine = Virtualizer::new(count + usize::from(has_next_page), options)?;
        Ok(Self {
            engine,
            item_count: count,
            has_next_page,
            is_loading: false,
            phase: LoadPhase::Idle,
            load_more: None,
        })
    }

    /// Installs the load-more callback.
    pub fn on_load_more(&mut self, callback: impl FnMut() + 'static) {
        self.load_more = Some(Box::new(callback));
    }

    /// Number of known items (excluding the phantom row).
    #[must_use]
    pub fn count(&self) -> usize {
        self.item_count
    }

    /// Whether more pages may exist.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// The caller-owned loading flag.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Current dispatch phase.
    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Updates the known item count, typically after a page arrives.
    ///
    /// Re-arms the load-more trigger: new data means the previous dispatch
    /// is resolved.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidEstimate`] if growth hits a bad
    /// estimate.
    pub fn set_count(&mut self, count: usize) -> Result<(), GeometryError> {
        self.item_count = count;
        self.phase = LoadPhase::Idle;
        self.sync_engine_count()
    }

    /// Mirrors the caller's loading flag. Clearing it re-arms the trigger.
    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
        if !is_loading {
            self.phase = LoadPhase::Idle;
        }
    }

    /// Updates whether more pages may exist, adding or removing the phantom
    /// row.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidEstimate`] if adding the phantom row
    /// hits a bad estimate.
    pub fn set_has_next_page(&mut self, has_next_page: bool) -> Result<(), GeometryError> {
        self.has_next_page = has_next_page;
        self.sync_engine_count()
    }

    /// Forwards a host scroll notification.
    pub fn notify_scroll(&mut self, position: f64) {
        self.engine.notify_scroll(position);
    }

    /// Forwards a host resize notification.
    pub fn notify_resize(&mut self, viewport_extent: f64) {
        self.engine.notify_resize(viewport_extent);
    }

    /// Records a post-render measurement for one known item (or the phantom
    /// row at index `count`).
    pub fn record_measurement(&mut self, index: usize, extent: f64) {
        self.engine.record_measurement(index, extent);
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &Virtualizer {
        &self.engine
    }

    fn sync_engine_count(&mut self) -> Result<(), GeometryError> {
        self.engine
            .resize(self.item_count + usize::from(self.has_next_page))
    }

    /// Computes the layout plan and, when the trailing edge of the window
    /// has reached the last known item, fires `load_more`, at most once
    /// until the caller resolves the dispatch.
    pub fn layout(&mut self) -> InfiniteLayout {
        let window = self.engine.window();
        let realized = self.engine.virtual_items();

        if self.has_next_page
            && !self.is_loading
            && self.phase == LoadPhase::Idle
            && window.range.end >= self.item_count
        {
            self.phase = LoadPhase::LoadingMore;
            #[cfg(feature = "tracing")]
            tracing::debug!(count = self.item_count, "load-more trigger fired");
            if let Some(callback) = &mut self.load_more {
                callback();
            }
        }

        // The phantom row is the engine's last index; it is realized only
        // when the window reaches it.
        let mut items = realized;
        let sentinel = if self.has_next_page
            && items.last().is_some_and(|item| item.index == self.item_count)
        {
            items.pop().map(|item| (item, self.sentinel_kind()))
        } else {
            None
        };

        InfiniteLayout {
            items,
            sentinel,
            lead: window.lead,
            trail: window.trail,
            total_extent: self.engine.total_extent(),
        }
    }

    /// What the trailing row should display right now. [`Sentinel::End`]
    /// only appears once the caller reports no further pages; hosts that
    /// keep a tail row after the phantom is dropped can query this directly.
    #[must_use]
    pub fn sentinel_kind(&self) -> Sentinel {
        if self.has_next_page {
            Sentinel::Loading
        } else {
            Sentinel::End
        }
    }
}

impl fmt::Debug for InfiniteList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfiniteList")
            .field("item_count", &self.item_count)
            .field("has_next_page", &self.has_next_page)
            .field("is_loading", &self.is_loading)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
