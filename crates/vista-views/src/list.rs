#![forbid(unsafe_code)]

//! Flat virtualized list.

use vista_core::{EngineOptions, GeometryError, VirtualItem, Virtualizer};

/// Layout plan for one frame of a [`VirtualList`].
///
/// `lead` and `trail` are the spacer extents to reserve before and after the
/// realized items so the scrollable content keeps its full `total_extent`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListLayout {
    /// Items to realize, in index order.
    pub items: Vec<VirtualItem>,
    /// Spacer extent before the first realized item.
    pub lead: f64,
    /// Spacer extent after the last realized item.
    pub trail: f64,
    /// Full content extent.
    pub total_extent: f64,
}

/// A flat list view over a windowing engine.
///
/// ```
/// use vista_views::VirtualList;
///
/// let mut list = VirtualList::new(1_000);
/// list.notify_resize(300.0);
/// list.notify_scroll(500.0);
///
/// let layout = list.layout();
/// assert!(!layout.items.is_empty());
/// assert_eq!(layout.total_extent, 1_000.0 * 50.0);
/// ```
#[derive(Debug)]
pub struct VirtualList {
    engine: Virtualizer,
}

impl VirtualList {
    /// Creates a list over `count` items with default options (50-unit
    /// uniform estimate, overscan 5, vertical).
    #[must_use]
    pub fn new(count: usize) -> Self {
        let engine = Virtualizer::new(count, EngineOptions::new())
            .expect("default estimate is positive and finite");
        Self { engine }
    }

    /// Creates a list with explicit engine options.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidEstimate`] if the estimator yields a
    /// non-finite or non-positive extent for any index.
    pub fn with_options(count: usize, options: EngineOptions) -> Result<Self, GeometryError> {
        Ok(Self {
            engine: Virtualizer::new(count, options)?,
        })
    }

    /// Number of items.
    #[must_use]
    pub fn count(&self) -> usize {
        self.engine.count()
    }

    /// Updates the item count, keeping existing measurements.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidEstimate`] if growth hits a bad
    /// estimate.
    pub fn set_count(&mut self, count: usize) -> Result<(), GeometryError> {
        self.engine.resize(count)
    }

    /// Forwards a host scroll notification.
    pub fn notify_scroll(&mut self, position: f64) {
        self.engine.notify_scroll(position);
    }

    /// Forwards a host resize notification.
    pub fn notify_resize(&mut self, viewport_extent: f64) {
        self.engine.notify_resize(viewport_extent);
    }

    /// Records a post-render measurement for one item.
    pub fn record_measurement(&mut self, index: usize, extent: f64) {
        self.engine.record_measurement(index, extent);
    }

    /// The underlying engine.
    #[must_use]
    pub fn engine(&self) -> &Virtualizer {
        &self.engine
    }

    /// Mutable access to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut Virtualizer {
        &mut self.engine
    }

    /// Computes the layout plan for the current viewport state.
    pub fn layout(&mut self) -> ListLayout {
        let window = self.engine.window();
        let items = self.engine.virtual_items();
        ListLayout {
            items,
            lead: window.lead,
            trail: window.trail,
            total_extent: self.engine.total_extent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_at_origin_has_no_lead() {
        let mut list =
            VirtualList::with_options(100, EngineOptions::new().uniform(80.0)).unwrap();
        list.notify_resize(400.0);
        let layout = list.layout();
        assert_eq!(layout.lead, 0.0);
        assert_eq!(layout.items.first().map(|i| i.index), Some(0));
        assert_eq!(layout.total_extent, 8_000.0);
    }

    #[test]
    fn paddings_and_items_tile_the_content() {
        let mut list =
            VirtualList::with_options(300, EngineOptions::new().estimate(|i| (i % 5 + 1) as f64))
                .unwrap();
        list.notify_resize(40.0);
        list.notify_scroll(123.0);
        list.record_measurement(40, 9.5);

        let layout = list.layout();
        let span: f64 = layout.items.iter().map(|i| i.size).sum();
        let tiled = layout.lead + span + layout.trail;
        assert!(
            (tiled - layout.total_extent).abs() < 1e-9,
            "{tiled} vs {}",
            layout.total_extent
        );
    }

    #[test]
    fn empty_list_layout() {
        let mut list = VirtualList::new(0);
        list.notify_resize(400.0);
        let layout = list.layout();
        assert!(layout.items.is_empty());
        assert_eq!(layout.lead, 0.0);
        assert_eq!(layout.trail, 0.0);
        assert_eq!(layout.total_extent, 0.0);
    }

    #[test]
    fn set_count_grows_and_shrinks() {
        let mut list = VirtualList::new(10);
        list.set_count(25).unwrap();
        assert_eq!(list.count(), 25);
        list.set_count(5).unwrap();
        assert_eq!(list.count(), 5);
    }

    #[test]
    fn items_are_contiguous() {
        let mut list =
            VirtualList::with_options(200, EngineOptions::new().uniform(10.0)).unwrap();
        list.notify_resize(100.0);
        list.notify_scroll(950.0);
        let layout = list.layout();
        for pair in layout.items.windows(2) {
            assert_eq!(pair[0].index + 1, pair[1].index);
            assert_eq!(pair[0].end(), pair[1].start);
        }
    }
}
