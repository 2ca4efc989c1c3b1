#![forbid(unsafe_code)]

//! Column-packed virtualized grid.
//!
//! The grid reuses the windowing engine at *row* granularity: a flat
//! sequence of `item_count` items becomes `ceil(item_count / columns)`
//! virtual rows, each with one extent (rows are measured as a unit, not per
//! cell). Each realized row fans out into up to `columns` item slots; slots
//! whose underlying index falls past the end of the sequence are skipped,
//! so a trailing short row exposes only the items that exist.

use std::error::Error;
use std::fmt;
use std::ops::Range;

use vista_core::{EngineOptions, GeometryError, Virtualizer};

/// Default number of columns.
pub const DEFAULT_COLUMNS: usize = 4;
/// Default row extent estimate, in layout units.
pub const DEFAULT_ROW_ESTIMATE: f64 = 200.0;

/// Error raised by view-layer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// A grid was configured with zero columns.
    InvalidColumnCount {
        /// The offending column count.
        columns: usize,
    },
    /// The embedded engine rejected its configuration.
    Geometry(GeometryError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColumnCount { columns } => {
                write!(f, "grid requires at least one column, got {columns}")
            }
            Self::Geometry(err) => err.fmt(f),
        }
    }
}

impl Error for LayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::InvalidColumnCount { .. } => None,
        }
    }
}

impl From<GeometryError> for LayoutError {
    fn from(err: GeometryError) -> Self {
        Self::Geometry(err)
    }
}

/// One realized grid row.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    /// Row index in `[0, ceil(item_count / columns))`.
    pub row: usize,
    /// Offset of the row's leading edge.
    pub start: f64,
    /// Extent of the row.
    pub size: f64,
    /// Underlying item indices occupying this row's slots, left to right.
    /// Shorter than `columns` only for the trailing row.
    pub items: Range<usize>,
}

/// Layout plan for one frame of a [`VirtualGrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Rows to realize, in row order.
    pub rows: Vec<GridRow>,
    /// Spacer extent before the first realized row.
    pub lead: f64,
    /// Spacer extent after the last realized row.
    pub trail: f64,
    /// Full content extent.
    pub total_extent: f64,
}

/// A grid view packing `columns` items per virtual row.
///
/// ```
/// use vista_views::VirtualGrid;
///
/// let mut grid = VirtualGrid::new(41, 4).unwrap();
/// grid.notify_resize(600.0);
/// assert_eq!(grid.row_count(), 11);
/// ```
#[derive(Debug)]
pub struct VirtualGrid {
    engine: Virtualizer,
    columns: usize,
    item_count: usize,
}

fn row_count_for(item_count: usize, columns: usize) -> usize {
    item_count.div_ceil(columns)
}

impl VirtualGrid {
    /// Creates a grid with the default uniform row estimate.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidColumnCount`] for `columns < 1`.
    pub fn new(item_count: usize, columns: usize) -> Result<Self, LayoutError> {
        Self::with_options(
            item_count,
            columns,
            EngineOptions::new().uniform(DEFAULT_ROW_ESTIMATE),
        )
    }

    /// Creates a grid with explicit engine options.
    ///
    /// The options' estimator is per *row*, not per item.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidColumnCount`] for `columns < 1`, or a
    /// wrapped [`GeometryError`] if the row estimator misbehaves.
    pub fn with_options(
        item_count: usize,
        columns: usize,
        options: EngineOptions,
    ) -> Result<Self, LayoutError> {
        if columns < 1 {
            return Err(LayoutError::InvalidColumnCount { columns });
        }
        let engine = Virtualizer::new(row_count_for(item_count, columns), options)?;
        Ok(Self {
            engine,
            columns,
            item_count,
        })
    }

    /// Number of underlying items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of columns per row.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of virtual rows (`ceil(item_count / columns)`).
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.engine.count()
    }

    /// Updates the underlying item count; the row table grows or shrinks
    /// accordingly, keeping measurements for surviving rows.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`GeometryError`] if row growth hits a bad
    /// estimate.
    pub fn set_item_count(&mut self, item_count: usize) -> Result<(), LayoutError> {
        self.item_count = item_count;
        self.engine
            .resize(row_count_for(item_count, self.columns))?;
        Ok(())
    }

    /// Forwards a host scroll notification.
    pub fn notify_scroll(&mut self, position: f64) {
        self.engine.notify_scroll(position);
    }

    /// Forwards a host resize notification.
    pub fn notify_resize(&mut self, viewport_extent: f64) {
        self.engine.notify_resize(viewport_extent);
    }

    /// Records a measured extent for one *row*.
    pub fn record_row_measurement(&mut self, row: usize, extent: f64) {
        self.engine.record_measurement(row, extent);
    }

    /// The underlying row-granular engine.
    #[must_use]
    pub fn engine(&self) -> &Virtualizer {
        &self.engine
    }

    /// Computes the layout plan for the current viewport state.
    pub fn layout(&mut self) -> GridLayout {
        let window = self.engine.window();
        let rows = self
            .engine
            .virtual_items()
            .into_iter()
            .map(|row| {
                let first = row.index * self.columns;
                let last = (first + self.columns).min(self.item_count);
                GridRow {
                    row: row.index,
                    start: row.start,
                    size: row.size,
                    items: first..last,
                }
            })
            .collect();
        GridLayout {
            rows,
            lead: window.lead,
            trail: window.trail,
            total_extent: self.engine.total_extent(),
        }
    }
}
