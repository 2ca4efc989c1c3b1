#![forbid(unsafe_code)]

//! Core windowed-rendering engine for large ordered collections.
//!
//! This crate virtualizes a dense strip of items indexed `0..count`: it
//! tracks per-item extents (estimated until measured), derives exact
//! prefix-sum offsets, and computes the contiguous index window that is
//! visible or near-visible for a given scroll position and viewport extent,
//! together with the leading/trailing padding that keeps scrollbar geometry
//! correct without rendering every item.
//!
//! # Core Types
//!
//! - [`ExtentTable`] - size table plus exact prefix-sum offset cache
//! - [`Window`] / [`compute_window`] - overscanned visible range + paddings
//! - [`VirtualItem`] - transient `{index, start, size}` descriptor
//! - [`Virtualizer`] / [`EngineOptions`] - the engine handle hosts drive
//!
//! The engine is headless and host-driven: wire native scroll/resize events
//! to [`Virtualizer::notify_scroll`] / [`Virtualizer::notify_resize`] and
//! feed post-render measurements back via
//! [`Virtualizer::record_measurement`]. All recomputation is synchronous,
//! cheap (O(log n) range location), and idempotent; one engine instance
//! serves exactly one scrolling view.
//!
//! # Example
//!
//! ```
//! use vista_core::{EngineOptions, Virtualizer};
//!
//! // 10_000 rows, each estimated at 80 units, viewport of 400 units.
//! let mut engine = Virtualizer::new(
//!     10_000,
//!     EngineOptions::new().uniform(80.0),
//! ).unwrap();
//! engine.notify_resize(400.0);
//!
//! let items = engine.virtual_items();
//! assert_eq!(items.first().map(|i| i.index), Some(0));
//! assert_eq!(engine.total_extent(), 800_000.0);
//! ```

pub mod engine;
pub mod error;
pub mod extents;
pub mod window;

pub use engine::{EngineOptions, Virtualizer};
pub use error::GeometryError;
pub use extents::ExtentTable;
pub use window::{VirtualItem, Window, compute_window};
