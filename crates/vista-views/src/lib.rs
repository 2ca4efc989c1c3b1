#![forbid(unsafe_code)]

//! Presentation variants over the `vista-core` windowing engine.
//!
//! Three thin consumers of the same engine, each producing a layout plan a
//! host can render however it likes:
//!
//! - [`VirtualList`] - a flat single-column (or single-row) strip
//! - [`VirtualGrid`] - packs a fixed number of columns into virtual rows
//! - [`InfiniteList`] - a list with a trailing sentinel and a load-more
//!   trigger that fires as the window approaches the end of known data
//!
//! The variants own their engine instance and forward scroll, resize, and
//! measurement notifications to it; they never touch the host environment
//! themselves.

pub mod grid;
pub mod infinite;
pub mod list;

pub use grid::{GridLayout, GridRow, LayoutError, VirtualGrid};
pub use infinite::{InfiniteLayout, InfiniteList, LoadPhase, Sentinel};
pub use list::{ListLayout, VirtualList};
