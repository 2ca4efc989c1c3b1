#![forbid(unsafe_code)]

//! Size table with an exact prefix-sum offset cache.
//!
//! [`ExtentTable`] maps item index → extent along the scroll axis. Every
//! index starts out with an estimated extent and is overwritten, last write
//! wins, as real measurements arrive. Offsets are a derived projection:
//! `offset(i) = Σ_{k<i} extent(k)` and `total = offset(n)`.
//!
//! # Layout
//!
//! Extents live in a contiguous `Vec<f64>`. The offset cache is a second
//! `Vec<f64>` of length `n + 1` (`offsets[0] == 0.0`), refreshed lazily: a
//! write at index `i` lowers a dirty watermark to `i`, and the next read
//! resums forward from the watermark. Resumming is a pure left-fold with no
//! subtraction, so a cached `offsets[i]` is always bit-identical to summing
//! `extents[..i]` from scratch: offsets never drift, no matter how many
//! measurements interleave with queries.
//!
//! # Operations
//!
//! | Operation | Time |
//! |-----------|------|
//! | `with_estimate(n, f)` | O(n) |
//! | `record(i, extent)` | O(1), refresh deferred |
//! | `extent_at(i)` | O(1) |
//! | `offset_at(i)` / `total_extent()` | amortized O(n), O(1) when clean |
//! | `index_at_offset(x)` | O(log n) when clean |
//! | `resize(n', f)` | O(n') |
//!
//! # Invariants
//!
//! 1. `offset_at(0) == 0` and `offset_at(n) == total_extent()`.
//! 2. `offset_at(i)` equals the left-fold sum of `extents[..i]`, exactly.
//! 3. `resize` never reorders or renumbers surviving entries.
//! 4. Writes outside `[0, n)` are ignored, never fatal.

use crate::error::GeometryError;

/// Per-item extents plus cached cumulative offsets.
///
/// Extents are layout units along the scroll axis (heights for vertical
/// strips, widths for horizontal ones). The table owns no item data; it only
/// describes geometry for indices `0..len`.
#[derive(Debug, Clone)]
pub struct ExtentTable {
    /// Extent of each item; estimated until measured.
    extents: Vec<f64>,
    /// `offsets[i]` = sum of `extents[..i]`; length `extents.len() + 1`.
    offsets: Vec<f64>,
    /// Entries `offsets[0..=clean]` are valid; everything after is stale.
    clean: usize,
}

impl ExtentTable {
    /// Creates a table of `count` items, each initialized by `estimate`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidEstimate`] if the estimator produces
    /// a non-finite or non-positive extent for any index.
    pub fn with_estimate(
        count: usize,
        estimate: impl Fn(usize) -> f64,
    ) -> Result<Self, GeometryError> {
        let mut extents = Vec::with_capacity(count);
        for index in 0..count {
            extents.push(validated_estimate(index, &estimate)?);
        }
        let mut offsets = Vec::with_capacity(count + 1);
        offsets.push(0.0);
        Ok(Self {
            extents,
            offsets,
            clean: 0,
        })
    }

    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extents: Vec::new(),
            offsets: vec![0.0],
            clean: 0,
        }
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    /// Whether the table has no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Records a measured extent for `index`, last write wins.
    ///
    /// Out-of-range indices are ignored: measurement callbacks are delivered
    /// asynchronously by hosts and may race a shrink. Non-finite or negative
    /// extents are ignored for the same reason; zero is accepted because
    /// hosts legitimately measure collapsed items.
    pub fn record(&mut self, index: usize, extent: f64) {
        if index >= self.extents.len() {
            #[cfg(feature = "tracing")]
            tracing::trace!(index, len = self.extents.len(), "late measurement ignored");
            return;
        }
        if !extent.is_finite() || extent < 0.0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(index, extent, "non-finite or negative measurement ignored");
            return;
        }
        if self.extents[index] != extent {
            self.extents[index] = extent;
            self.clean = self.clean.min(index);
        }
    }

    /// Returns the current extent of `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::IndexOutOfRange`] for `index >= len`.
    pub fn extent_at(&self, index: usize) -> Result<f64, GeometryError> {
        self.extents
            .get(index)
            .copied()
            .ok_or(GeometryError::IndexOutOfRange {
                index,
                len: self.extents.len(),
            })
    }

    /// Returns the cumulative extent of all items strictly before `index`.
    ///
    /// Valid for `index` in `[0, len]`; `offset_at(len)` is the total extent.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::IndexOutOfRange`] for `index > len`.
    pub fn offset_at(&mut self, index: usize) -> Result<f64, GeometryError> {
        if index > self.extents.len() {
            return Err(GeometryError::IndexOutOfRange {
                index,
                len: self.extents.len(),
            });
        }
        Ok(self.offsets()[index])
    }

    /// Total extent of all items. Always equals `offset_at(len)`.
    pub fn total_extent(&mut self) -> f64 {
        *self
            .offsets()
            .last()
            .expect("offset cache always holds offsets[0]")
    }

    /// Largest index whose span starts at or before `offset`.
    ///
    /// Clamps to the valid range: negative offsets map to 0, offsets at or
    /// past the total extent map to the last index. Returns 0 for an empty
    /// table.
    pub fn index_at_offset(&mut self, offset: f64) -> usize {
        let n = self.extents.len();
        if n == 0 {
            return 0;
        }
        let offsets = self.offsets();
        // First entry strictly above `offset`; offsets[0] == 0 keeps j >= 1
        // for any non-negative probe.
        let j = offsets.partition_point(|&p| p <= offset);
        j.saturating_sub(1).min(n - 1)
    }

    /// Grows or shrinks the table to `new_count` items.
    ///
    /// Growth appends entries via `estimate`; shrink truncates and drops the
    /// trailing measurements. Surviving entries are never renumbered.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidEstimate`] if the estimator produces
    /// a non-finite or non-positive extent for an appended index.
    pub fn resize(
        &mut self,
        new_count: usize,
        estimate: impl Fn(usize) -> f64,
    ) -> Result<(), GeometryError> {
        let old = self.extents.len();
        if new_count < old {
            self.extents.truncate(new_count);
            self.offsets.truncate(new_count + 1);
            self.clean = self.clean.min(new_count);
            return Ok(());
        }
        for index in old..new_count {
            let extent = validated_estimate(index, &estimate)?;
            self.extents.push(extent);
        }
        Ok(())
    }

    /// Returns the full offset cache, refreshing stale entries first.
    ///
    /// The slice has length `len + 1`; entry `i` is `offset_at(i)`.
    pub(crate) fn offsets(&mut self) -> &[f64] {
        let n = self.extents.len();
        if self.clean < n {
            self.offsets.truncate(self.clean + 1);
            self.offsets.reserve(n - self.clean);
            let mut acc = self.offsets[self.clean];
            for &extent in &self.extents[self.clean..] {
                acc += extent;
                self.offsets.push(acc);
            }
            self.clean = n;
        }
        &self.offsets
    }
}

impl Default for ExtentTable {
    fn default() -> Self {
        Self::new()
    }
}

fn validated_estimate(
    index: usize,
    estimate: &impl Fn(usize) -> f64,
) -> Result<f64, GeometryError> {
    let value = estimate(index);
    if !value.is_finite() || value <= 0.0 {
        return Err(GeometryError::InvalidEstimate { index, value });
    }
    Ok(value)
}
