#![forbid(unsafe_code)]

//! Error types for engine configuration and direct geometry queries.
//!
//! Configuration problems (a bad estimate) surface eagerly at construction
//! or resize time; direct queries for out-of-range indices fail immediately
//! and are never silently clamped. Transient races (a measurement arriving
//! for an index that a shrink already dropped) are absorbed by
//! [`ExtentTable::record`](crate::ExtentTable::record) instead and never
//! reach this type.

use std::error::Error;
use std::fmt;

/// Error raised by the geometry layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// An estimator returned a non-finite or non-positive extent.
    InvalidEstimate {
        /// Index the estimator was asked about.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// A direct query addressed an index outside the valid range.
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of items in the table at query time.
        len: usize,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEstimate { index, value } => {
                write!(
                    f,
                    "estimate for item {index} must be a positive finite number, got {value}"
                )
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} items")
            }
        }
    }
}

impl Error for GeometryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_estimate() {
        let err = GeometryError::InvalidEstimate {
            index: 3,
            value: -1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("item 3"), "{msg}");
        assert!(msg.contains("-1"), "{msg}");
    }

    #[test]
    fn display_index_out_of_range() {
        let err = GeometryError::IndexOutOfRange { index: 10, len: 5 };
        assert_eq!(err.to_string(), "index 10 out of range for 5 items");
    }

    #[test]
    fn implements_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&GeometryError::IndexOutOfRange { index: 0, len: 0 });
    }
}
