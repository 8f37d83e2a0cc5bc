//! Errors raised when caller data is converted into register-sized blocks.
//!
//! Register operations themselves never fail. Only the boundary between
//! arbitrary caller data and the fixed-shape types of this crate is fallible.

use thiserror::Error;

/// Conversion error at the edge of the register layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LaneError {
    /// A slice did not hold exactly one register's worth of lanes.
    #[error("expected {expected} lanes, got {actual}")]
    LengthMismatch {
        /// Lanes required by the register.
        expected: usize,
        /// Lanes supplied by the caller.
        actual: usize,
    },
    /// A mask lane was neither all-zeros nor all-ones.
    #[error("mask lane {lane} is a partial bit pattern")]
    PartialMask {
        /// Index of the first offending lane.
        lane: usize,
    },
}

/// Result alias for fallible conversions.
pub type Result<T> = core::result::Result<T, LaneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = LaneError::LengthMismatch {
            expected: 8,
            actual: 5,
        };
        assert_eq!(err.to_string(), "expected 8 lanes, got 5");

        let err = LaneError::PartialMask { lane: 3 };
        assert_eq!(err.to_string(), "mask lane 3 is a partial bit pattern");
    }
}
