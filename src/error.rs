//! Error handling for the elastic-table crate.
//!
//! Every table-owned allocation (slot arrays, key/value copies, rebuild
//! scratch) goes through `Vec::try_reserve_exact`, so allocator exhaustion
//! surfaces as an error instead of aborting the process.

use std::collections::TryReserveError;

use thiserror::Error;

/// Error type for fallible table operations.
///
/// The table is left in a valid state whenever an error is returned: the
/// pre-operation state for a failed insert, or empty but usable after a
/// mid-rebuild allocation failure.
#[derive(Error, Debug)]
pub enum TableError {
    /// Memory could not be obtained from the allocator.
    #[error("memory allocation failed: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// Doubling the table would overflow the addressable slot count.
    #[error("capacity overflow: cannot grow table beyond {current} slots")]
    CapacityOverflow {
        /// Total capacity at the time growth was attempted
        current: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;
