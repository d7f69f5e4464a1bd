//! # Elastic Table
//!
//! A byte-keyed hash table implementing elastic hashing: the slot space is
//! split into geometrically decreasing sub-arrays, and insertions cascade
//! from the largest level to the smallest, with each level's probe count
//! bounded by a budget derived from its fill. Deletions leave tombstones;
//! rebuilds (doubling on load, compacting on tombstone accumulation) move
//! the stored buffers into the new layout without copying their bytes.
//!
//! Keys and values are arbitrary byte strings; the table owns copies of
//! both. Lookups hand back borrowed slices, so reading across a mutation
//! is ruled out by the borrow checker rather than by convention.
//!
//! ## Basic Usage
//!
//! ```rust
//! use elastic_table::ElasticTable;
//!
//! # fn main() -> Result<(), elastic_table::TableError> {
//! let mut table = ElasticTable::with_capacity(256)?;
//!
//! // Insert values
//! table.insert(b"apple", b"1")?;
//! table.insert(b"banana", b"2")?;
//!
//! // Retrieve values
//! assert_eq!(table.get(b"apple"), Some(&b"1"[..]));
//!
//! // Update values
//! table.insert(b"apple", b"10")?;
//! assert_eq!(table.get(b"apple"), Some(&b"10"[..]));
//! assert_eq!(table.len(), 2);
//!
//! // Remove values
//! assert!(table.remove(b"apple"));
//! assert_eq!(table.get(b"apple"), None);
//! # Ok(())
//! # }
//! ```
//!
//! ## Level diagnostics
//!
//! ```rust
//! use elastic_table::ElasticTable;
//!
//! # fn main() -> Result<(), elastic_table::TableError> {
//! let mut table = ElasticTable::with_capacity(1024)?;
//! for i in 0..500u32 {
//!     table.insert(i.to_string().as_bytes(), b"v")?;
//! }
//!
//! // Level 0 is the largest and fills first; later levels absorb the rest.
//! let stats = table.level_stats();
//! assert_eq!(stats.iter().map(|s| s.capacity).sum::<usize>(), table.capacity());
//! assert_eq!(stats.iter().map(|s| s.live).sum::<usize>(), table.len());
//! assert!(stats[0].live >= stats[stats.len() - 1].live);
//! # Ok(())
//! # }
//! ```

/// Error types for fallible table operations
mod error;
/// Deterministic salted hashing for probe sequences
mod hash;
/// Sub-arrays, slots, and the geometric layout builder
mod level;
/// The elastic hash table and its iterator
mod table;
/// Utility functions and traits for the table
mod utils;

pub use error::{Result, TableError};
pub use table::{
    ElasticTable, Iter, LevelStats, DEFAULT_MAX_LOAD, DEFAULT_MIN_LEVEL_SIZE,
    DEFAULT_TOMBSTONE_RATIO, MIN_CAPACITY,
};
pub use utils::{from_pairs, TableExtensions};
