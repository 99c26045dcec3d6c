//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
///
/// Only [`LinearArena::try_allocate`](crate::LinearArena::try_allocate)
/// and construction surface these. The infallible
/// [`MemoryArena::allocate`](crate::MemoryArena::allocate) path treats
/// exhaustion as fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The block cap is reached; no more blocks can be appended.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Total capacity available across all blocks.
        capacity: usize,
    },
    /// The global allocator could not provide a new block.
    AllocationFailed {
        /// Size of the block that could not be allocated, in bytes.
        size: usize,
    },
    /// The arena configuration is not usable.
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, capacity {capacity} bytes"
                )
            }
            Self::AllocationFailed { size } => {
                write!(f, "failed to allocate a {size} byte arena block")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
        }
    }
}

impl Error for ArenaError {}
