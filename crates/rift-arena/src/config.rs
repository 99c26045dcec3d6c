//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for the linear arena.
///
/// Controls block sizing and the block cap. Validated at construction;
/// all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of each regular arena block in bytes.
    ///
    /// Default: 262_144 (256KB). Requests larger than this get a block
    /// of their own, sized to fit.
    pub block_size: usize,

    /// Maximum number of blocks the arena may hold.
    ///
    /// Default: `u16::MAX`, effectively unbounded for metadata. Lower it
    /// to turn runaway registration into an early, fatal exhaustion.
    pub max_blocks: u16,
}

impl ArenaConfig {
    /// Default block size: 256KB.
    pub const DEFAULT_BLOCK_SIZE: usize = 256 * 1024;

    /// Default maximum block count.
    pub const DEFAULT_MAX_BLOCKS: u16 = u16::MAX;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            block_size: Self::DEFAULT_BLOCK_SIZE,
            max_blocks: Self::DEFAULT_MAX_BLOCKS,
        }
    }

    /// Override the regular block size.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Override the block cap.
    pub fn with_max_blocks(mut self, max_blocks: u16) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    /// Check that the configuration can back an arena.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.block_size == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "block_size must be non-zero".into(),
            });
        }
        if self.block_size > isize::MAX as usize {
            return Err(ArenaError::InvalidConfig {
                reason: format!("block_size ({}) exceeds isize::MAX", self.block_size),
            });
        }
        if self.max_blocks == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "max_blocks must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}
