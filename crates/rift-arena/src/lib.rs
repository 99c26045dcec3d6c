//! Append-only bump arena for Rift reflection metadata.
//!
//! Reflection metadata is created once while types register and lives
//! until the owning context is torn down. Nothing is ever released
//! individually, so a bump allocator over a growable list of blocks is
//! all the memory model needs:
//!
//! ```text
//! LinearArena
//! └── Block[] (256KB default, append-only, never moved)
//!     └── RawBuffer (one global-allocator allocation per block)
//! ```
//!
//! Pointers returned by the arena stay valid and unchanged until the
//! arena is dropped: blocks are appended, never resized or moved.
//!
//! This crate contains `unsafe` code. Raw memory handling is confined
//! to `raw.rs`; `linear.rs` only writes values into freshly bumped
//! memory.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod block;
pub mod config;
pub mod error;
pub mod linear;
mod raw;
pub mod traits;

// Public re-exports for the primary API surface.
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use linear::LinearArena;
pub use traits::MemoryArena;
