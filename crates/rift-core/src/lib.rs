//! Core types for the Rift reflection framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the arena and the reflection registry:
//! dense type and property IDs, the [`TypeKey`] used to deduplicate
//! registrations, the tag bitsets, and the reflection error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod key;
pub mod tags;

pub use error::ReflectError;
pub use id::{PropertyId, TypeId};
pub use key::{Declaration, TypeKey};
pub use tags::{PropertyTags, TypeKind, TypeTags};
