//! Rift: arena-backed run-time reflection for Rust types.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Rift sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use rift::prelude::*;
//!
//! #[derive(Default)]
//! struct Actor {
//!     health: f32,
//! }
//!
//! impl Reflect for Actor {
//!     type Parent = NoParent;
//!     const DECLARATION: Declaration = declaration!("Actor");
//!     const KIND: TypeKind = TypeKind::Class;
//!
//!     fn configure(builder: &mut TypeBuilder<'_, Self>) {
//!         builder.add_property("health", field!(Actor, health: f32), PropertyTags::DETAILS_EDIT);
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Pawn {
//!     actor: Actor,
//!     grounded: bool,
//! }
//!
//! impl Extends<Actor> for Pawn {
//!     fn base(&self) -> &Actor { &self.actor }
//!     fn base_mut(&mut self) -> &mut Actor { &mut self.actor }
//! }
//!
//! impl Reflect for Pawn {
//!     type Parent = Actor;
//!     const DECLARATION: Declaration = declaration!("Pawn");
//!     const KIND: TypeKind = TypeKind::Class;
//!
//!     fn configure(builder: &mut TypeBuilder<'_, Self>) {
//!         builder.add_property("bGrounded", field!(Pawn, grounded: bool), PropertyTags::empty());
//!     }
//! }
//!
//! let mut ctx = ReflectionContext::new();
//! ctx.register::<Pawn>();
//! let reflection = ctx.finalize();
//!
//! let actor = reflection.find_by_name("Actor").unwrap();
//! let pawn = actor.find_child("Pawn").unwrap();
//! assert!(pawn.is_child_of(&actor));
//!
//! let mut props = PropertyMap::new();
//! pawn.all_properties(&mut props);
//! assert_eq!(props.keys().copied().collect::<Vec<_>>(), ["health", "bGrounded"]);
//! assert_eq!(props["bGrounded"].display_name(), "grounded");
//!
//! let mut instance = Pawn::default();
//! props["health"].set(&mut instance, 75.0f32).unwrap();
//! assert_eq!(instance.actor.health, 75.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `rift-core` | IDs, type keys, tags, `ReflectError` |
//! | [`arena`] | `rift-arena` | `LinearArena`, `MemoryArena`, `ArenaConfig` |
//! | [`reflect`] | `rift-reflect` | Registry, type graph, properties, bootstrap |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identifiers, type keys, tags and errors (`rift-core`).
pub use rift_core as types;

/// The bump allocator reflection metadata lives in (`rift-arena`).
pub use rift_arena as arena;

/// Type registry, type graph and property accessors (`rift-reflect`).
///
/// Start with [`reflect::Reflect`] and [`reflect::ReflectionContext`].
pub use rift_reflect as reflect;

pub use rift_reflect::{declaration, field};

/// Common imports for declaring and querying reflected types.
///
/// ```rust
/// use rift::prelude::*;
/// ```
pub mod prelude {
    pub use rift_reflect::prelude::*;

    pub use rift_arena::ArenaConfig;
    pub use rift_core::{PropertyId, TypeId, TypeKey};
}
