//! Type registry, type graph and property accessors for Rift.
//!
//! Every reflectable Rust type implements [`Reflect`]: it names itself
//! with a [`Declaration`], names its parent (or [`NoParent`]), and lists
//! its properties in [`Reflect::configure`]. An explicit bootstrap then
//! registers the types into a [`ReflectionContext`]:
//!
//! ```text
//! ReflectionContext::register::<T>()      (once per Rust type)
//! └── build::<T>()                        (once per TypeKey)
//!     ├── register::<T::Parent>()         (parents first)
//!     ├── TypeRegistry::add_type(key)     (node placed in the arena)
//!     ├── TypeRegistry::link(parent, T)   (parent.children += T)
//!     └── T::configure(TypeBuilder<T>)    (add_property → arena)
//! ```
//!
//! [`ReflectionContext::finalize`] ends the registration phase and hands
//! back a read-only [`Reflection`] that can be shared between threads.
//! Queries go through the borrowed views [`Type`], [`Class`], [`Struct`]
//! and [`Property`].
//!
//! # Example
//!
//! ```
//! use rift_reflect::prelude::*;
//!
//! #[derive(Default)]
//! struct Vehicle {
//!     speed: f32,
//! }
//!
//! impl Reflect for Vehicle {
//!     type Parent = NoParent;
//!     const DECLARATION: Declaration = declaration!("Vehicle");
//!
//!     fn configure(builder: &mut TypeBuilder<'_, Self>) {
//!         builder.add_property("speed", field!(Vehicle, speed: f32), PropertyTags::empty());
//!     }
//! }
//!
//! let mut ctx = ReflectionContext::new();
//! ctx.register::<Vehicle>();
//! let reflection = ctx.finalize();
//!
//! let vehicle_type = reflection.find::<Vehicle>().unwrap();
//! let speed = vehicle_type.find_property("speed").unwrap();
//!
//! let mut car = Vehicle::default();
//! speed.set(&mut car, 12.5f32).unwrap();
//! assert_eq!(*speed.get::<f32>(&car).unwrap(), 12.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod builder;
pub mod context;
pub mod property;
pub mod registry;
pub mod traits;
pub mod ty;
pub mod value;

pub use builder::TypeBuilder;
pub use context::{Reflection, ReflectionContext};
pub use property::{display_name, Accessor, Field, Property, RawAccessor};
pub use registry::TypeRegistry;
pub use traits::{
    instantiate, Construct, Extends, Factory, Instance, Lineage, NoParent, Owner, Reflect, Upcast,
};
pub use ty::{Class, PropertyMap, Struct, Type};
pub use value::{Reflected, ValueKind};

pub use rift_arena::{ArenaConfig, ArenaError};
pub use rift_core::{
    declaration, Declaration, PropertyId, PropertyTags, ReflectError, TypeId, TypeKey, TypeKind,
    TypeTags,
};

/// Everything needed to declare and query reflected types.
pub mod prelude {
    pub use crate::{
        declaration, field, instantiate, Class, Construct, Declaration, Extends, Factory,
        Instance, NoParent, Owner, Property, PropertyMap, PropertyTags, Reflect, ReflectError,
        Reflected, Reflection, ReflectionContext, Struct, Type, TypeBuilder, TypeKind, TypeTags,
    };
}
