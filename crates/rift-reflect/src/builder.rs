//! Per-type configuration handed to [`Reflect::configure`].

use std::marker::PhantomData;

use rift_core::{PropertyId, PropertyTags, TypeId};

use crate::property::Field;
use crate::registry::TypeRegistry;
use crate::traits::Reflect;
use crate::ty::Type;

/// Adds properties to the node of `T` while it is being built.
///
/// Only accepts [`Field<T>`] accessors, which [`field!`](crate::field)
/// produces for fields of `T` itself.
pub struct TypeBuilder<'a, T> {
    registry: &'a mut TypeRegistry,
    id: TypeId,
    _type: PhantomData<fn() -> T>,
}

impl<'a, T: Reflect> TypeBuilder<'a, T> {
    pub(crate) fn new(registry: &'a mut TypeRegistry, id: TypeId) -> Self {
        Self {
            registry,
            id,
            _type: PhantomData,
        }
    }

    /// Node being configured.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// View of the node being configured. Inherited properties are
    /// already reachable through its parent.
    pub fn ty(&self) -> Type<'_> {
        Type::new(self.registry, self.id)
    }

    /// Register a property on `T`.
    ///
    /// Redeclaring a name on the same type replaces the earlier property
    /// and keeps its position.
    ///
    /// Type tags are not property tags:
    ///
    /// ```compile_fail
    /// use rift_reflect::prelude::*;
    ///
    /// struct Door {
    ///     open: bool,
    /// }
    ///
    /// impl Reflect for Door {
    ///     type Parent = NoParent;
    ///     const DECLARATION: Declaration = declaration!("Door");
    ///
    ///     fn configure(builder: &mut TypeBuilder<'_, Self>) {
    ///         builder.add_property("open", field!(Door, open: bool), TypeTags::ABSTRACT);
    ///     }
    /// }
    /// ```
    ///
    /// And a field of another type can't be registered on `T`:
    ///
    /// ```compile_fail
    /// use rift_reflect::prelude::*;
    ///
    /// struct Door {
    ///     open: bool,
    /// }
    ///
    /// impl Reflect for Door {
    ///     type Parent = NoParent;
    ///     const DECLARATION: Declaration = declaration!("Door");
    /// }
    ///
    /// struct Window;
    ///
    /// impl Reflect for Window {
    ///     type Parent = NoParent;
    ///     const DECLARATION: Declaration = declaration!("Window");
    ///
    ///     fn configure(builder: &mut TypeBuilder<'_, Self>) {
    ///         builder.add_property("open", field!(Door, open: bool), PropertyTags::empty());
    ///     }
    /// }
    /// ```
    pub fn add_property(&mut self, name: &str, field: Field<T>, tags: PropertyTags) -> PropertyId {
        self.registry
            .add_property(self.id, name, tags, field.into_accessor())
    }
}
