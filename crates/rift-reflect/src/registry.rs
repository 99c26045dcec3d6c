//! The arena-backed type registry.
//!
//! Owns the [`LinearArena`] every type and property node lives in, the
//! dense id tables pointing at those nodes, and the key map that makes
//! registration idempotent. All mutation goes through `&mut self`; once a
//! registry is wrapped in a [`Reflection`](crate::Reflection) it is
//! read-only.

use std::alloc::Layout;
use std::any::TypeId as RustTypeId;
use std::collections::HashMap;
use std::fmt;
use std::ptr::NonNull;

use indexmap::IndexMap;

use rift_arena::{ArenaConfig, ArenaError, LinearArena, MemoryArena};
use rift_core::{PropertyId, PropertyTags, TypeId, TypeKey};

use crate::property::{Accessor, Property, PropertyData};
use crate::traits::{Instance, Reflect};
use crate::ty::{Type, TypeData};

/// Storage and lookup tables for every registered type and property.
pub struct TypeRegistry {
    arena: LinearArena,
    types: Vec<NonNull<TypeData>>,
    properties: Vec<NonNull<PropertyData>>,
    keys: IndexMap<TypeKey, TypeId>,
    by_rust_type: HashMap<RustTypeId, TypeId>,
}

// SAFETY: the node pointers are uniquely owned by the registry and point
// into its own arena. Nodes are only mutated through `&mut self`, and the
// node types themselves are `Send + Sync`.
unsafe impl Send for TypeRegistry {}
// SAFETY: see above; `&TypeRegistry` only hands out shared references.
unsafe impl Sync for TypeRegistry {}

impl TypeRegistry {
    /// Create an empty registry whose arena uses `config`.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        Ok(Self::with_arena(LinearArena::new(config)?))
    }

    fn with_arena(arena: LinearArena) -> Self {
        Self {
            arena,
            types: Vec::new(),
            properties: Vec::new(),
            keys: IndexMap::new(),
            by_rust_type: HashMap::new(),
        }
    }

    /// Return the type registered under `key`, creating an empty node in
    /// the arena if there is none yet.
    pub fn add_type(&mut self, key: TypeKey) -> TypeId {
        if let Some(&id) = self.keys.get(&key) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        let node = self.arena.alloc_value(TypeData {
            name: key.name().to_owned(),
            key: key.clone(),
            ..TypeData::default()
        });
        self.types.push(node);
        self.keys.insert(key, id);
        id
    }

    /// The type registered under `key`, if any.
    pub fn find_type(&self, key: &TypeKey) -> Option<TypeId> {
        self.keys.get(key).copied()
    }

    /// Raw allocation from the registry arena.
    ///
    /// The memory lives as long as the registry. Nothing placed here is
    /// dropped.
    pub fn allocate(&mut self, layout: Layout) -> NonNull<u8> {
        self.arena.allocate(layout)
    }

    pub(crate) fn add_property(
        &mut self,
        owner: TypeId,
        name: &str,
        tags: PropertyTags,
        accessor: Accessor,
    ) -> PropertyId {
        let id = PropertyId(self.properties.len() as u32);
        let node = self
            .arena
            .alloc_value(PropertyData::new(owner, name, tags, accessor));
        self.properties.push(node);

        // Redeclaring a name replaces the entry in place.
        self.data_mut(owner)
            .properties
            .insert(name.to_owned(), id);
        tracing::trace!(
            owner = %self.data(owner).name,
            property = name,
            display_name = %self.property_data(id).display_name,
            value = accessor.value_kind().name(),
            "property registered"
        );
        id
    }

    pub(crate) fn link(&mut self, parent: TypeId, child: TypeId) {
        self.data_mut(child).parent = Some(parent);
        self.data_mut(parent).children.push(child);
    }

    /// Map a Rust type to a node. The first binding for a Rust type wins.
    pub(crate) fn bind_rust_type(&mut self, rust_type: RustTypeId, id: TypeId) {
        self.by_rust_type.entry(rust_type).or_insert(id);
    }

    pub(crate) fn id_of_rust_type(&self, rust_type: RustTypeId) -> Option<TypeId> {
        self.by_rust_type.get(&rust_type).copied()
    }

    pub(crate) fn data(&self, id: TypeId) -> &TypeData {
        // SAFETY: every pointer in `types` is a live, initialised arena
        // node, and `&self` excludes concurrent mutation.
        unsafe { self.types[id.index()].as_ref() }
    }

    pub(crate) fn data_mut(&mut self, id: TypeId) -> &mut TypeData {
        // SAFETY: as in `data`; `&mut self` makes the borrow unique.
        unsafe { self.types[id.index()].as_mut() }
    }

    pub(crate) fn property_data(&self, id: PropertyId) -> &PropertyData {
        // SAFETY: as in `data`.
        unsafe { self.properties[id.index()].as_ref() }
    }

    /// View of the type `id`, if it exists.
    pub fn get(&self, id: TypeId) -> Option<Type<'_>> {
        (id.index() < self.types.len()).then(|| Type::new(self, id))
    }

    /// View of the property `id`, if it exists.
    pub fn property(&self, id: PropertyId) -> Option<Property<'_>> {
        (id.index() < self.properties.len()).then(|| Property::new(self, id))
    }

    /// The node registered for the Rust type `T`.
    pub fn find<T: Reflect>(&self) -> Option<Type<'_>> {
        self.id_of_rust_type(RustTypeId::of::<T>())
            .map(|id| Type::new(self, id))
    }

    /// Dynamic type of `instance`, if its Rust type was registered.
    pub fn type_of(&self, instance: &dyn Instance) -> Option<Type<'_>> {
        self.id_of_rust_type(instance.as_any().type_id())
            .map(|id| Type::new(self, id))
    }

    /// First registered type named `name`.
    pub fn find_by_name(&self, name: &str) -> Option<Type<'_>> {
        self.iter().find(|ty| ty.name() == name)
    }

    /// All types in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Type<'_>> + '_ {
        (0..self.types.len()).map(move |i| Type::new(self, TypeId(i as u32)))
    }

    /// Types without a parent, in registration order.
    pub fn roots(&self) -> impl Iterator<Item = Type<'_>> + '_ {
        self.iter().filter(|ty| ty.parent().is_none())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type has been registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of registered properties, redeclared ones included.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// The arena backing the registry.
    pub fn arena(&self) -> &LinearArena {
        &self.arena
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_arena(LinearArena::default())
    }
}

impl Drop for TypeRegistry {
    fn drop(&mut self) {
        // The arena releases memory without running destructors.
        for node in self.properties.drain(..) {
            // SAFETY: each node was written once by `alloc_value` and is
            // dropped exactly once here, before the arena frees its block.
            unsafe { node.as_ptr().drop_in_place() };
        }
        for node in self.types.drain(..) {
            // SAFETY: as above.
            unsafe { node.as_ptr().drop_in_place() };
        }
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types.len())
            .field("properties", &self.properties.len())
            .field("arena", &self.arena)
            .finish()
    }
}
