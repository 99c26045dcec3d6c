//! Bootstrap context and the finalized, shareable [`Reflection`].

use std::any::TypeId as RustTypeId;
use std::collections::HashMap;
use std::ops::Deref;

use rift_arena::{ArenaConfig, ArenaError};
use rift_core::{TypeId, TypeKey};

use crate::builder::TypeBuilder;
use crate::registry::TypeRegistry;
use crate::traits::{Lineage, Reflect};

/// Registration phase of the reflection system.
///
/// Types are registered with [`register`](Self::register). Registration
/// is single-threaded and needs `&mut self`; [`finalize`](Self::finalize)
/// ends it and returns the read-only [`Reflection`].
///
/// Dropping the context (or the `Reflection` made from it) tears down
/// every node and then the arena.
#[derive(Debug, Default)]
pub struct ReflectionContext {
    registry: TypeRegistry,
    /// Rust types whose registration has run, with the node they map to.
    registered: HashMap<RustTypeId, TypeId>,
    /// Types whose parents are being registered, innermost last.
    in_progress: Vec<RustTypeId>,
}

impl ReflectionContext {
    /// A context with the default arena configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose arena uses `config`.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        Ok(Self {
            registry: TypeRegistry::new(config)?,
            registered: HashMap::new(),
            in_progress: Vec::new(),
        })
    }

    /// Register `T` and its parent chain.
    ///
    /// Runs [`build`](Self::build) the first time it is called for `T`
    /// and returns the cached node afterwards.
    pub fn register<T: Reflect>(&mut self) -> TypeId {
        let rust_type = RustTypeId::of::<T>();
        if let Some(&id) = self.registered.get(&rust_type) {
            return id;
        }
        let id = self.build::<T>();
        self.registered.insert(rust_type, id);
        id
    }

    /// Build the node of `T`, guarded by its [`TypeKey`](crate::TypeKey).
    ///
    /// If a node with the same key exists it is reused as is: neither the
    /// parent nor [`Reflect::configure`] run again. Otherwise the parent is
    /// registered first, the node is created and linked under it, and
    /// `configure` runs once.
    ///
    /// # Panics
    ///
    /// Panics if the parent chain of `T` leads back to `T`.
    pub fn build<T: Reflect>(&mut self) -> TypeId {
        let decl = T::DECLARATION;
        let key = decl.key();
        let rust_type = RustTypeId::of::<T>();
        if let Some(id) = self.reuse(&key, rust_type) {
            return id;
        }

        assert!(
            !self.in_progress.contains(&rust_type),
            "cyclic parent declaration involving '{}'",
            decl.name
        );
        self.in_progress.push(rust_type);
        let parent = <T::Parent as Lineage<T>>::init(self);
        self.in_progress.pop();

        // A parent sharing our key may have created the node meanwhile.
        if let Some(id) = self.reuse(&key, rust_type) {
            return id;
        }

        let id = self.registry.add_type(key);
        let data = self.registry.data_mut(id);
        data.kind = T::KIND;
        data.tags = T::TAGS;
        data.rust_type = Some(rust_type);
        data.upcast = <T::Parent as Lineage<T>>::upcast();
        data.factory = T::factory();
        if let Some(parent) = parent {
            self.registry.link(parent, id);
        }
        self.registry.bind_rust_type(rust_type, id);

        tracing::debug!(
            name = decl.name,
            key = %self.registry.data(id).key,
            parent = parent.map(|p| self.registry.data(p).name.as_str()),
            kind = ?T::KIND,
            "type registered"
        );

        T::configure(&mut TypeBuilder::new(&mut self.registry, id));
        id
    }

    fn reuse(&mut self, key: &TypeKey, rust_type: RustTypeId) -> Option<TypeId> {
        let id = self.registry.find_type(key)?;
        tracing::debug!(%key, "type key already registered, reusing node");
        self.registry.bind_rust_type(rust_type, id);
        Some(id)
    }

    /// The registry as built so far.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// End the registration phase.
    pub fn finalize(self) -> Reflection {
        let registry = self.registry;
        tracing::info!(
            types = registry.len(),
            properties = registry.property_count(),
            arena_bytes = registry.arena().used_bytes(),
            "reflection finalized"
        );
        Reflection { registry }
    }
}

/// The finalized, read-only reflection data.
///
/// Dereferences to [`TypeRegistry`] for queries. It is `Send + Sync`;
/// share it across threads with an `Arc`.
#[derive(Debug)]
pub struct Reflection {
    registry: TypeRegistry,
}

impl Reflection {
    /// The underlying registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
}

impl Deref for Reflection {
    type Target = TypeRegistry;

    fn deref(&self) -> &TypeRegistry {
        &self.registry
    }
}
