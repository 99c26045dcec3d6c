//! The type graph: [`Type`] nodes and the typed [`Class`] / [`Struct`]
//! views over them.
//!
//! Nodes live in the registry arena and are addressed by [`TypeId`]. A
//! view is a registry reference plus an id, so it is `Copy` and borrows
//! the registry for as long as it is used.

use std::any::TypeId as RustTypeId;
use std::fmt;
use std::ops::Deref;

use indexmap::IndexMap;
use smallvec::SmallVec;

use rift_core::{PropertyId, TypeId, TypeKey, TypeKind, TypeTags};

use crate::property::Property;
use crate::registry::TypeRegistry;
use crate::traits::{Factory, Instance, Owner, Upcast};

/// Properties keyed by name, in declaration order.
pub type PropertyMap<'a> = IndexMap<&'a str, Property<'a>>;

/// Type node placed in the registry arena.
#[derive(Default)]
pub(crate) struct TypeData {
    pub(crate) key: TypeKey,
    pub(crate) name: String,
    pub(crate) kind: TypeKind,
    pub(crate) tags: TypeTags,
    pub(crate) parent: Option<TypeId>,
    pub(crate) children: SmallVec<[TypeId; 4]>,
    pub(crate) properties: IndexMap<String, PropertyId>,
    /// Rust type that built the node. Merged declarations keep the first.
    pub(crate) rust_type: Option<RustTypeId>,
    pub(crate) upcast: Option<Upcast>,
    pub(crate) factory: Option<Factory>,
}

/// Borrowed view of a registered type.
#[derive(Clone, Copy)]
pub struct Type<'a> {
    registry: &'a TypeRegistry,
    id: TypeId,
}

impl<'a> Type<'a> {
    pub(crate) fn new(registry: &'a TypeRegistry, id: TypeId) -> Self {
        Self { registry, id }
    }

    fn data(&self) -> &'a TypeData {
        self.registry.data(self.id)
    }

    /// Registry index of the type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Reflected name.
    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    /// Key the type was registered under.
    pub fn key(&self) -> &'a TypeKey {
        &self.data().key
    }

    /// Class or struct.
    pub fn kind(&self) -> TypeKind {
        self.data().kind
    }

    /// Type-level tags.
    pub fn tags(&self) -> TypeTags {
        self.data().tags
    }

    /// Whether the type carries [`TypeTags::ABSTRACT`].
    pub fn is_abstract(&self) -> bool {
        self.tags().contains(TypeTags::ABSTRACT)
    }

    /// The declared parent, if any.
    pub fn parent(&self) -> Option<Type<'a>> {
        self.data().parent.map(|id| Type::new(self.registry, id))
    }

    /// Direct children in registration order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = Type<'a>> + 'a {
        let registry = self.registry;
        self.data()
            .children
            .iter()
            .map(move |&id| Type::new(registry, id))
    }

    /// Append every descendant to `out`.
    ///
    /// Each level appends its direct children before recursing into them,
    /// so siblings are adjacent and precede their own descendants.
    pub fn all_children(&self, out: &mut Vec<Type<'a>>) {
        let start = out.len();
        out.extend(self.children());
        for i in start..out.len() {
            let child = out[i];
            child.all_children(out);
        }
    }

    /// Depth-first search of the descendants for a type named `name`.
    ///
    /// Children are visited in registration order and each child is
    /// checked before its subtree. The first match wins when several
    /// descendants share a name. An empty name never matches.
    pub fn find_child(&self, name: &str) -> Option<Type<'a>> {
        if name.is_empty() {
            return None;
        }
        for child in self.children() {
            if child.name() == name {
                return Some(child);
            }
            if let Some(found) = child.find_child(name) {
                return Some(found);
            }
        }
        None
    }

    /// Whether `other` is a strict ancestor of this type.
    pub fn is_child_of(&self, other: &Type<'_>) -> bool {
        if !std::ptr::eq(self.registry, other.registry) {
            return false;
        }
        let mut current = self.data().parent;
        while let Some(id) = current {
            if id == other.id {
                return true;
            }
            current = self.registry.data(id).parent;
        }
        false
    }

    /// Property declared by this type itself. Inherited ones are not
    /// searched.
    pub fn find_property(&self, name: &str) -> Option<Property<'a>> {
        self.data()
            .properties
            .get(name)
            .map(|&id| Property::new(self.registry, id))
    }

    /// Insert this type's own properties into `out` in declaration order.
    pub fn own_properties(&self, out: &mut PropertyMap<'a>) {
        let registry = self.registry;
        out.extend(
            self.data()
                .properties
                .iter()
                .map(|(name, &id)| (name.as_str(), Property::new(registry, id))),
        );
    }

    /// Insert the properties of the whole parent chain into `out`, root
    /// first. A property redeclared by a descendant replaces the inherited
    /// entry and keeps its position.
    pub fn all_properties(&self, out: &mut PropertyMap<'a>) {
        if let Some(parent) = self.parent() {
            parent.all_properties(out);
        }
        self.own_properties(out);
    }

    /// View as a class, if it is one.
    pub fn as_class(&self) -> Option<Class<'a>> {
        (self.kind() == TypeKind::Class).then_some(Class(*self))
    }

    /// View as a struct, if it is one.
    pub fn as_struct(&self) -> Option<Struct<'a>> {
        (self.kind() == TypeKind::Struct).then_some(Struct(*self))
    }
}

impl PartialEq for Type<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.registry, other.registry) && self.id == other.id
    }
}

impl Eq for Type<'_> {}

impl fmt::Debug for Type<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("parent", &self.parent().map(|p| p.name()))
            .finish()
    }
}

/// A type of kind [`TypeKind::Class`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Class<'a>(Type<'a>);

impl<'a> Class<'a> {
    /// The untyped view.
    pub fn ty(&self) -> Type<'a> {
        self.0
    }

    /// The parent class, if any.
    pub fn parent(&self) -> Option<Class<'a>> {
        self.0.parent().map(Class)
    }

    /// Append every descendant class to `out`, in [`Type::all_children`]
    /// order.
    pub fn all_children(&self, out: &mut Vec<Class<'a>>) {
        let mut types = Vec::new();
        self.0.all_children(&mut types);
        out.extend(types.into_iter().map(Class));
    }

    /// See [`Type::find_child`].
    pub fn find_child(&self, name: &str) -> Option<Class<'a>> {
        self.0.find_child(name).map(Class)
    }

    /// Identity comparison.
    pub fn is_a(&self, other: &Class<'_>) -> bool {
        std::ptr::eq(self.0.registry, other.0.registry) && self.0.id == other.0.id
    }

    /// Create a new instance of the class, owned by `owner`.
    ///
    /// Returns `None` for abstract classes and classes without a factory.
    pub fn create_instance(&self, owner: Option<Owner>) -> Option<Box<dyn Instance>> {
        if self.is_abstract() {
            return None;
        }
        self.0.data().factory.map(|factory| factory(owner))
    }
}

impl<'a> Deref for Class<'a> {
    type Target = Type<'a>;

    fn deref(&self) -> &Type<'a> {
        &self.0
    }
}

/// A type of kind [`TypeKind::Struct`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Struct<'a>(Type<'a>);

impl<'a> Struct<'a> {
    /// The untyped view.
    pub fn ty(&self) -> Type<'a> {
        self.0
    }
}

impl<'a> Deref for Struct<'a> {
    type Target = Type<'a>;

    fn deref(&self) -> &Type<'a> {
        &self.0
    }
}
