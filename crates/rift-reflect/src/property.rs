//! Property descriptors and type-erased field accessors.
//!
//! A property pairs a name with an accessor: a function that maps an
//! opaque pointer to an instance of the owning type to a pointer to one of
//! its fields. Accessors are generated by [`field!`](crate::field), which
//! type-checks the field against the declared value type.
//!
//! [`Property::get`], [`Property::get_mut`] and [`Property::set`] are the
//! checked entry points. [`Property::access_raw`] is the bare accessor.

use std::any::{Any, TypeId as RustTypeId};
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use rift_core::{PropertyId, PropertyTags, ReflectError, TypeId};

use crate::registry::TypeRegistry;
use crate::traits::{Instance, Reflect};
use crate::ty::Type;
use crate::value::{Reflected, ValueKind};

/// Maps a pointer to an owner instance to a pointer to one of its fields.
///
/// # Safety
///
/// The argument must point to a live instance of the owner type the
/// accessor was generated for.
pub type RawAccessor = unsafe fn(NonNull<()>) -> NonNull<()>;

/// A type-erased accessor together with the declared value kind.
#[derive(Clone, Copy, Debug)]
pub struct Accessor {
    value: ValueKind,
    project: RawAccessor,
}

impl Accessor {
    /// Declared value kind of the field.
    pub fn value_kind(&self) -> ValueKind {
        self.value
    }

    /// Run the projection.
    ///
    /// # Safety
    ///
    /// See [`RawAccessor`].
    pub unsafe fn project(&self, instance: NonNull<()>) -> NonNull<()> {
        // SAFETY: forwarded caller contract.
        unsafe { (self.project)(instance) }
    }
}

/// An accessor into a field of `T`.
///
/// Only a [`TypeBuilder<T>`](crate::TypeBuilder) accepts a `Field<T>`, so a
/// property can't be registered on a type that does not own the field.
pub struct Field<T> {
    accessor: Accessor,
    _owner: PhantomData<fn(&T)>,
}

impl<T: Reflect> Field<T> {
    /// Wrap a raw projection returning a `V` field of `T`.
    ///
    /// Use [`field!`](crate::field) instead of calling this directly.
    ///
    /// # Safety
    ///
    /// Given a pointer to a live `T`, `project` must return a pointer to a
    /// field of type `V` inside that same `T`.
    #[doc(hidden)]
    pub unsafe fn from_raw<V: Reflected>(project: RawAccessor) -> Self {
        Self {
            accessor: Accessor {
                value: ValueKind::of::<V>(),
                project,
            },
            _owner: PhantomData,
        }
    }

    /// Declared value kind of the field.
    pub fn value_kind(&self) -> ValueKind {
        self.accessor.value
    }

    pub(crate) fn into_accessor(self) -> Accessor {
        self.accessor
    }
}

/// Build a [`Field`] accessor for a named field.
///
/// `field!(Owner, name: Value)` checks at compile time that `Owner` has a
/// field `name` of type `Value` and that `Value` is [`Reflected`]. Name the
/// owner explicitly; `Self` is not in scope inside the generated function.
///
/// ```
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
/// let field = field!(Door, open: bool);
/// assert_eq!(field.value_kind().name(), "bool");
/// ```
///
/// The field must be addressable by reference, so fields of
/// `#[repr(packed)]` owners are rejected:
///
/// ```compile_fail
/// use rift_reflect::prelude::*;
///
/// #[repr(C, packed)]
/// struct Packed {
///     tag: u8,
///     value: u32,
/// }
///
/// impl Reflect for Packed {
///     type Parent = NoParent;
///     const DECLARATION: Declaration = declaration!("Packed");
/// }
///
/// let field = field!(Packed, value: u32);
/// ```
///
/// So is a field whose type differs from the declared value:
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
/// let field = field!(Door, open: u8);
/// ```
#[macro_export]
macro_rules! field {
    ($owner:ty, $field:ident : $value:ty) => {{
        // Fails to compile for fields that can't be borrowed, such as
        // misaligned fields of packed structs.
        #[allow(dead_code)]
        fn borrow_field(owner: &$owner) -> &$value {
            &owner.$field
        }
        unsafe fn project(instance: ::core::ptr::NonNull<()>) -> ::core::ptr::NonNull<()> {
            let instance = instance.cast::<$owner>().as_ptr();
            // SAFETY: the caller passes a pointer to a live owner instance.
            let field: *mut $value = unsafe { ::core::ptr::addr_of_mut!((*instance).$field) };
            // SAFETY: a field of a non-null instance is non-null.
            unsafe { ::core::ptr::NonNull::new_unchecked(field.cast::<()>()) }
        }
        // SAFETY: `project` returns the `$field` field, typed `$value`.
        unsafe { $crate::property::Field::<$owner>::from_raw::<$value>(project) }
    }};
}

/// Derive the human-facing name of a property.
///
/// Boolean fields spelled `bName` lose their `b` prefix and get a lower-case
/// first letter; every other name is returned as is.
///
/// ```
/// use rift_reflect::display_name;
///
/// assert_eq!(display_name("bEnabled"), "enabled");
/// assert_eq!(display_name("speed"), "speed");
/// assert_eq!(display_name("bus"), "bus");
/// ```
pub fn display_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some('b'), Some(first)) if first.is_ascii_uppercase() => {
            let mut name = String::with_capacity(raw.len() - 1);
            name.push(first.to_ascii_lowercase());
            name.push_str(chars.as_str());
            name
        }
        _ => raw.to_owned(),
    }
}

/// Property record placed in the registry arena.
pub(crate) struct PropertyData {
    pub(crate) owner: TypeId,
    pub(crate) name: String,
    pub(crate) display_name: String,
    pub(crate) tags: PropertyTags,
    pub(crate) accessor: Accessor,
}

impl PropertyData {
    pub(crate) fn new(owner: TypeId, name: &str, tags: PropertyTags, accessor: Accessor) -> Self {
        Self {
            owner,
            name: name.to_owned(),
            display_name: display_name(name),
            tags,
            accessor,
        }
    }
}

/// Borrowed view of a registered property.
#[derive(Clone, Copy)]
pub struct Property<'a> {
    registry: &'a TypeRegistry,
    id: PropertyId,
}

impl<'a> Property<'a> {
    pub(crate) fn new(registry: &'a TypeRegistry, id: PropertyId) -> Self {
        Self { registry, id }
    }

    fn data(&self) -> &'a PropertyData {
        self.registry.property_data(self.id)
    }

    /// Registry index of the property.
    pub fn id(&self) -> PropertyId {
        self.id
    }

    /// Name the property was declared with.
    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    /// Human-facing name, see [`display_name`].
    pub fn display_name(&self) -> &'a str {
        &self.data().display_name
    }

    /// Property tags.
    pub fn tags(&self) -> PropertyTags {
        self.data().tags
    }

    /// Declared value kind.
    pub fn value_kind(&self) -> ValueKind {
        self.data().accessor.value
    }

    /// The type that declared the property.
    pub fn owner(&self) -> Type<'a> {
        Type::new(self.registry, self.data().owner)
    }

    /// Run the accessor on an opaque instance pointer.
    ///
    /// # Safety
    ///
    /// `instance` must point to a live value of exactly the owner's Rust
    /// type, not a descendant. The result points to a value of the declared
    /// value kind and inherits the provenance of `instance`.
    pub unsafe fn access_raw(&self, instance: NonNull<()>) -> NonNull<()> {
        // SAFETY: forwarded caller contract.
        unsafe { self.data().accessor.project(instance) }
    }

    /// Read the property on `instance`.
    ///
    /// `instance` may be of the owner type or of any reflected descendant.
    pub fn get<'i, V: Reflected>(&self, instance: &'i dyn Instance) -> Result<&'i V, ReflectError> {
        self.check_value::<V>()?;
        let rust_type_name = instance.rust_type_name();
        let any = instance.as_any();
        let origin = Origin::new(any, rust_type_name);
        let field = self.resolve(origin, NonNull::from(any).cast(), false)?;
        // SAFETY: `resolve` walked the value behind `any` to the owner
        // sub-object and the value kind is `V`; the borrow is tied to
        // `instance`.
        Ok(unsafe { field.cast::<V>().as_ref() })
    }

    /// Borrow the property on `instance` mutably.
    pub fn get_mut<'i, V: Reflected>(
        &self,
        instance: &'i mut dyn Instance,
    ) -> Result<&'i mut V, ReflectError> {
        self.check_value::<V>()?;
        let rust_type_name = instance.rust_type_name();
        let any = instance.as_any_mut();
        let origin = Origin::new(&*any, rust_type_name);
        let field = self.resolve(origin, NonNull::from(any).cast(), true)?;
        // SAFETY: as in `get`, with the pointer derived from a unique
        // borrow of `instance`.
        Ok(unsafe { field.cast::<V>().as_mut() })
    }

    /// Overwrite the property on `instance`, dropping the previous value.
    pub fn set<V: Reflected>(&self, instance: &mut dyn Instance, value: V) -> Result<(), ReflectError> {
        *self.get_mut::<V>(instance)? = value;
        Ok(())
    }

    fn check_value<V: Reflected>(&self) -> Result<(), ReflectError> {
        let declared = self.value_kind();
        if declared.is::<V>() {
            Ok(())
        } else {
            Err(ReflectError::ValueKindMismatch {
                property: self.name().to_owned(),
                expected: declared.name(),
                found: V::NAME,
            })
        }
    }

    /// Walk `ptr` from the instance's dynamic type up to the owner.
    fn resolve(
        &self,
        origin: Origin,
        mut ptr: NonNull<()>,
        exclusive: bool,
    ) -> Result<NonNull<()>, ReflectError> {
        let owner = self.data().owner;
        let mut expected = origin.rust_type;
        let mut node = self
            .registry
            .id_of_rust_type(expected)
            .ok_or(ReflectError::UnregisteredInstance {
                rust_type: origin.rust_type_name,
            })?;

        let instance_type = Type::new(self.registry, node);
        if node != owner && !instance_type.is_child_of(&self.owner()) {
            return Err(ReflectError::UnrelatedInstance {
                property: self.name().to_owned(),
                owner: self.owner().name().to_owned(),
                instance: instance_type.name().to_owned(),
            });
        }

        loop {
            let data = self.registry.data(node);
            let merged = || ReflectError::MergedDeclaration {
                name: data.name.clone(),
            };
            if data.rust_type != Some(expected) {
                return Err(merged());
            }
            if node == owner {
                break;
            }
            let (upcast, parent) = data.upcast.zip(data.parent).ok_or_else(merged)?;
            // SAFETY: `ptr` points to a live value of `expected`, which is
            // the Rust type `upcast` was recorded for.
            ptr = unsafe { upcast.apply(ptr, exclusive) };
            expected = upcast.target();
            node = parent;
        }

        // SAFETY: `ptr` now points to a live value of the owner's Rust type.
        Ok(unsafe { self.access_raw(ptr) })
    }
}

/// Dynamic type of an instance.
///
/// The type id must come from the same `dyn Any` the pointer is taken
/// from; `Instance` can be implemented by hand.
#[derive(Clone, Copy)]
struct Origin {
    rust_type: RustTypeId,
    rust_type_name: &'static str,
}

impl Origin {
    fn new(any: &dyn Any, rust_type_name: &'static str) -> Self {
        Self {
            rust_type: Any::type_id(any),
            rust_type_name,
        }
    }
}

impl PartialEq for Property<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.registry, other.registry) && self.id == other.id
    }
}

impl fmt::Debug for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("id", &self.id)
            .field("owner", &self.owner().name())
            .field("name", &self.name())
            .field("value", &self.value_kind().name())
            .field("tags", &self.tags())
            .finish()
    }
}
