//! The traits a Rust type implements to take part in reflection.

use std::any::{Any, TypeId as RustTypeId};
use std::ptr::NonNull;
use std::sync::Weak;

use rift_core::{Declaration, TypeId, TypeKind, TypeTags};

use crate::builder::TypeBuilder;
use crate::context::ReflectionContext;

/// A Rust type that is described in the reflection registry.
///
/// The declaration is compile-time data; the registry node is created the
/// first time the type is registered with a [`ReflectionContext`].
pub trait Reflect: Any + Sized {
    /// The reflected parent type, or [`NoParent`] for a root.
    ///
    /// A parent other than [`NoParent`] requires `Self: Extends<Parent>`
    /// and the same [`TypeKind`] on both types; both are checked at
    /// compile time.
    type Parent: Lineage<Self>;

    /// Reflected name and declaration site, usually
    /// `declaration!("Name")`.
    const DECLARATION: Declaration;

    /// Whether the type is a [`Class`](crate::Class) or a
    /// [`Struct`](crate::Struct).
    const KIND: TypeKind = TypeKind::Struct;

    /// Type-level tags.
    const TAGS: TypeTags = TypeTags::empty();

    /// Register the type's own properties. Runs once per type node.
    fn configure(_builder: &mut TypeBuilder<'_, Self>) {}

    /// Instance factory for concrete classes, usually
    /// `Some(instantiate::<Self>)`.
    fn factory() -> Option<Factory> {
        None
    }
}

/// Declares that a type embeds its reflected parent.
///
/// Rust has no inheritance: a derived type holds its parent as a field
/// and exposes it here. Property access on a derived instance walks
/// these projections up to the type that owns the property.
pub trait Extends<P: Reflect> {
    /// The embedded parent.
    fn base(&self) -> &P;

    /// The embedded parent, mutably.
    fn base_mut(&mut self) -> &mut P;
}

/// Marker parent for root types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoParent;

/// Relationship between a type `T` and its declared parent.
///
/// Implemented for [`NoParent`] and for every reflected `P` that `T`
/// [`Extends`]. Not meant to be implemented by hand.
///
/// A parent the type does not embed is rejected:
///
/// ```compile_fail
/// use rift_reflect::prelude::*;
///
/// struct Base;
///
/// impl Reflect for Base {
///     type Parent = NoParent;
///     const DECLARATION: Declaration = declaration!("Base");
/// }
///
/// struct Orphan;
///
/// impl Reflect for Orphan {
///     type Parent = Base;
///     const DECLARATION: Declaration = declaration!("Orphan");
/// }
/// ```
///
/// So is a struct extending a class, once the type is registered:
///
/// ```compile_fail
/// use rift_reflect::prelude::*;
///
/// struct Base;
///
/// impl Reflect for Base {
///     type Parent = NoParent;
///     const DECLARATION: Declaration = declaration!("Base");
///     const KIND: TypeKind = TypeKind::Class;
/// }
///
/// struct Data {
///     base: Base,
/// }
///
/// impl Extends<Base> for Data {
///     fn base(&self) -> &Base {
///         &self.base
///     }
///
///     fn base_mut(&mut self) -> &mut Base {
///         &mut self.base
///     }
/// }
///
/// impl Reflect for Data {
///     type Parent = Base;
///     const DECLARATION: Declaration = declaration!("Data");
/// }
///
/// let mut ctx = ReflectionContext::new();
/// ctx.register::<Data>();
/// ```
///
/// With matching kinds the same declaration registers:
///
/// ```
/// use rift_reflect::prelude::*;
///
/// struct Base;
///
/// impl Reflect for Base {
///     type Parent = NoParent;
///     const DECLARATION: Declaration = declaration!("Base");
///     const KIND: TypeKind = TypeKind::Class;
/// }
///
/// struct Derived {
///     base: Base,
/// }
///
/// impl Extends<Base> for Derived {
///     fn base(&self) -> &Base {
///         &self.base
///     }
///
///     fn base_mut(&mut self) -> &mut Base {
///         &mut self.base
///     }
/// }
///
/// impl Reflect for Derived {
///     type Parent = Base;
///     const DECLARATION: Declaration = declaration!("Derived");
///     const KIND: TypeKind = TypeKind::Class;
/// }
///
/// let mut ctx = ReflectionContext::new();
/// ctx.register::<Derived>();
/// assert_eq!(ctx.registry().len(), 2);
/// ```
pub trait Lineage<T>: 'static {
    /// Force the parent's registration and return its node.
    fn init(ctx: &mut ReflectionContext) -> Option<TypeId>;

    /// The projection from a `T` to its parent sub-object.
    fn upcast() -> Option<Upcast>;
}

impl<T> Lineage<T> for NoParent {
    fn init(_ctx: &mut ReflectionContext) -> Option<TypeId> {
        None
    }

    fn upcast() -> Option<Upcast> {
        None
    }
}

impl<T, P> Lineage<T> for P
where
    T: Reflect + Extends<P>,
    P: Reflect,
{
    fn init(ctx: &mut ReflectionContext) -> Option<TypeId> {
        const {
            assert!(
                T::KIND as u8 == P::KIND as u8,
                "a reflected type must have the same kind as its parent"
            )
        };
        Some(ctx.register::<P>())
    }

    fn upcast() -> Option<Upcast> {
        Some(Upcast::of::<T, P>())
    }
}

type UpcastFn = unsafe fn(NonNull<()>) -> NonNull<()>;

/// Type-erased projection from an instance to its parent sub-object.
#[derive(Clone, Copy, Debug)]
pub struct Upcast {
    target: RustTypeId,
    shared: UpcastFn,
    exclusive: UpcastFn,
}

impl Upcast {
    /// The projection from `T` to its embedded `P`.
    pub fn of<T, P>() -> Self
    where
        T: Extends<P> + 'static,
        P: Reflect,
    {
        Self {
            target: RustTypeId::of::<P>(),
            shared: upcast_shared::<T, P>,
            exclusive: upcast_exclusive::<T, P>,
        }
    }

    /// Rust type of the parent sub-object this projection yields.
    pub fn target(&self) -> RustTypeId {
        self.target
    }

    /// Project a pointer to a child into a pointer to its parent.
    ///
    /// # Safety
    ///
    /// `instance` must point to a live value of the child type this
    /// projection was built for. When `exclusive` is set the pointer must
    /// come from a unique borrow.
    pub unsafe fn apply(&self, instance: NonNull<()>, exclusive: bool) -> NonNull<()> {
        let project = if exclusive { self.exclusive } else { self.shared };
        // SAFETY: forwarded caller contract.
        unsafe { project(instance) }
    }
}

unsafe fn upcast_shared<T: Extends<P>, P: Reflect>(instance: NonNull<()>) -> NonNull<()> {
    // SAFETY: the caller passes a pointer to a live `T`.
    let child = unsafe { instance.cast::<T>().as_ref() };
    NonNull::from(child.base()).cast()
}

unsafe fn upcast_exclusive<T: Extends<P>, P: Reflect>(instance: NonNull<()>) -> NonNull<()> {
    let mut child = instance.cast::<T>();
    // SAFETY: the caller passes a uniquely borrowed pointer to a live `T`.
    let child = unsafe { child.as_mut() };
    NonNull::from(child.base_mut()).cast()
}

/// Object-safe view of a reflected value.
///
/// Implemented for every [`Reflect`] type. Checked property access and
/// class factories work in terms of `dyn Instance`.
pub trait Instance: Any {
    /// Declaration of the value's dynamic type.
    fn declaration(&self) -> Declaration;

    /// Rust name of the value's dynamic type, for diagnostics.
    fn rust_type_name(&self) -> &'static str;

    /// Upcast to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Upcast to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Upcast a box to `Box<dyn Any>`, e.g. to downcast a created instance.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Reflect> Instance for T {
    fn declaration(&self) -> Declaration {
        T::DECLARATION
    }

    fn rust_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Weak back-reference from a created instance to its owner.
pub type Owner = Weak<dyn Instance>;

/// Creates a new boxed instance of a class, parented to `owner`.
pub type Factory = fn(Option<Owner>) -> Box<dyn Instance>;

/// A class that can be constructed from its owner alone.
pub trait Construct: Reflect {
    /// Build a fresh instance parented to `owner`.
    fn construct(owner: Option<Owner>) -> Self;
}

/// The [`Factory`] of a [`Construct`] type.
pub fn instantiate<T: Construct>(owner: Option<Owner>) -> Box<dyn Instance> {
    Box::new(T::construct(owner))
}
