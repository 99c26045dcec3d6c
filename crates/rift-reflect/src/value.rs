//! Declared value kinds of reflected properties.

use std::any::TypeId as RustTypeId;

use crate::traits::Reflect;

/// A type that may be the declared value of a property.
///
/// Implemented for the primitive value types and for every [`Reflect`]
/// type. A property whose field type is not `Reflected` does not compile.
pub trait Reflected: 'static {
    /// Name the value kind is reflected under.
    const NAME: &'static str;
}

impl<T: Reflect> Reflected for T {
    const NAME: &'static str = T::DECLARATION.name;
}

macro_rules! reflected_primitives {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Reflected for $ty {
                const NAME: &'static str = $name;
            }
        )*
    };
}

reflected_primitives! {
    bool => "bool",
    char => "char",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    f32 => "f32",
    f64 => "f64",
    String => "String",
}

/// The declared value kind of a property: its reflected name plus the
/// identity of the Rust type behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValueKind {
    name: &'static str,
    rust_type: RustTypeId,
}

impl ValueKind {
    /// The value kind of `V`.
    pub fn of<V: Reflected>() -> Self {
        Self {
            name: V::NAME,
            rust_type: RustTypeId::of::<V>(),
        }
    }

    /// Reflected name of the value kind.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this value kind is exactly `V`.
    pub fn is<V: Reflected>(&self) -> bool {
        self.rust_type == RustTypeId::of::<V>()
    }
}
