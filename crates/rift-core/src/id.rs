//! Strongly-typed indices into the reflection registry.

use std::fmt;

/// Identifies a registered type within a reflection registry.
///
/// Types are assigned sequential IDs in registration order.
/// `TypeId(n)` is the n-th type node created by the registry, which
/// also means a parent always has a smaller ID than its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Position of this type in the registry's dense table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TypeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a registered property within a reflection registry.
///
/// Property IDs are global to the registry, not local to their owning
/// type. Re-declaring a property name on the same type allocates a new
/// ID; the old one stays valid but is no longer reachable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyId(pub u32);

impl PropertyId {
    /// Position of this property in the registry's dense table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PropertyId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
