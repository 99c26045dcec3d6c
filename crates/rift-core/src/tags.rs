//! Capability and visibility tags attached to types and properties.
//!
//! Type tags and property tags are separate bitsets. A flag that only
//! makes sense on one side (`ABSTRACT` on types, `DETAILS_*` on
//! properties) simply does not exist on the other, so a misplaced tag
//! is a compile error rather than a run-time check.

use bitflags::bitflags;

bitflags! {
    /// Tags attached to a reflected type.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeTags: u8 {
        /// The type can't be instantiated; class factories are ignored.
        const ABSTRACT = 1 << 0;
    }
}

bitflags! {
    /// Tags attached to a reflected property.
    ///
    /// Type-only flags don't exist here:
    ///
    /// ```compile_fail
    /// use rift_core::{PropertyTags, TypeTags};
    ///
    /// let tags: PropertyTags = TypeTags::ABSTRACT;
    /// ```
    ///
    /// ```compile_fail
    /// use rift_core::PropertyTags;
    ///
    /// let tags = PropertyTags::ABSTRACT;
    /// ```
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PropertyTags: u8 {
        /// Editable in details panels.
        const DETAILS_EDIT = 1 << 1;
        /// Visible, read-only, in details panels.
        const DETAILS_VIEW = 1 << 2;
    }
}

/// Classification of a reflected type node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A plain data type. Has properties but no instance factory.
    #[default]
    Struct,
    /// An object type. May create new instances of itself.
    Class,
}
