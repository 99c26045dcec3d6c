//! Error types for checked property access.
//!
//! Lookups in the registry never fail with an error: they return `None`
//! or `false`. Errors only arise when a caller hands a property an
//! instance it can't safely project into.

use std::error::Error;
use std::fmt;

/// Errors from checked property access through a type-erased instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReflectError {
    /// The instance's Rust type was never registered with this registry.
    UnregisteredInstance {
        /// Rust type name of the instance.
        rust_type: &'static str,
    },
    /// The instance's type is neither the property owner nor one of its
    /// descendants.
    UnrelatedInstance {
        /// Name of the accessed property.
        property: String,
        /// Name of the type that owns the property.
        owner: String,
        /// Name of the instance's reflected type.
        instance: String,
    },
    /// The requested value type differs from the property's declared kind.
    ValueKindMismatch {
        /// Name of the accessed property.
        property: String,
        /// Declared value kind of the property.
        expected: &'static str,
        /// Value kind the caller asked for.
        found: &'static str,
    },
    /// The instance (or one of its ancestors) resolves to a type node that
    /// was built by a different Rust type sharing the same type key.
    MergedDeclaration {
        /// Name of the merged type node.
        name: String,
    },
}

impl fmt::Display for ReflectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnregisteredInstance { rust_type } => {
                write!(f, "instance of unregistered type '{rust_type}'")
            }
            Self::UnrelatedInstance {
                property,
                owner,
                instance,
            } => {
                write!(
                    f,
                    "property '{owner}.{property}' accessed on unrelated type '{instance}'"
                )
            }
            Self::ValueKindMismatch {
                property,
                expected,
                found,
            } => {
                write!(
                    f,
                    "property '{property}' holds '{expected}', requested '{found}'"
                )
            }
            Self::MergedDeclaration { name } => {
                write!(
                    f,
                    "type '{name}' was registered by another declaration with the same key"
                )
            }
        }
    }
}

impl Error for ReflectError {}
