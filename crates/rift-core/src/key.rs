//! Declaration sites and the [`TypeKey`] deduplication identity.

use std::fmt;

/// Where and under which name a reflectable type was declared.
///
/// Built at compile time, usually through the [`declaration!`](crate::declaration)
/// macro so that `file` and `line` point at the declaring impl.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    /// Name the type is reflected under.
    pub name: &'static str,
    /// Source file of the declaration, as reported by `file!()`.
    pub file: &'static str,
    /// Source line of the declaration, as reported by `line!()`.
    pub line: u32,
}

impl Declaration {
    /// Create a declaration from its parts.
    pub const fn new(name: &'static str, file: &'static str, line: u32) -> Self {
        Self { name, file, line }
    }

    /// The registry key for this declaration.
    pub fn key(&self) -> TypeKey {
        TypeKey::new(self.name, self.file, self.line)
    }
}

/// Declare a reflected type name at the current source location.
///
/// ```
/// use rift_core::{declaration, Declaration};
///
/// const DECL: Declaration = declaration!("Vehicle");
/// assert_eq!(DECL.name, "Vehicle");
/// assert_eq!(DECL.file, file!());
/// ```
#[macro_export]
macro_rules! declaration {
    ($name:expr) => {
        $crate::Declaration::new($name, ::core::file!(), ::core::line!())
    };
}

/// Deduplication identity of a registration attempt.
///
/// Two registrations with an equal key are treated as the same logical
/// type. Two distinct types that happen to share a key cannot be told
/// apart by the registry and are merged into one node.
///
/// The file path is normalised so that `\` and `/` separators produce the
/// same key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey {
    name: String,
    file: String,
    line: u32,
}

impl TypeKey {
    /// Build a key from a declared name and call site.
    pub fn new(name: &str, file: &str, line: u32) -> Self {
        Self {
            name: name.to_owned(),
            file: file.replace('\\', "/"),
            line,
        }
    }

    /// Declared name part of the key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalised source file part of the key.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Source line part of the key.
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<&Declaration> for TypeKey {
    fn from(decl: &Declaration) -> Self {
        decl.key()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.file, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_renders_name_file_line() {
        let key = TypeKey::new("Car", "src/car.rs", 12);
        assert_eq!(key.to_string(), "Car:src/car.rs:12");
    }

    #[test]
    fn backslashes_are_normalised() {
        let windows = TypeKey::new("Car", "src\\vehicles\\car.rs", 12);
        let unix = TypeKey::new("Car", "src/vehicles/car.rs", 12);
        assert_eq!(windows, unix);
        assert_eq!(windows.file(), "src/vehicles/car.rs");
    }

    #[test]
    fn line_is_part_of_identity() {
        assert_ne!(
            TypeKey::new("Car", "src/car.rs", 12),
            TypeKey::new("Car", "src/car.rs", 13)
        );
    }

    #[test]
    fn declaration_macro_captures_call_site() {
        let decl = declaration!("Wheel");
        assert_eq!(decl.name, "Wheel");
        assert_eq!(decl.file, file!());
        assert_eq!(decl.line, line!() - 3);
        assert_eq!(decl.key().name(), "Wheel");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn separators_never_change_identity(
                name in "[A-Za-z]{1,12}",
                parts in proptest::collection::vec("[a-z_]{1,8}", 1..5),
                line in 1u32..10_000,
            ) {
                let unix = parts.join("/");
                let windows = parts.join("\\");
                prop_assert_eq!(
                    TypeKey::new(&name, &unix, line),
                    TypeKey::new(&name, &windows, line)
                );
            }
        }
    }
}
