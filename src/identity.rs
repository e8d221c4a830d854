//! Type identity and resolution tokens.
//!
//! Everything in the container is keyed by strings derived from
//! [`TypeIdentity`]: the registry maps base-type keys to providers,
//! providers map resolution keys to registrations, and the resolver
//! compares constructor parameter keys against registered keys. Two
//! identities built from structurally identical descriptions always
//! produce identical keys, no matter where they were built.

use std::fmt;
use std::hash::{Hash, Hasher};

/// Canonical, comparable descriptor of a type, including generic arguments.
///
/// A `TypeIdentity` is an immutable value pairing a canonical type name
/// with an ordered list of generic-argument identities. Identity is a
/// first-class value built by the caller; there is no capture mechanism
/// beyond [`TypeIdentity::of`], which borrows the Rust type name.
///
/// Two identities are equal iff their [`key`](TypeIdentity::key)s match.
///
/// # Examples
///
/// ```rust
/// use graft_di::TypeIdentity;
///
/// // Nominal identities for an abstract hierarchy
/// let list_of_string = TypeIdentity::generic("List", vec![TypeIdentity::raw("String")]);
/// assert_eq!(list_of_string.key(), "List<String>");
///
/// // Identities captured from Rust types
/// let a = TypeIdentity::of::<Vec<String>>();
/// let b = TypeIdentity::of::<Vec<String>>();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct TypeIdentity {
    name: String,
    arguments: Vec<TypeIdentity>,
}

impl TypeIdentity {
    /// Captures a Rust type into an identity.
    ///
    /// The canonical name is `std::any::type_name`, which is deterministic
    /// within a build, so keys produced at registration time compare equal
    /// to keys produced at constructor-inspection time. Generic Rust types
    /// keep their full name (`alloc::vec::Vec<i32>`) as the raw name; use
    /// [`TypeIdentity::generic`] when argumentwise compatibility checking
    /// is needed.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::raw(std::any::type_name::<T>())
    }

    /// Builds a non-generic identity from a canonical name.
    pub fn raw(name: impl Into<String>) -> Self {
        TypeIdentity {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Builds a generic identity from a raw name and ordered argument
    /// identities.
    ///
    /// ```rust
    /// use graft_di::TypeIdentity;
    ///
    /// let nested = TypeIdentity::generic(
    ///     "Map",
    ///     vec![
    ///         TypeIdentity::raw("String"),
    ///         TypeIdentity::generic("List", vec![TypeIdentity::raw("i32")]),
    ///     ],
    /// );
    /// assert_eq!(nested.key(), "Map<String, List<i32>>");
    /// ```
    pub fn generic(name: impl Into<String>, arguments: Vec<TypeIdentity>) -> Self {
        TypeIdentity {
            name: name.into(),
            arguments,
        }
    }

    /// The raw (type-erased) canonical name, without generic arguments.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered generic-argument identities; empty for non-generic types.
    pub fn arguments(&self) -> &[TypeIdentity] {
        &self.arguments
    }

    /// Whether this identity carries generic arguments.
    pub fn is_generic(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// The canonical string key used for equality, hashing, and as a map
    /// key throughout the container.
    pub fn key(&self) -> String {
        if self.arguments.is_empty() {
            return self.name.clone();
        }

        let arguments: Vec<String> = self.arguments.iter().map(TypeIdentity::key).collect();
        format!("{}<{}>", self.name, arguments.join(", "))
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// A resolution request: a type identity plus an optional registration name.
///
/// Tokens are what explicit resolve-by-reference overrides carry, and what
/// [`Container::resolve_token`](crate::Container::resolve_token) accepts.
/// The token key follows the resolution-key convention: the type key alone,
/// or `<type key>-<name>` when named. An empty name means unnamed.
///
/// # Examples
///
/// ```rust
/// use graft_di::{ResolutionToken, TypeIdentity};
///
/// let identity = TypeIdentity::raw("Logger");
/// assert_eq!(ResolutionToken::of(identity.clone()).key(), "Logger");
/// assert_eq!(ResolutionToken::named(identity, "console").key(), "Logger-console");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionToken {
    identity: TypeIdentity,
    name: Option<String>,
}

impl ResolutionToken {
    /// Token for the unnamed registration of a type.
    pub fn of(identity: TypeIdentity) -> Self {
        ResolutionToken {
            identity,
            name: None,
        }
    }

    /// Token for a named registration of a type.
    pub fn named(identity: TypeIdentity, name: impl Into<String>) -> Self {
        let name = name.into();
        ResolutionToken {
            identity,
            name: if name.is_empty() { None } else { Some(name) },
        }
    }

    /// The requested type identity.
    pub fn identity(&self) -> &TypeIdentity {
        &self.identity
    }

    /// The requested registration name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The resolution key this token looks up.
    pub fn key(&self) -> String {
        match &self.name {
            Some(name) => format!("{}-{}", self.identity.key(), name),
            None => self.identity.key(),
        }
    }
}

impl fmt::Display for ResolutionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
