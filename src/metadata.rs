//! Constructor metadata: the reflective collaborator the resolver
//! consults.
//!
//! Rust cannot enumerate a type's constructors at runtime, so callers
//! declare them: each [`ConstructorDescriptor`] exposes an ordered
//! parameter list (types, and optionally names) plus an invocation
//! closure. A [`ConstructorSource`] hands the resolver every declared
//! constructor of an implementation type, in a deterministic order; the
//! in-memory [`ConstructorCatalog`] is the standard implementation.

use std::sync::Arc;

use crate::component::SharedInstance;
use crate::identity::TypeIdentity;
use crate::Map;

/// One declared constructor parameter: its type identity and, when the
/// caller chose to state it, its name.
///
/// Parameter names are optional. Without them, overrides can only match by
/// type key and implicit resolution applies; with them, name-identified
/// overrides become possible and take priority.
#[derive(Debug, Clone)]
pub struct Parameter {
    identity: TypeIdentity,
    name: Option<String>,
}

impl Parameter {
    /// An unnamed parameter of the given type.
    pub fn new(identity: TypeIdentity) -> Self {
        Parameter {
            identity,
            name: None,
        }
    }

    /// A parameter with a declared name.
    pub fn named(identity: TypeIdentity, name: impl Into<String>) -> Self {
        Parameter {
            identity,
            name: Some(name.into()),
        }
    }

    /// The parameter's declared type identity.
    pub fn identity(&self) -> &TypeIdentity {
        &self.identity
    }

    /// The parameter's declared name, if stated.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

type ConstructFn = Arc<dyn Fn(&[SharedInstance]) -> Result<SharedInstance, String> + Send + Sync>;

/// A declared constructor: ordered parameters plus an invocation closure.
///
/// The closure receives the fully built argument list (one erased instance
/// per parameter, in declaration order) and returns the new instance, or a
/// message describing why construction failed. Failures are wrapped by the
/// resolver as `ConstructionFailure` and never retried.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use graft_di::{argument, ConstructorDescriptor, Parameter, TypeIdentity};
///
/// struct Greeter { prefix: Arc<String> }
///
/// let descriptor = ConstructorDescriptor::new(
///     vec![Parameter::named(TypeIdentity::of::<String>(), "prefix")],
///     |args| {
///         Ok(Arc::new(Greeter {
///             prefix: argument::<String>(args, 0)?,
///         }))
///     },
/// );
/// assert_eq!(descriptor.arity(), 1);
/// ```
#[derive(Clone)]
pub struct ConstructorDescriptor {
    parameters: Vec<Parameter>,
    construct: ConstructFn,
}

impl ConstructorDescriptor {
    /// Declares a constructor from its parameter list and invocation
    /// closure.
    pub fn new<F>(parameters: Vec<Parameter>, construct: F) -> Self
    where
        F: Fn(&[SharedInstance]) -> Result<SharedInstance, String> + Send + Sync + 'static,
    {
        ConstructorDescriptor {
            parameters,
            construct: Arc::new(construct),
        }
    }

    /// Declares a zero-parameter constructor from a plain value maker.
    pub fn nullary<T, F>(make: F) -> Self
    where
        T: std::any::Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        ConstructorDescriptor::new(Vec::new(), move |_| Ok(Arc::new(make()) as SharedInstance))
    }

    /// The ordered parameter declarations.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Invokes the constructor with a built argument list.
    pub fn construct(&self, arguments: &[SharedInstance]) -> Result<SharedInstance, String> {
        (self.construct)(arguments)
    }
}

impl std::fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Enumerates the declared constructors of an implementation type.
///
/// Must be deterministic: repeated calls for the same type return the same
/// constructors in the same order, because the resolver's tie-breaking
/// depends on source order.
pub trait ConstructorSource: Send + Sync {
    /// Every declared constructor of `implementation`, in declaration
    /// order. Unknown types return an empty list.
    fn constructors(&self, implementation: &TypeIdentity) -> Vec<ConstructorDescriptor>;
}

/// In-memory constructor source keyed by implementation type key.
///
/// ```rust
/// use std::sync::Arc;
/// use graft_di::{ConstructorCatalog, ConstructorDescriptor, ConstructorSource, TypeIdentity};
///
/// struct Clock;
///
/// let clock = TypeIdentity::raw("Clock");
/// let mut catalog = ConstructorCatalog::new();
/// catalog.add(&clock, ConstructorDescriptor::nullary(|| Clock));
///
/// assert_eq!(catalog.constructors(&clock).len(), 1);
/// assert!(catalog.constructors(&TypeIdentity::raw("Other")).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct ConstructorCatalog {
    by_type: Map<String, Vec<ConstructorDescriptor>>,
}

impl ConstructorCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a constructor for an implementation type. Declaration
    /// order is preserved and used for tie-breaking.
    pub fn add(
        &mut self,
        implementation: &TypeIdentity,
        descriptor: ConstructorDescriptor,
    ) -> &mut Self {
        self.by_type
            .entry(implementation.key())
            .or_default()
            .push(descriptor);
        self
    }
}

impl ConstructorSource for ConstructorCatalog {
    fn constructors(&self, implementation: &TypeIdentity) -> Vec<ConstructorDescriptor> {
        self.by_type
            .get(&implementation.key())
            .cloned()
            .unwrap_or_default()
    }
}

/// Downcasts one built constructor argument to its concrete type.
///
/// Intended for use inside invocation closures; the error strings feed
/// straight into `ConstructionFailure`.
pub fn argument<T: std::any::Any + Send + Sync>(
    arguments: &[SharedInstance],
    index: usize,
) -> Result<Arc<T>, String> {
    let value = arguments
        .get(index)
        .ok_or_else(|| format!("missing constructor argument at position {}", index))?;

    value.clone().downcast::<T>().map_err(|_| {
        format!(
            "constructor argument at position {} is not a {}",
            index,
            std::any::type_name::<T>()
        )
    })
}
