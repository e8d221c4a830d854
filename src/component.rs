//! Components: a base type paired with a validated implementation type
//! and at most one explicit construction strategy.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::compat::AssignabilityChecker;
use crate::error::{InjectError, InjectResult};
use crate::identity::TypeIdentity;

/// Type-erased, shareable instance produced by the container.
///
/// Instance-strategy registrations hand out clones of the same `Arc`, so
/// reference equality (`Arc::ptr_eq`) holds across resolutions. Callers
/// downcast with [`Container::resolve_as`](crate::Container::resolve_as)
/// or [`Arc::downcast`].
pub type SharedInstance = Arc<dyn Any + Send + Sync>;

/// A factory producing transient instances, with a declared return type.
///
/// The declared return identity is validated against the owning
/// component's implementation type when the factory is attached; the
/// closure itself is invoked once per resolution.
#[derive(Clone)]
pub struct InstanceFactory {
    returns: TypeIdentity,
    make: Arc<dyn Fn() -> SharedInstance + Send + Sync>,
}

impl InstanceFactory {
    /// Wraps a typed closure; the declared return identity is captured
    /// from the closure's Rust return type.
    pub fn new<T, F>(make: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        InstanceFactory {
            returns: TypeIdentity::of::<T>(),
            make: Arc::new(move || Arc::new(make()) as SharedInstance),
        }
    }

    /// Wraps an erased closure with an explicitly declared return identity.
    ///
    /// Use this when the factory produces a nominal type whose identity
    /// does not coincide with a Rust type name (generic identities built
    /// with [`TypeIdentity::generic`], for instance).
    pub fn with_return_type<F>(returns: TypeIdentity, make: F) -> Self
    where
        F: Fn() -> SharedInstance + Send + Sync + 'static,
    {
        InstanceFactory {
            returns,
            make: Arc::new(make),
        }
    }

    /// The declared return type identity.
    pub fn returns(&self) -> &TypeIdentity {
        &self.returns
    }

    /// Invokes the factory. Each call produces a fresh instance.
    pub fn create(&self) -> SharedInstance {
        (self.make)()
    }
}

impl fmt::Debug for InstanceFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceFactory")
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

/// How a component produces an object.
///
/// `Reflective` is the default; it means "build via constructor" and is
/// handled by the resolver, not the component. The strategy is computed
/// from what is currently set: a stored instance always dominates a
/// factory, which dominates reflective construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStrategy {
    /// A fixed instance; every resolution returns the same object
    Instance,
    /// A factory invocation per resolution; every resolution is a new object
    Factory,
    /// Constructor selection and recursive dependency resolution
    Reflective,
}

/// Pairs a base type with an implementation type and holds at most one
/// explicit construction strategy.
///
/// The implementation type must be assignable to the base type; this is
/// validated when the component is constructed and re-validated whenever
/// an instance or factory is attached. Violations fail immediately with
/// [`InjectError::IncompatibleType`] and are never deferred to resolution
/// time.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use graft_di::{Component, CreationStrategy, SubtypeTable, TypeIdentity};
///
/// let mut table = SubtypeTable::new();
/// table.allow("Cache", "LruCache");
/// let checker = Arc::new(table);
///
/// let component = Component::new(
///     TypeIdentity::raw("Cache"),
///     TypeIdentity::raw("LruCache"),
///     checker.clone(),
/// ).unwrap();
/// assert_eq!(component.strategy(), CreationStrategy::Reflective);
/// assert_eq!(component.generate_key(), "Cache->LruCache");
///
/// // Reversing the direction fails at construction time
/// let reversed = Component::new(
///     TypeIdentity::raw("LruCache"),
///     TypeIdentity::raw("Cache"),
///     checker,
/// );
/// assert!(reversed.is_err());
/// ```
pub struct Component {
    base: TypeIdentity,
    implementation: TypeIdentity,
    checker: Arc<dyn AssignabilityChecker>,
    instance: Option<SharedInstance>,
    factory: Option<InstanceFactory>,
}

impl Component {
    /// Creates a component, validating that `implementation` is assignable
    /// to `base` (recursively over generic arguments).
    pub fn new(
        base: TypeIdentity,
        implementation: TypeIdentity,
        checker: Arc<dyn AssignabilityChecker>,
    ) -> InjectResult<Self> {
        checker.check_assignable(&base, &implementation)?;

        Ok(Component {
            base,
            implementation,
            checker,
            instance: None,
            factory: None,
        })
    }

    /// The abstract type this component provides.
    pub fn base(&self) -> &TypeIdentity {
        &self.base
    }

    /// The concrete type actually constructed.
    pub fn implementation(&self) -> &TypeIdentity {
        &self.implementation
    }

    /// The current creation strategy. Instance dominates Factory dominates
    /// Reflective, regardless of the order the setters were called in.
    pub fn strategy(&self) -> CreationStrategy {
        if self.instance.is_some() {
            return CreationStrategy::Instance;
        }
        if self.factory.is_some() {
            return CreationStrategy::Factory;
        }
        CreationStrategy::Reflective
    }

    /// Stores a fixed instance, validating its runtime type against the
    /// implementation type.
    ///
    /// The captured runtime identity is the value's Rust type name; use
    /// [`set_shared_instance`](Component::set_shared_instance) when the
    /// value stands for a nominal identity with a different name.
    pub fn set_instance<T: Any + Send + Sync>(&mut self, value: T) -> InjectResult<()> {
        let runtime_type = TypeIdentity::of::<T>();
        self.set_shared_instance(Arc::new(value), &runtime_type)
    }

    /// Stores an already-erased instance together with its declared
    /// runtime identity.
    ///
    /// Only the raw types are compared: generic arguments of a concrete
    /// value are erased and cannot be checked.
    pub fn set_shared_instance(
        &mut self,
        value: SharedInstance,
        runtime_type: &TypeIdentity,
    ) -> InjectResult<()> {
        if !self
            .checker
            .raw_assignable(self.implementation.name(), runtime_type.name())
        {
            return Err(InjectError::IncompatibleType {
                base: self.implementation.key(),
                implementation: runtime_type.key(),
                detail: format!(
                    "instance of runtime type {} cannot back implementation type {}",
                    runtime_type.name(),
                    self.implementation.name()
                ),
            });
        }

        self.instance = Some(value);
        Ok(())
    }

    /// Attaches a factory, validating its declared return type against the
    /// implementation type.
    ///
    /// When both sides are generic the comparison recurses over type
    /// arguments; otherwise only the raw types are compared.
    pub fn set_factory(&mut self, factory: InstanceFactory) -> InjectResult<()> {
        if self.implementation.is_generic() && factory.returns().is_generic() {
            self.checker
                .check_assignable(&self.implementation, factory.returns())?;
        } else if !self
            .checker
            .raw_assignable(self.implementation.name(), factory.returns().name())
        {
            return Err(InjectError::IncompatibleType {
                base: self.implementation.key(),
                implementation: factory.returns().key(),
                detail: format!(
                    "factory returning {} cannot back implementation type {}",
                    factory.returns().name(),
                    self.implementation.name()
                ),
            });
        }

        self.factory = Some(factory);
        Ok(())
    }

    /// The stored instance, if the Instance strategy is in effect.
    pub fn instance(&self) -> Option<&SharedInstance> {
        self.instance.as_ref()
    }

    /// The attached factory, if any.
    pub fn factory(&self) -> Option<&InstanceFactory> {
        self.factory.as_ref()
    }

    /// Produces an object under the Instance or Factory strategy.
    ///
    /// Instance: the same stored object every call (singleton semantics).
    /// Factory: a fresh invocation every call (transient semantics).
    /// Reflective components return `None`; building them is the
    /// resolver's job.
    pub fn get_or_create_instance(&self) -> Option<SharedInstance> {
        if let Some(instance) = &self.instance {
            return Some(instance.clone());
        }

        self.factory.as_ref().map(InstanceFactory::create)
    }

    /// Full component identity, `<base key>-><impl key>`, used for
    /// diagnostics. Distinct from the resolution key, which indexes on
    /// base type and name only.
    pub fn generate_key(&self) -> String {
        format!("{}->{}", self.base.key(), self.implementation.key())
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("base", &self.base)
            .field("implementation", &self.implementation)
            .field("strategy", &self.strategy())
            .finish_non_exhaustive()
    }
}
