//! The container: registry of type providers plus the resolve entry point.

use std::any::Any;
use std::sync::Arc;

use crate::component::SharedInstance;
use crate::error::{InjectError, InjectResult};
use crate::identity::{ResolutionToken, TypeIdentity};
use crate::metadata::ConstructorSource;
use crate::provider::TypeProvider;
use crate::registration::Registration;
use crate::resolver;
use crate::Map;

/// Top-level registry mapping base-type keys to [`TypeProvider`]s.
///
/// `register` decomposes a registration to find or create the provider for
/// its base type; `resolve` looks the provider up by type key, picks the
/// registration by name, and dispatches on the component's creation
/// strategy — delegating reflective construction to the resolver, which
/// recurses back through `resolve` for each constructor dependency.
///
/// The engine is synchronous: registration takes `&mut self`, resolution
/// is a plain recursive call tree bounded by the depth of the dependency
/// graph, and the registry grows monotonically. Re-entering a resolution
/// key mid-resolution fails with `CircularDependency` rather than
/// recursing forever.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use graft_di::{
///     Component, Container, ConstructorCatalog, Registration, SubtypeTable, TypeIdentity,
/// };
///
/// struct Settings { verbose: bool }
///
/// let checker = Arc::new(SubtypeTable::new());
/// let settings_type = TypeIdentity::of::<Settings>();
///
/// let mut component = Component::new(
///     settings_type.clone(),
///     settings_type.clone(),
///     checker,
/// ).unwrap();
/// component.set_instance(Settings { verbose: true }).unwrap();
///
/// let mut container = Container::new(Arc::new(ConstructorCatalog::new()));
/// container.register(Registration::new(component)).unwrap();
///
/// let settings = container.resolve_as::<Settings>(&settings_type).unwrap();
/// assert!(settings.verbose);
/// ```
pub struct Container {
    registry: Map<String, TypeProvider>,
    constructors: Arc<dyn ConstructorSource>,
}

impl Container {
    /// Creates an empty container backed by a constructor source.
    pub fn new(constructors: Arc<dyn ConstructorSource>) -> Self {
        Container {
            registry: Map::default(),
            constructors,
        }
    }

    /// Registers a component under its base type.
    ///
    /// The provider for the base type is created on first use; the
    /// registration is inserted under its resolution key. Fails with
    /// `DuplicateRegistration` when that key is already taken, leaving
    /// existing registrations untouched.
    pub fn register(&mut self, registration: Registration) -> InjectResult<()> {
        let provided = registration.component().base().clone();
        let key = provided.key();

        self.registry
            .entry(key)
            .or_insert_with(|| TypeProvider::new(provided))
            .add_registration(registration)
    }

    /// Registers several components; stops at the first failure.
    pub fn register_all(
        &mut self,
        registrations: impl IntoIterator<Item = Registration>,
    ) -> InjectResult<()> {
        for registration in registrations {
            self.register(registration)?;
        }
        Ok(())
    }

    /// Resolves the unnamed registration for a type.
    pub fn resolve(&self, identity: &TypeIdentity) -> InjectResult<SharedInstance> {
        let mut stack = Vec::new();
        self.resolve_with_stack(identity, None, &mut stack)
    }

    /// Resolves a named registration for a type.
    pub fn resolve_named(
        &self,
        identity: &TypeIdentity,
        name: &str,
    ) -> InjectResult<SharedInstance> {
        let mut stack = Vec::new();
        self.resolve_with_stack(identity, Some(name), &mut stack)
    }

    /// Resolves whatever a token references.
    pub fn resolve_token(&self, token: &ResolutionToken) -> InjectResult<SharedInstance> {
        let mut stack = Vec::new();
        self.resolve_with_stack(token.identity(), token.name(), &mut stack)
    }

    /// Resolves the unnamed registration for a type and downcasts it.
    ///
    /// Fails with `TypeMismatch` when the resolved instance is not a `T`.
    pub fn resolve_as<T: Any + Send + Sync>(
        &self,
        identity: &TypeIdentity,
    ) -> InjectResult<Arc<T>> {
        Self::downcast(self.resolve(identity)?)
    }

    /// Resolves a named registration for a type and downcasts it.
    pub fn resolve_named_as<T: Any + Send + Sync>(
        &self,
        identity: &TypeIdentity,
        name: &str,
    ) -> InjectResult<Arc<T>> {
        Self::downcast(self.resolve_named(identity, name)?)
    }

    fn downcast<T: Any + Send + Sync>(instance: SharedInstance) -> InjectResult<Arc<T>> {
        instance
            .downcast::<T>()
            .map_err(|_| InjectError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Read-only view of the registry, for tests and tooling; the
    /// resolution algorithm itself never iterates it.
    pub fn providers(&self) -> impl Iterator<Item = &TypeProvider> {
        self.registry.values()
    }

    /// The provider registered for a base type, if any.
    pub fn provider_for(&self, identity: &TypeIdentity) -> Option<&TypeProvider> {
        self.registry.get(&identity.key())
    }

    pub(crate) fn constructor_source(&self) -> &dyn ConstructorSource {
        self.constructors.as_ref()
    }

    /// Membership test used during trial constructor selection: is there
    /// an unnamed registration resolvable for this type key? Deliberately
    /// does not resolve anything, so trial selection has no side effects.
    pub(crate) fn has_unnamed_registration(&self, type_key: &str) -> bool {
        self.registry
            .get(type_key)
            .is_some_and(|provider| provider.contains(type_key))
    }

    /// Single resolution path shared by the public entry points and the
    /// resolver's recursion. `stack` holds the resolution keys currently
    /// being built reflectively, for cycle detection.
    pub(crate) fn resolve_with_stack(
        &self,
        identity: &TypeIdentity,
        name: Option<&str>,
        stack: &mut Vec<String>,
    ) -> InjectResult<SharedInstance> {
        let type_key = identity.key();
        if type_key.is_empty() {
            return Err(InjectError::NullArgument("type identity"));
        }

        let resolution_key = match name {
            Some(name) if !name.is_empty() => format!("{}-{}", type_key, name),
            _ => type_key.clone(),
        };

        if stack.iter().any(|entry| entry == &resolution_key) {
            let mut path = stack.clone();
            path.push(resolution_key);
            return Err(InjectError::CircularDependency(path));
        }

        let provider = self
            .registry
            .get(&type_key)
            .ok_or_else(|| InjectError::NotRegistered {
                key: resolution_key.clone(),
            })?;
        let registration = provider.get_registration(&type_key, name).ok_or_else(|| {
            InjectError::NotRegistered {
                key: resolution_key.clone(),
            }
        })?;

        // Instance and Factory strategies produce directly; Reflective
        // falls through to constructor selection.
        if let Some(instance) = registration.component().get_or_create_instance() {
            return Ok(instance);
        }

        stack.push(resolution_key);
        let built = resolver::reflect_instance(self, registration, stack);
        stack.pop();
        built
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registered_types", &self.registry.len())
            .finish_non_exhaustive()
    }
}
