//! Registrations: a component plus an optional name and explicit
//! dependency overrides.

use crate::component::{Component, InstanceFactory, SharedInstance};
use crate::dependency::ExplicitDependency;
use crate::error::{InjectError, InjectResult};
use crate::identity::TypeIdentity;
use crate::Map;
use std::any::Any;

/// Wraps a [`Component`] with an optional disambiguating name and a set of
/// explicit per-dependency overrides.
///
/// The resolution key is the base-type key, qualified with `-<name>` when
/// the registration is named; it is what distinguishes multiple
/// registrations for the same base type inside a provider. An empty name
/// is treated as unnamed.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use graft_di::{Component, Registration, SubtypeTable, TypeIdentity};
///
/// let checker = Arc::new(SubtypeTable::new());
/// let endpoint = TypeIdentity::raw("Endpoint");
/// let component = Component::new(endpoint.clone(), endpoint, checker).unwrap();
///
/// let mut registration = Registration::new(component);
/// assert_eq!(registration.resolution_key(), "Endpoint");
///
/// registration.set_name("fallback");
/// assert_eq!(registration.resolution_key(), "Endpoint-fallback");
/// ```
#[derive(Debug)]
pub struct Registration {
    component: Component,
    name: Option<String>,
    dependencies: Map<String, ExplicitDependency>,
}

impl Registration {
    /// Creates an unnamed registration for a component.
    pub fn new(component: Component) -> Self {
        Registration {
            component,
            name: None,
            dependencies: Map::default(),
        }
    }

    /// Creates a named registration for a component.
    pub fn named(component: Component, name: impl Into<String>) -> Self {
        let mut registration = Registration::new(component);
        registration.set_name(name);
        registration
    }

    /// The disambiguating name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets or clears the name; an empty string clears it.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
    }

    /// The wrapped component.
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// Stores a fixed instance on the component, re-validating its runtime
    /// type against the implementation type.
    pub fn set_instance<T: Any + Send + Sync>(&mut self, value: T) -> InjectResult<()> {
        self.component.set_instance(value)
    }

    /// Stores a pre-erased instance with its declared runtime identity.
    pub fn set_shared_instance(
        &mut self,
        value: SharedInstance,
        runtime_type: &TypeIdentity,
    ) -> InjectResult<()> {
        self.component.set_shared_instance(value, runtime_type)
    }

    /// Attaches a factory to the component, re-validating its declared
    /// return type against the implementation type.
    pub fn set_factory(&mut self, factory: InstanceFactory) -> InjectResult<()> {
        self.component.set_factory(factory)
    }

    /// The key this registration resolves under: the base-type key, or
    /// `<base key>-<name>` when named.
    pub fn resolution_key(&self) -> String {
        match &self.name {
            Some(name) => format!("{}-{}", self.component.base().key(), name),
            None => self.component.base().key(),
        }
    }

    /// Full diagnostics key: the component key (`base->impl`), qualified
    /// with the name when present. Unlike the resolution key this carries
    /// the implementation type.
    pub fn key(&self) -> String {
        match &self.name {
            Some(name) => format!("{}-{}", self.component.generate_key(), name),
            None => self.component.generate_key(),
        }
    }

    /// Adds an explicit dependency override, keyed by its identifier.
    /// A later override with the same identifier replaces the earlier one.
    pub fn add_dependency(&mut self, dependency: ExplicitDependency) -> InjectResult<()> {
        if dependency.identifier().is_empty() {
            return Err(InjectError::NullArgument("dependency identifier"));
        }

        self.dependencies
            .insert(dependency.identifier().to_string(), dependency);
        Ok(())
    }

    /// Looks up an override by parameter name or type key. Absence means
    /// the parameter is resolved implicitly.
    pub fn get_dependency(&self, identifier: &str) -> Option<&ExplicitDependency> {
        self.dependencies.get(identifier)
    }

    /// Whether any explicit overrides are attached.
    pub fn has_explicit_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }
}
