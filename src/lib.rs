//! # graft-di
//!
//! Keyed dependency injection with greedy constructor selection and
//! per-parameter dependency overrides.
//!
//! Callers declare, for an abstract ("base") type, one or more concrete
//! construction strategies — a fixed instance, a factory, or "build via
//! constructor" — and later ask the container for an instance satisfying a
//! requested type, optionally disambiguated by name. The container picks
//! the richest constructor whose parameters can all be supplied and
//! resolves every dependency recursively, honoring explicit overrides.
//!
//! ## Features
//!
//! - **Three creation strategies**: fixed instances (singleton semantics),
//!   factories (transient semantics), and constructor-based building
//! - **Named registrations**: several implementations of one base type,
//!   disambiguated by name, without conflicting
//! - **Greedy constructor selection**: deterministic, side-effect-free
//!   trial selection favoring the constructor with the most parameters
//! - **Per-parameter overrides**: bind a single constructor parameter by
//!   its name or type, by value, factory, or reference
//! - **Registration-time validation**: implementation, factory return, and
//!   instance types are checked against the declared base type, recursively
//!   over generic arguments
//! - **Cycle detection**: re-entrant resolution fails with the full path
//!   instead of recursing forever
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use graft_di::{
//!     argument, Component, Container, ConstructorCatalog, ConstructorDescriptor,
//!     Parameter, Registration, SubtypeTable, TypeIdentity,
//! };
//!
//! struct Connection { url: String }
//! struct Repository { connection: Arc<Connection> }
//!
//! let connection_type = TypeIdentity::of::<Connection>();
//! let repository_type = TypeIdentity::of::<Repository>();
//!
//! // Declare how Repository is constructed.
//! let mut catalog = ConstructorCatalog::new();
//! catalog.add(&repository_type, ConstructorDescriptor::new(
//!     vec![Parameter::named(connection_type.clone(), "connection")],
//!     |args| Ok(Arc::new(Repository { connection: argument::<Connection>(args, 0)? })),
//! ));
//!
//! let checker = Arc::new(SubtypeTable::new());
//! let mut container = Container::new(Arc::new(catalog));
//!
//! // A fixed Connection instance…
//! let mut connection = Component::new(
//!     connection_type.clone(),
//!     connection_type.clone(),
//!     checker.clone(),
//! ).unwrap();
//! connection.set_instance(Connection { url: "postgres://localhost".into() }).unwrap();
//! container.register(Registration::new(connection)).unwrap();
//!
//! // …and a Repository built via its constructor.
//! let repository = Component::new(
//!     repository_type.clone(),
//!     repository_type.clone(),
//!     checker,
//! ).unwrap();
//! container.register(Registration::new(repository)).unwrap();
//!
//! let repository = container.resolve_as::<Repository>(&repository_type).unwrap();
//! assert_eq!(repository.connection.url, "postgres://localhost");
//! ```
//!
//! ## Creation strategies
//!
//! - **Instance**: the same stored object on every resolution
//! - **Factory**: a fresh factory invocation on every resolution
//! - **Reflective** (default): constructor selection plus recursive
//!   dependency resolution
//!
//! When both an instance and a factory are set on one component, the
//! instance wins; the precedence is computed from what is set, not from
//! call order.

// Module declarations
pub mod compat;
pub mod component;
pub mod container;
pub mod dependency;
pub mod error;
pub mod identity;
pub mod metadata;
pub mod provider;
pub mod registration;

mod resolver;

// Registry maps; ahash-backed under the performance feature.
#[cfg(feature = "performance")]
pub(crate) type Map<K, V> = ahash::AHashMap<K, V>;
#[cfg(not(feature = "performance"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

// Re-export core types
pub use compat::{AssignabilityChecker, SubtypeTable};
pub use component::{Component, CreationStrategy, InstanceFactory, SharedInstance};
pub use container::Container;
pub use dependency::{DependencyProvider, ExplicitDependency};
pub use error::{InjectError, InjectResult};
pub use identity::{ResolutionToken, TypeIdentity};
pub use metadata::{
    argument, ConstructorCatalog, ConstructorDescriptor, ConstructorSource, Parameter,
};
pub use provider::TypeProvider;
pub use registration::Registration;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn empty_container() -> Container {
        Container::new(Arc::new(ConstructorCatalog::new()))
    }

    #[test]
    fn test_instance_resolution_is_singleton() {
        let checker = Arc::new(SubtypeTable::new());
        let identity = TypeIdentity::of::<usize>();

        let mut component =
            Component::new(identity.clone(), identity.clone(), checker).unwrap();
        component.set_instance(42usize).unwrap();

        let mut container = empty_container();
        container.register(Registration::new(component)).unwrap();

        let a = container.resolve_as::<usize>(&identity).unwrap();
        let b = container.resolve_as::<usize>(&identity).unwrap();

        assert_eq!(*a, 42);
        assert!(Arc::ptr_eq(&a, &b)); // Same instance
    }

    #[test]
    fn test_factory_resolution_is_transient() {
        let checker = Arc::new(SubtypeTable::new());
        let identity = TypeIdentity::of::<String>();

        let mut component =
            Component::new(identity.clone(), identity.clone(), checker).unwrap();
        component
            .set_factory(InstanceFactory::new(|| "fresh".to_string()))
            .unwrap();

        let mut container = empty_container();
        container.register(Registration::new(component)).unwrap();

        let a = container.resolve_as::<String>(&identity).unwrap();
        let b = container.resolve_as::<String>(&identity).unwrap();

        assert_eq!(*a, "fresh");
        assert!(!Arc::ptr_eq(&a, &b)); // Different instances
    }

    #[test]
    fn test_unregistered_type_is_not_registered() {
        let container = empty_container();
        let result = container.resolve(&TypeIdentity::raw("Nothing"));

        assert!(matches!(result, Err(InjectError::NotRegistered { .. })));
    }
}
