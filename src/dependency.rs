//! Explicit per-parameter dependency overrides.
//!
//! An override replaces implicit recursive resolution for exactly one
//! constructor parameter of the registration it is attached to. It is
//! identified either by the parameter's declared name or by the
//! parameter's type key, depending on which constructor was used, and it
//! supplies its value as a fixed instance, a factory, or a resolve-by-
//! reference token.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::component::{InstanceFactory, SharedInstance};
use crate::identity::{ResolutionToken, TypeIdentity};

/// How an override materializes its value during argument building.
#[derive(Clone)]
pub enum DependencyProvider {
    /// The same fixed value on every resolution
    Instance(SharedInstance),
    /// A fresh factory invocation per resolution
    Factory(InstanceFactory),
    /// Recursion into the container, optionally targeting a named
    /// registration
    Token(ResolutionToken),
}

impl fmt::Debug for DependencyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyProvider::Instance(_) => f.write_str("Instance(..)"),
            DependencyProvider::Factory(factory) => {
                write!(f, "Factory(returns: {})", factory.returns())
            }
            DependencyProvider::Token(token) => write!(f, "Token({})", token),
        }
    }
}

/// A registration-time instruction binding one constructor parameter.
///
/// # Examples
///
/// ```rust
/// use graft_di::{ExplicitDependency, ResolutionToken, TypeIdentity};
///
/// // Bind the parameter named "timeout" to a fixed value
/// let by_name = ExplicitDependency::for_parameter("timeout", 30u64);
/// assert_eq!(by_name.identifier(), "timeout");
///
/// // Redirect every Logger-typed parameter to the "console" registration
/// let logger = TypeIdentity::raw("Logger");
/// let by_type = ExplicitDependency::for_type_token(
///     &logger,
///     ResolutionToken::named(logger.clone(), "console"),
/// );
/// assert_eq!(by_type.identifier(), "Logger");
/// ```
#[derive(Debug, Clone)]
pub struct ExplicitDependency {
    identifier: String,
    provider: DependencyProvider,
}

impl ExplicitDependency {
    /// Fixed value for the constructor parameter named `parameter`.
    pub fn for_parameter<T: Any + Send + Sync>(parameter: impl Into<String>, value: T) -> Self {
        ExplicitDependency {
            identifier: parameter.into(),
            provider: DependencyProvider::Instance(Arc::new(value)),
        }
    }

    /// Pre-erased fixed value for the parameter named `parameter`.
    pub fn for_parameter_shared(parameter: impl Into<String>, value: SharedInstance) -> Self {
        ExplicitDependency {
            identifier: parameter.into(),
            provider: DependencyProvider::Instance(value),
        }
    }

    /// Factory-supplied value for the parameter named `parameter`.
    pub fn for_parameter_factory(parameter: impl Into<String>, factory: InstanceFactory) -> Self {
        ExplicitDependency {
            identifier: parameter.into(),
            provider: DependencyProvider::Factory(factory),
        }
    }

    /// Resolve-by-reference for the parameter named `parameter`.
    pub fn for_parameter_token(parameter: impl Into<String>, token: ResolutionToken) -> Self {
        ExplicitDependency {
            identifier: parameter.into(),
            provider: DependencyProvider::Token(token),
        }
    }

    /// Fixed value for parameters declared with type `dependency_type`.
    pub fn for_type<T: Any + Send + Sync>(dependency_type: &TypeIdentity, value: T) -> Self {
        ExplicitDependency {
            identifier: dependency_type.key(),
            provider: DependencyProvider::Instance(Arc::new(value)),
        }
    }

    /// Pre-erased fixed value for parameters of type `dependency_type`.
    pub fn for_type_shared(dependency_type: &TypeIdentity, value: SharedInstance) -> Self {
        ExplicitDependency {
            identifier: dependency_type.key(),
            provider: DependencyProvider::Instance(value),
        }
    }

    /// Factory-supplied value for parameters of type `dependency_type`.
    pub fn for_type_factory(dependency_type: &TypeIdentity, factory: InstanceFactory) -> Self {
        ExplicitDependency {
            identifier: dependency_type.key(),
            provider: DependencyProvider::Factory(factory),
        }
    }

    /// Resolve-by-reference for parameters of type `dependency_type`.
    pub fn for_type_token(dependency_type: &TypeIdentity, token: ResolutionToken) -> Self {
        ExplicitDependency {
            identifier: dependency_type.key(),
            provider: DependencyProvider::Token(token),
        }
    }

    /// The override key: a parameter name or a type key, depending on
    /// which constructor built this override.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// How the override supplies its value.
    pub fn provider(&self) -> &DependencyProvider {
        &self.provider
    }
}
