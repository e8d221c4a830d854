//! Error types for the dependency injection container.

use std::fmt;

/// Dependency injection errors.
///
/// Represents the error conditions that can occur during component
/// registration or resolution. Every error surfaces synchronously to the
/// caller of `register`/`resolve`; nothing is retried or swallowed, and a
/// failed call never leaves partial state behind in the container.
///
/// # Examples
///
/// ```rust
/// use graft_di::InjectError;
///
/// let not_registered = InjectError::NotRegistered {
///     key: "myapp::Database".to_string(),
/// };
/// let circular = InjectError::CircularDependency(vec![
///     "ServiceA".to_string(),
///     "ServiceB".to_string(),
///     "ServiceA".to_string(),
/// ]);
///
/// // All errors implement Display
/// println!("Error: {}", not_registered);
/// println!("Error: {}", circular);
/// ```
#[derive(Debug, Clone)]
pub enum InjectError {
    /// A required input (type identity, parameter name) was absent or empty
    NullArgument(&'static str),
    /// Implementation, factory return, or instance runtime type is not
    /// assignable to the declared type, including generic arity or
    /// argument mismatches
    IncompatibleType {
        /// Key of the type something had to be assignable to
        base: String,
        /// Key of the type that failed the check
        implementation: String,
        /// What exactly went wrong (raw types, arity, argument position)
        detail: String,
    },
    /// A second registration was added under an existing resolution key
    DuplicateRegistration {
        /// The conflicting resolution key
        key: String,
    },
    /// No provider exists for the requested type key, or no registration
    /// exists under the requested name
    NotRegistered {
        /// The resolution key that was looked up
        key: String,
    },
    /// No constructor of the implementation type could be fully satisfied
    UnsatisfiedDependencies {
        /// Full component key (`base->impl`) of the failing registration
        component: String,
        /// Type keys of every unresolved parameter of the best candidate
        /// constructor; empty when the type has no known constructors
        missing: Vec<String>,
    },
    /// The selected constructor raised during invocation; wrapped, not retried
    ConstructionFailure(String),
    /// Resolution re-entered a key that was already being resolved
    /// (includes the full path, ending with the repeated key)
    CircularDependency(Vec<String>),
    /// A resolved instance could not be downcast to the requested Rust type
    TypeMismatch(&'static str),
}

impl fmt::Display for InjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectError::NullArgument(what) => {
                write!(f, "Required argument: {} must be provided", what)
            }
            InjectError::IncompatibleType { base, implementation, detail } => {
                write!(
                    f,
                    "Type: {} is not assignable to: {} ({})",
                    implementation, base, detail
                )
            }
            InjectError::DuplicateRegistration { key } => {
                write!(
                    f,
                    "A registration with key: {} already exists. If you're registering \
                     multiple components of the same base type, consider naming them.",
                    key
                )
            }
            InjectError::NotRegistered { key } => {
                write!(f, "Could not find a registration matching resolution key: {}", key)
            }
            InjectError::UnsatisfiedDependencies { component, missing } => {
                if missing.is_empty() {
                    write!(f, "No usable constructor found for component: {}", component)
                } else {
                    write!(
                        f,
                        "No satisfiable constructor found for component: {}; \
                         unresolved dependencies: {}",
                        component,
                        missing.join(", ")
                    )
                }
            }
            InjectError::ConstructionFailure(reason) => {
                write!(f, "Constructor invocation failed: {}", reason)
            }
            InjectError::CircularDependency(path) => {
                write!(f, "Circular dependency: {}", path.join(" -> "))
            }
            InjectError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
        }
    }
}

impl std::error::Error for InjectError {}

/// Result type for container operations.
///
/// A convenience alias for `Result<T, InjectError>` used throughout the
/// crate to cut down signature boilerplate.
pub type InjectResult<T> = Result<T, InjectError>;
