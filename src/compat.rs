//! Type compatibility checking.
//!
//! Rust has no runtime subtype relation over nominal type names, so the
//! raw-type relation is supplied by the caller through
//! [`AssignabilityChecker`]. The recursive part of the check is the same
//! for every checker and is implemented once here: raw types must be
//! assignable, arities must match exactly, and every generic argument pair
//! must be assignable at the same position, recursively. Checking happens
//! at registration time only and is side-effect free.

use crate::error::{InjectError, InjectResult};
use crate::identity::TypeIdentity;

/// Decides whether one type is assignable to another.
///
/// Implementors supply [`raw_assignable`](AssignabilityChecker::raw_assignable),
/// the nominal relation between raw (type-erased) names. The provided
/// [`check_assignable`](AssignabilityChecker::check_assignable) layers the
/// recursive generic-argument comparison on top and is what the container
/// calls during component construction and mutation.
pub trait AssignabilityChecker: Send + Sync {
    /// Whether a value of raw type `implementation` may stand in for raw
    /// type `base`. Must be reflexive.
    fn raw_assignable(&self, base: &str, implementation: &str) -> bool;

    /// Full recursive assignability of `implementation` to `base`.
    ///
    /// Fails with [`InjectError::IncompatibleType`] when the raw types are
    /// not assignable, when the generic-argument arities differ, or when
    /// any argument pair is incompatible at the same position. A mismatched
    /// arity is an error, never silently ignored: `X<String, i32>` can
    /// never satisfy `Y<String>`.
    fn check_assignable(
        &self,
        base: &TypeIdentity,
        implementation: &TypeIdentity,
    ) -> InjectResult<()> {
        if !self.raw_assignable(base.name(), implementation.name()) {
            return Err(InjectError::IncompatibleType {
                base: base.key(),
                implementation: implementation.key(),
                detail: format!(
                    "raw type {} is not assignable to {}",
                    implementation.name(),
                    base.name()
                ),
            });
        }

        let base_arguments = base.arguments();
        let impl_arguments = implementation.arguments();
        if base_arguments.len() != impl_arguments.len() {
            return Err(InjectError::IncompatibleType {
                base: base.key(),
                implementation: implementation.key(),
                detail: format!(
                    "expected {} type argument(s), found {}",
                    base_arguments.len(),
                    impl_arguments.len()
                ),
            });
        }

        for (base_argument, impl_argument) in base_arguments.iter().zip(impl_arguments) {
            self.check_assignable(base_argument, impl_argument)?;
        }

        Ok(())
    }
}

/// Explicit nominal subtype relation.
///
/// Holds direct base-to-implementation edges declared with
/// [`allow`](SubtypeTable::allow); the relation is reflexive but not
/// transitive, so indirect relationships must be declared edge by edge.
/// An empty table accepts exact name matches only.
///
/// # Examples
///
/// ```rust
/// use graft_di::{AssignabilityChecker, SubtypeTable, TypeIdentity};
///
/// let mut table = SubtypeTable::new();
/// table.allow("List", "ArrayList");
///
/// let base = TypeIdentity::generic("List", vec![TypeIdentity::raw("String")]);
/// let ok = TypeIdentity::generic("ArrayList", vec![TypeIdentity::raw("String")]);
/// let bad = TypeIdentity::generic("ArrayList", vec![TypeIdentity::raw("i64")]);
///
/// assert!(table.check_assignable(&base, &ok).is_ok());
/// assert!(table.check_assignable(&base, &bad).is_err());
/// ```
#[derive(Debug, Default)]
pub struct SubtypeTable {
    edges: std::collections::HashMap<String, std::collections::HashSet<String>>,
}

impl SubtypeTable {
    /// Creates an empty (reflexive-only) table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares that `implementation` is assignable to `base`.
    pub fn allow(
        &mut self,
        base: impl Into<String>,
        implementation: impl Into<String>,
    ) -> &mut Self {
        self.edges
            .entry(base.into())
            .or_default()
            .insert(implementation.into());
        self
    }
}

impl AssignabilityChecker for SubtypeTable {
    fn raw_assignable(&self, base: &str, implementation: &str) -> bool {
        base == implementation
            || self
                .edges
                .get(base)
                .is_some_and(|implementations| implementations.contains(implementation))
    }
}
