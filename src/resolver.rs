//! Constructor selection and recursive dependency resolution.
//!
//! The resolver is stateless: it operates over the container's registry,
//! the registration being built, and the constructor source. Selection is
//! greedy — candidates are ordered by descending parameter count, ties
//! keep source order — so the richest constructor whose parameters can all
//! be supplied wins, and explicit or implicit dependencies are maximally
//! injected.

use std::cmp::Reverse;

use crate::component::SharedInstance;
use crate::container::Container;
use crate::dependency::DependencyProvider;
use crate::error::{InjectError, InjectResult};
use crate::metadata::{ConstructorDescriptor, Parameter};
use crate::registration::Registration;

/// Builds an instance for a reflective registration.
///
/// Selects the first satisfiable constructor in greedy order, builds the
/// argument list left to right (explicit overrides first, implicit
/// recursive resolution otherwise), and invokes it. With no satisfiable
/// candidate, reports the unresolved parameter type keys of the largest
/// one.
pub(crate) fn reflect_instance(
    container: &Container,
    registration: &Registration,
    stack: &mut Vec<String>,
) -> InjectResult<SharedInstance> {
    let component = registration.component();
    let mut candidates = container
        .constructor_source()
        .constructors(component.implementation());

    if candidates.is_empty() {
        return Err(InjectError::UnsatisfiedDependencies {
            component: component.generate_key(),
            missing: Vec::new(),
        });
    }

    // Stable sort: ties keep the order the source declared them in.
    candidates.sort_by_key(|candidate| Reverse(candidate.arity()));

    let selected = candidates
        .iter()
        .find(|candidate| is_satisfiable(container, registration, candidate));

    let Some(constructor) = selected else {
        let best = &candidates[0];
        let missing = best
            .parameters()
            .iter()
            .filter(|parameter| !parameter_satisfiable(container, registration, parameter))
            .map(|parameter| parameter.identity().key())
            .collect();

        return Err(InjectError::UnsatisfiedDependencies {
            component: component.generate_key(),
            missing,
        });
    };

    let mut arguments = Vec::with_capacity(constructor.arity());
    for parameter in constructor.parameters() {
        arguments.push(build_argument(container, registration, parameter, stack)?);
    }

    constructor
        .construct(&arguments)
        .map_err(InjectError::ConstructionFailure)
}

/// A constructor is satisfiable iff every parameter is covered by an
/// explicit override (by declared name or by type key) or by an existing
/// unnamed registration for its type key. Membership only — nothing is
/// resolved during trial selection.
fn is_satisfiable(
    container: &Container,
    registration: &Registration,
    constructor: &ConstructorDescriptor,
) -> bool {
    constructor
        .parameters()
        .iter()
        .all(|parameter| parameter_satisfiable(container, registration, parameter))
}

fn parameter_satisfiable(
    container: &Container,
    registration: &Registration,
    parameter: &Parameter,
) -> bool {
    if find_override(registration, parameter).is_some() {
        return true;
    }

    container.has_unnamed_registration(&parameter.identity().key())
}

/// Name-identified overrides take priority over type-key-identified ones.
fn find_override<'a>(
    registration: &'a Registration,
    parameter: &Parameter,
) -> Option<&'a crate::dependency::ExplicitDependency> {
    parameter
        .name()
        .and_then(|name| registration.get_dependency(name))
        .or_else(|| registration.get_dependency(&parameter.identity().key()))
}

fn build_argument(
    container: &Container,
    registration: &Registration,
    parameter: &Parameter,
    stack: &mut Vec<String>,
) -> InjectResult<SharedInstance> {
    match find_override(registration, parameter).map(|dependency| dependency.provider()) {
        Some(DependencyProvider::Instance(value)) => Ok(value.clone()),
        Some(DependencyProvider::Factory(factory)) => Ok(factory.create()),
        Some(DependencyProvider::Token(token)) => {
            container.resolve_with_stack(token.identity(), token.name(), stack)
        }
        None => container.resolve_with_stack(parameter.identity(), None, stack),
    }
}
