//! Type providers: all registrations sharing one base type.

use crate::error::{InjectError, InjectResult};
use crate::identity::TypeIdentity;
use crate::registration::Registration;
use crate::Map;

/// Groups every [`Registration`] that shares a base type, keyed by
/// resolution key.
///
/// A provider is created lazily on the first registration of its base type
/// and grows monotonically; registrations are never removed. No two
/// registrations in the same provider may share a resolution key, which
/// means at most one unnamed registration plus any number of distinctly
/// named ones.
#[derive(Debug)]
pub struct TypeProvider {
    provided: TypeIdentity,
    registrations: Map<String, Registration>,
}

impl TypeProvider {
    /// Creates an empty provider for a base type.
    pub fn new(provided: TypeIdentity) -> Self {
        TypeProvider {
            provided,
            registrations: Map::default(),
        }
    }

    /// The base type this provider serves.
    pub fn provided_type(&self) -> &TypeIdentity {
        &self.provided
    }

    /// Inserts a registration under its resolution key.
    ///
    /// Fails with [`InjectError::DuplicateRegistration`] when the key is
    /// already taken; the message names the conflicting key and suggests
    /// naming the registrations apart.
    pub fn add_registration(&mut self, registration: Registration) -> InjectResult<()> {
        let key = registration.resolution_key();
        if self.registrations.contains_key(&key) {
            return Err(InjectError::DuplicateRegistration { key });
        }

        self.registrations.insert(key, registration);
        Ok(())
    }

    /// Looks up a registration by type key and optional name, using the
    /// same resolution-key convention registrations are stored under.
    /// Absence is surfaced by the caller as `NotRegistered`.
    pub fn get_registration(&self, type_key: &str, name: Option<&str>) -> Option<&Registration> {
        let key = match name {
            Some(name) if !name.is_empty() => format!("{}-{}", type_key, name),
            _ => type_key.to_string(),
        };
        self.registrations.get(&key)
    }

    /// Whether a registration exists under the exact resolution key.
    pub fn contains(&self, resolution_key: &str) -> bool {
        self.registrations.contains_key(resolution_key)
    }

    /// Number of registrations in this provider.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether the provider holds no registrations.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Iterates over `(resolution key, registration)` pairs.
    pub fn registrations(&self) -> impl Iterator<Item = (&str, &Registration)> {
        self.registrations
            .iter()
            .map(|(key, registration)| (key.as_str(), registration))
    }
}
