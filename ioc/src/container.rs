//! The main `Container` struct and its associated methods.

use crate::core::{Implementation, Registration, ResolutionGuard};
use crate::error::{ResolveError, Result};
use crate::key::{canonicalize, IntoTypeKeys, TypeKey, TypeRef};
use crate::metadata::{Injectable, MetadataRegistry};
use crate::object::{IntoObject, Object};

use dashmap::DashMap;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// The Inversion of Control (IoC) container.
///
/// Maps canonical [`TypeKey`]s to registrations. A registration installed under
/// several keys is shared between them, so a singleton registered as
/// `["MockService", "IMockService"]` is built once and served under both.
///
/// Registration takes `&self` and returns `&Self`, so configuration reads as a
/// chain. Registrations are expected to happen before the first `resolve`;
/// registering a key again replaces the earlier registration.
pub struct Container {
  registrations: DashMap<TypeKey, Arc<Registration>>,
  metadata: Arc<MetadataRegistry>,
}

impl Container {
  /// Creates an empty container backed by the process-wide metadata registry.
  pub fn new() -> Self {
    Self::with_metadata(MetadataRegistry::global())
  }

  /// Creates an empty container that reads constructor specs from `metadata`.
  pub fn with_metadata(metadata: Arc<MetadataRegistry>) -> Self {
    Self {
      registrations: DashMap::new(),
      metadata,
    }
  }

  pub fn metadata(&self) -> &MetadataRegistry {
    &self.metadata
  }

  // --- PRIVATE HELPERS ---

  fn register(&self, keys: Vec<TypeKey>, registration: Registration) -> &Self {
    let kind = registration.kind();
    let registration = Arc::new(registration);
    for key in keys {
      match self.registrations.insert(key.clone(), Arc::clone(&registration)) {
        Some(_) => debug!(key = %key, kind, "replaced existing registration"),
        None => debug!(key = %key, kind, "registered"),
      }
    }
    self
  }

  // --- PUBLIC API ---

  /// Resolves `keys` by calling `factory` with this container, on every request.
  pub fn register_factory<K, F, V>(&self, keys: K, factory: F) -> &Self
  where
    K: IntoTypeKeys,
    F: Fn(&Container) -> Result<V> + Send + Sync + 'static,
    V: IntoObject,
  {
    let factory = move |container: &Container| factory(container).map(IntoObject::into_object);
    self.register(keys.into_type_keys(), Registration::Factory(Box::new(factory)))
  }

  /// Resolves `keys` to one lazily built `T`, shared by all of them.
  ///
  /// `T` must be marked injectable by the time the first request arrives;
  /// registration itself does not check.
  pub fn register_singleton<T: Injectable>(&self, keys: impl IntoTypeKeys) -> &Self {
    self.register(
      keys.into_type_keys(),
      Registration::singleton(Implementation::of::<T>()),
    )
  }

  /// Resolves `keys` to a freshly built `T` on every request.
  pub fn register_transient<T: Injectable>(&self, keys: impl IntoTypeKeys) -> &Self {
    self.register(
      keys.into_type_keys(),
      Registration::Transient(Implementation::of::<T>()),
    )
  }

  /// Resolves `keys` to `value` itself, every time.
  pub fn register_instance(&self, keys: impl IntoTypeKeys, value: impl IntoObject) -> &Self {
    self.register(keys.into_type_keys(), Registration::Instance(value.into_object()))
  }

  /// Runs a registration module against this container.
  pub fn install(&self, installer: impl FnOnce(&Container)) -> &Self {
    installer(self);
    self
  }

  // --- Resolution ---

  /// Resolves the registration installed under `key`.
  pub fn resolve<'a>(&self, key: impl Into<TypeRef<'a>>) -> Result<Object> {
    self.resolve_key(&canonicalize(key.into()))
  }

  /// Resolves an already canonical key.
  pub fn resolve_key(&self, key: &TypeKey) -> Result<Object> {
    let registration = self
      .registrations
      .get(key)
      .map(|entry| Arc::clone(entry.value()));
    let Some(registration) = registration else {
      debug!(key = %key, "no registration");
      return Err(ResolveError::UnregisteredType(key.clone()));
    };

    let _guard = ResolutionGuard::enter(Arc::as_ptr(&registration) as usize, key)?;
    trace!(key = %key, kind = registration.kind(), "resolving");
    registration.resolve(self).map_err(|err| {
      debug!(key = %key, error = %err, "resolution failed");
      err
    })
  }

  /// Resolves `key` and serves the result as `Arc<I>`.
  ///
  /// `I` is either the stored type or a contract the implementation exposes.
  pub fn get<'a, I: ?Sized + Any>(&self, key: impl Into<TypeRef<'a>>) -> Result<Arc<I>> {
    let key = canonicalize(key.into());
    let object = self.resolve_key(&key)?;
    object.downcast::<I>().ok_or_else(|| ResolveError::TypeMismatch {
      key,
      expected: type_name::<I>(),
      found: object.type_name(),
    })
  }

  pub fn contains<'a>(&self, key: impl Into<TypeRef<'a>>) -> bool {
    self.registrations.contains_key(&canonicalize(key.into()))
  }

  /// Number of registered keys.
  pub fn len(&self) -> usize {
    self.registrations.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registrations.is_empty()
  }
}

impl Default for Container {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("registrations", &self.registrations.len())
      .field("metadata", &self.metadata)
      .finish()
  }
}
