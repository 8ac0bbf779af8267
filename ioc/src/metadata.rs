//! Constructor metadata: what each injectable type needs to be built.
//!
//! Every implementation type has at most one [`ConstructorSpec`], kept in a
//! [`MetadataRegistry`] rather than in any container, so several containers can
//! build the same type from the same declaration. The spec lists one
//! [`TypeKey`] per constructor parameter, in constructor order.

use crate::container::Container;
use crate::error::{ResolveError, Result};
use crate::key::{canonicalize, declared_name, TypeKey, TypeRef};
use crate::object::{Object, ViewTable, Views};

use dashmap::DashMap;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A type the container can construct from resolved dependencies.
///
/// Most implementations are generated with [`injectable!`](crate::injectable).
pub trait Injectable: Any + Send + Sync + Sized {
  /// Keys of the constructor parameters, in order.
  ///
  /// Used to pre-populate the spec when the type is first marked injectable.
  /// Individual slots can still be changed with
  /// [`MetadataRegistry::declare_parameter`].
  fn dependencies() -> Vec<TypeKey> {
    Vec::new()
  }

  /// Builds a new value from the resolved constructor arguments.
  fn construct(args: &mut Arguments) -> Result<Self>;

  /// Contracts this type can be served as besides itself.
  fn expose(_views: &mut Views<Self>) {}
}

type ConstructFn = Arc<dyn Fn(&mut Arguments) -> Result<Object> + Send + Sync>;

/// The declared constructor of one implementation type.
#[derive(Clone)]
pub struct ConstructorSpec {
  type_name: &'static str,
  parameters: Vec<Option<TypeKey>>,
  construct: ConstructFn,
}

impl ConstructorSpec {
  fn for_type<T: Injectable>() -> Self {
    let mut views = Views::<T>::new();
    T::expose(&mut views);
    let views: Option<Arc<ViewTable>> = views.into_table();

    Self {
      type_name: type_name::<T>(),
      parameters: T::dependencies().into_iter().map(Some).collect(),
      construct: Arc::new(move |args: &mut Arguments| {
        let value = Arc::new(T::construct(args)?);
        Ok(Object::with_table(value, views.clone()))
      }),
    }
  }

  fn set_parameter(&mut self, index: usize, key: TypeKey) {
    if self.parameters.len() <= index {
      self.parameters.resize(index + 1, None);
    }
    self.parameters[index] = Some(key);
  }

  /// Full `type_name` of the implementation.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// Parameter slots in constructor order. `None` marks an index no key was declared for.
  pub fn parameters(&self) -> &[Option<TypeKey>] {
    &self.parameters
  }

  pub fn arity(&self) -> usize {
    self.parameters.len()
  }

  /// Resolves every parameter from `container`, in declared order, then runs
  /// the constructor.
  pub(crate) fn instantiate(&self, container: &Container) -> Result<Object> {
    let mut resolved = Vec::with_capacity(self.parameters.len());
    for (index, slot) in self.parameters.iter().enumerate() {
      let key = slot
        .as_ref()
        .ok_or_else(|| ResolveError::UndeclaredParameter {
          type_name: declared_name(self.type_name),
          index,
        })?;
      resolved.push((key.clone(), container.resolve_key(key)?));
    }
    let mut args = Arguments::new(self.type_name, resolved);
    (self.construct)(&mut args)
  }
}

impl fmt::Debug for ConstructorSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ConstructorSpec")
      .field("type_name", &self.type_name)
      .field("parameters", &self.parameters)
      .finish_non_exhaustive()
  }
}

/// Resolved constructor arguments, handed to [`Injectable::construct`].
pub struct Arguments {
  type_name: &'static str,
  values: Vec<(TypeKey, Object)>,
  cursor: usize,
}

impl Arguments {
  pub fn new(type_name: &'static str, values: Vec<(TypeKey, Object)>) -> Self {
    Self {
      type_name,
      values,
      cursor: 0,
    }
  }

  /// Takes the next positional argument.
  pub fn take<I: ?Sized + Any>(&mut self) -> Result<Arc<I>> {
    let value = self.get(self.cursor)?;
    self.cursor += 1;
    Ok(value)
  }

  pub fn get<I: ?Sized + Any>(&self, index: usize) -> Result<Arc<I>> {
    let (key, object) = self
      .values
      .get(index)
      .ok_or_else(|| ResolveError::MissingArgument {
        type_name: declared_name(self.type_name),
        index,
        available: self.values.len(),
      })?;
    object.downcast::<I>().ok_or_else(|| ResolveError::TypeMismatch {
      key: key.clone(),
      expected: type_name::<I>(),
      found: object.type_name(),
    })
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }
}

/// Holds the [`ConstructorSpec`] of every type marked injectable.
///
/// Containers only read from it. Use [`MetadataRegistry::global`] for the
/// process-wide registry, or create one per test to keep declarations isolated.
#[derive(Default)]
pub struct MetadataRegistry {
  specs: DashMap<TypeId, ConstructorSpec>,
}

impl MetadataRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records `T` as injectable, with the parameters from [`Injectable::dependencies`].
  ///
  /// Marking a type twice keeps the existing spec, including any parameter
  /// declared in between.
  pub fn mark_injectable<T: Injectable>(&self) -> &Self {
    self
      .specs
      .entry(TypeId::of::<T>())
      .or_insert_with(|| {
        debug!(type_name = type_name::<T>(), "marked injectable");
        ConstructorSpec::for_type::<T>()
      });
    self
  }

  /// Sets the key of constructor parameter `index` of `T`.
  ///
  /// Creates the spec if `T` was not marked yet, so declarations can arrive in
  /// any order relative to [`mark_injectable`](Self::mark_injectable). The last
  /// key declared for an index wins.
  pub fn declare_parameter<'a, T: Injectable>(&self, index: usize, key: impl Into<TypeRef<'a>>) -> &Self {
    let key = canonicalize(key.into());
    debug!(type_name = type_name::<T>(), index, key = %key, "declared constructor parameter");
    self
      .specs
      .entry(TypeId::of::<T>())
      .or_insert_with(ConstructorSpec::for_type::<T>)
      .set_parameter(index, key);
    self
  }

  pub fn is_injectable<T: ?Sized + 'static>(&self) -> bool {
    self.specs.contains_key(&TypeId::of::<T>())
  }

  /// The spec of `T`, or [`ResolveError::NotInjectable`] if `T` was never marked.
  pub fn spec<T: ?Sized + 'static>(&self) -> Result<ConstructorSpec> {
    self.spec_of(TypeId::of::<T>(), type_name::<T>())
  }

  pub fn spec_of(&self, type_id: TypeId, type_name: &str) -> Result<ConstructorSpec> {
    self
      .specs
      .get(&type_id)
      .map(|spec| spec.value().clone())
      .ok_or_else(|| ResolveError::NotInjectable(declared_name(type_name)))
  }

  pub fn len(&self) -> usize {
    self.specs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.specs.is_empty()
  }
}

impl fmt::Debug for MetadataRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MetadataRegistry")
      .field("specs", &self.specs.len())
      .finish()
  }
}
