//! Type-erased values handed out by the container.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type Erased = dyn Any + Send + Sync;
type Cast = Arc<dyn Fn(&Erased) -> Option<Box<dyn Any>> + Send + Sync>;

/// The contracts a concrete type can be served as.
///
/// Rust cannot turn an `Arc<dyn Any>` into an `Arc<dyn Trait>` on its own, so
/// each implementation lists the trait objects it stands behind. The casts keep
/// the allocation, which is what lets one singleton answer for several contracts.
pub struct Views<T> {
  casts: HashMap<TypeId, Cast>,
  _marker: PhantomData<fn(Arc<T>)>,
}

impl<T: Any + Send + Sync> Views<T> {
  pub fn new() -> Self {
    Self {
      casts: HashMap::new(),
      _marker: PhantomData,
    }
  }

  /// Serves `T` as `I` as well, usually `views.expose::<dyn Contract>(|it| it)`.
  pub fn expose<I>(&mut self, cast: impl Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static) -> &mut Self
  where
    I: ?Sized + Any + Send + Sync,
  {
    let cast: Cast = Arc::new(move |erased: &Erased| {
      erased
        .downcast_ref::<Arc<T>>()
        .map(|it| Box::new(cast(Arc::clone(it))) as Box<dyn Any>)
    });
    self.casts.insert(TypeId::of::<I>(), cast);
    self
  }

  pub fn len(&self) -> usize {
    self.casts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.casts.is_empty()
  }

  pub(crate) fn into_table(self) -> Option<Arc<ViewTable>> {
    if self.casts.is_empty() {
      None
    } else {
      Some(Arc::new(ViewTable(self.casts)))
    }
  }
}

impl<T: Any + Send + Sync> Default for Views<T> {
  fn default() -> Self {
    Self::new()
  }
}

pub(crate) struct ViewTable(HashMap<TypeId, Cast>);

/// A resolved value.
///
/// Holds an `Arc<T>` for some `T` (sized or a trait object). Cloning an
/// `Object` never clones the value; two objects are the same instance when
/// [`Object::ptr_eq`] says so.
#[derive(Clone)]
pub struct Object {
  value: Arc<Erased>,
  address: usize,
  type_name: &'static str,
  views: Option<Arc<ViewTable>>,
}

impl Object {
  pub fn new<T: ?Sized + Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      address: Arc::as_ptr(&value) as *const () as usize,
      type_name: type_name::<T>(),
      value: Arc::new(value),
      views: None,
    }
  }

  /// Wraps `value` together with the contracts it can be served as.
  pub fn with_views<T: Any + Send + Sync>(value: Arc<T>, views: Views<T>) -> Self {
    Self::with_table(value, views.into_table())
  }

  pub(crate) fn with_table<T: Any + Send + Sync>(
    value: Arc<T>,
    views: Option<Arc<ViewTable>>,
  ) -> Self {
    Self {
      views,
      ..Self::new(value)
    }
  }

  /// Returns the value as `Arc<I>`, either because it is one or because its
  /// type exposed `I` as a view.
  pub fn downcast<I: ?Sized + Any>(&self) -> Option<Arc<I>> {
    if let Some(exact) = self.value.downcast_ref::<Arc<I>>() {
      return Some(Arc::clone(exact));
    }
    let cast = self.views.as_ref()?.0.get(&TypeId::of::<I>())?;
    cast(&*self.value)?
      .downcast::<Arc<I>>()
      .ok()
      .map(|boxed| *boxed)
  }

  pub fn is<I: ?Sized + Any>(&self) -> bool {
    self.value.is::<Arc<I>>()
      || self
        .views
        .as_ref()
        .is_some_and(|views| views.0.contains_key(&TypeId::of::<I>()))
  }

  /// Full `type_name` of the stored value.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn ptr_eq(a: &Object, b: &Object) -> bool {
    a.address == b.address
  }
}

impl fmt::Debug for Object {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Object")
      .field("type", &self.type_name)
      .field("address", &format_args!("{:#x}", self.address))
      .finish()
  }
}

/// Values that can be stored as a registration's result.
pub trait IntoObject {
  fn into_object(self) -> Object;
}

impl<T: ?Sized + Any + Send + Sync> IntoObject for Arc<T> {
  fn into_object(self) -> Object {
    Object::new(self)
  }
}

impl IntoObject for Object {
  fn into_object(self) -> Object {
    self
  }
}
