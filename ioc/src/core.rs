//! Core, non-public data structures for the IoC container.

use crate::container::Container;
use crate::error::{ResolveError, Result};
use crate::key::TypeKey;
use crate::metadata::Injectable;
use crate::object::Object;

use once_cell::sync::OnceCell;
use std::any::{type_name, TypeId};
use std::cell::RefCell;
use tracing::debug;

thread_local! {
  // Registrations currently being resolved on this thread, outermost first,
  // with the key each one was requested under.
  static RESOLVING_STACK: RefCell<Vec<(usize, TypeKey)>> = RefCell::new(Vec::new());
}

/// An RAII guard that turns dependency cycles into errors.
///
/// Entering pushes the registration onto the thread-local resolution stack and
/// fails if it is already there. Identity is the registration itself, not the
/// key, so a cycle running through two keys of one multi-key registration is
/// caught as well. Dropping the guard pops the entry.
pub(crate) struct ResolutionGuard {
  registration: usize,
}

impl ResolutionGuard {
  pub(crate) fn enter(registration: usize, key: &TypeKey) -> Result<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if stack.iter().any(|(id, _)| *id == registration) {
        let mut path: Vec<TypeKey> = stack.iter().map(|(_, key)| key.clone()).collect();
        path.push(key.clone());
        return Err(ResolveError::CyclicDependency {
          key: key.clone(),
          path,
        });
      }
      stack.push((registration, key.clone()));
      Ok(Self { registration })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(position) = stack.iter().rposition(|(id, _)| *id == self.registration) {
        stack.remove(position);
      }
    });
  }
}

pub(crate) type FactoryFn = Box<dyn Fn(&Container) -> Result<Object> + Send + Sync>;

/// The implementation type behind a constructor-based registration.
///
/// Only the identity is stored; the constructor spec is looked up when the
/// registration is resolved.
#[derive(Clone, Copy)]
pub(crate) struct Implementation {
  type_id: TypeId,
  type_name: &'static str,
}

impl Implementation {
  pub(crate) fn of<T: Injectable>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: type_name::<T>(),
    }
  }

  fn build(&self, container: &Container) -> Result<Object> {
    container
      .metadata()
      .spec_of(self.type_id, self.type_name)?
      .instantiate(container)
  }
}

pub(crate) enum Registration {
  Factory(FactoryFn),
  Transient(Implementation),
  Singleton {
    implementation: Implementation,
    cell: OnceCell<Object>,
  },
  Instance(Object),
}

impl Registration {
  pub(crate) fn singleton(implementation: Implementation) -> Self {
    Registration::Singleton {
      implementation,
      cell: OnceCell::new(),
    }
  }

  pub(crate) fn kind(&self) -> &'static str {
    match self {
      Registration::Factory(_) => "factory",
      Registration::Transient(_) => "transient",
      Registration::Singleton { .. } => "singleton",
      Registration::Instance(_) => "instance",
    }
  }

  pub(crate) fn resolve(&self, container: &Container) -> Result<Object> {
    match self {
      Registration::Factory(factory) => factory(container),
      Registration::Transient(implementation) => implementation.build(container),
      Registration::Singleton {
        implementation,
        cell,
      } => cell
        .get_or_try_init(|| {
          debug!(type_name = implementation.type_name, "building singleton");
          implementation.build(container)
        })
        .cloned(),
      Registration::Instance(object) => Ok(object.clone()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn guard_rejects_reentry_and_releases_on_drop() {
    let outer = ResolutionGuard::enter(1, &TypeKey::from("A")).unwrap();
    let inner = ResolutionGuard::enter(2, &TypeKey::from("B")).unwrap();

    match ResolutionGuard::enter(1, &TypeKey::from("A2")) {
      Err(ResolveError::CyclicDependency { key, path }) => {
        assert_eq!(key, TypeKey::from("A2"));
        assert_eq!(
          path,
          vec![TypeKey::from("A"), TypeKey::from("B"), TypeKey::from("A2")]
        );
      }
      _ => panic!("expected a cycle"),
    }

    drop(inner);
    drop(outer);
    assert!(ResolutionGuard::enter(1, &TypeKey::from("A")).is_ok());
  }
}
