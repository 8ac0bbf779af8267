//! Errors raised while resolving registrations.

use crate::key::TypeKey;
use thiserror::Error;

/// Errors raised while resolving a registration.
///
/// All of these are configuration errors: the container never retries or
/// recovers from them, it hands them straight back to the caller of `resolve`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("type '{0}' is not injectable; mark it with `MetadataRegistry::mark_injectable` first")]
  NotInjectable(String),

  #[error("type '{0}' not registered")]
  UnregisteredType(TypeKey),

  #[error("circular dependency detected while resolving '{key}': {}", format_path(.path))]
  CyclicDependency { key: TypeKey, path: Vec<TypeKey> },

  #[error("constructor parameter {index} of '{type_name}' has no declared type key")]
  UndeclaredParameter { type_name: String, index: usize },

  #[error("constructor of '{type_name}' asked for argument {index} but only {available} were resolved")]
  MissingArgument {
    type_name: String,
    index: usize,
    available: usize,
  },

  #[error("'{key}' resolved to '{found}', which cannot be served as '{expected}'")]
  TypeMismatch {
    key: TypeKey,
    expected: &'static str,
    found: &'static str,
  },
}

fn format_path(path: &[TypeKey]) -> String {
  path
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(" -> ")
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
