//! Type identity: the keys registrations are stored under.
//!
//! A registration can be addressed in three ways: by a public contract name
//! (`"ILogger"`), by a module-local [`Token`], or by a concrete Rust type. The
//! source form is captured by [`TypeRef`] and normalized by [`canonicalize`]
//! into the [`TypeKey`] actually used for lookups.

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_TOKEN_ID: AtomicU64 = AtomicU64::new(1);

/// An opaque symbolic key.
///
/// Two tokens are equal only when one is a clone of the other. The description
/// is carried for diagnostics and never takes part in comparisons, so two
/// modules can both create a `Token::new("Cache")` without colliding.
///
/// Tokens are usually kept in a `static`:
///
/// ```
/// use once_cell::sync::Lazy;
/// use tessel_ioc::Token;
///
/// static CACHE: Lazy<Token> = Lazy::new(|| Token::new("Cache"));
///
/// assert_eq!(*CACHE, CACHE.clone());
/// assert_ne!(*CACHE, Token::new("Cache"));
/// ```
#[derive(Clone)]
pub struct Token {
  id: u64,
  description: Arc<str>,
}

impl Token {
  pub fn new(description: impl Into<Arc<str>>) -> Self {
    Self {
      id: NEXT_TOKEN_ID.fetch_add(1, Ordering::Relaxed),
      description: description.into(),
    }
  }

  pub fn description(&self) -> &str {
    &self.description
  }
}

impl PartialEq for Token {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for Token {}

impl Hash for Token {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Token({}#{})", self.description, self.id)
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Token({}#{})", self.description, self.id)
  }
}

/// The canonical key of a registration.
///
/// Textual keys compare by value, token keys by token identity. A concrete
/// type used as a key is reduced to its declared name, so
/// `TypeKey::of::<MockService>()` and `TypeKey::from("MockService")` address the
/// same registration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKey {
  Name(Arc<str>),
  Token(Token),
}

impl TypeKey {
  pub fn name(name: impl Into<Arc<str>>) -> Self {
    TypeKey::Name(name.into())
  }

  /// The key a concrete type `T` is registered under when used as its own contract.
  pub fn of<T: ?Sized + 'static>() -> Self {
    canonicalize(TypeRef::of::<T>())
  }

  pub fn as_name(&self) -> Option<&str> {
    match self {
      TypeKey::Name(name) => Some(name),
      TypeKey::Token(_) => None,
    }
  }
}

impl fmt::Display for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TypeKey::Name(name) => f.write_str(name),
      TypeKey::Token(token) => fmt::Display::fmt(token, f),
    }
  }
}

impl From<&str> for TypeKey {
  fn from(name: &str) -> Self {
    TypeKey::Name(Arc::from(name))
  }
}

impl From<String> for TypeKey {
  fn from(name: String) -> Self {
    TypeKey::Name(Arc::from(name))
  }
}

impl From<Token> for TypeKey {
  fn from(token: Token) -> Self {
    TypeKey::Token(token)
  }
}

impl From<&Token> for TypeKey {
  fn from(token: &Token) -> Self {
    TypeKey::Token(token.clone())
  }
}

impl From<TypeRef<'_>> for TypeKey {
  fn from(reference: TypeRef<'_>) -> Self {
    canonicalize(reference)
  }
}

/// A type reference in the form the caller wrote it.
#[derive(Clone, Debug)]
pub enum TypeRef<'a> {
  /// A public contract name.
  Name(Cow<'a, str>),
  /// A module-local symbolic key.
  Token(Token),
  /// A concrete type used as its own key. Holds the full `type_name`.
  Type(&'static str),
}

impl TypeRef<'static> {
  pub fn of<T: ?Sized + 'static>() -> Self {
    TypeRef::Type(type_name::<T>())
  }
}

impl<'a> From<&'a str> for TypeRef<'a> {
  fn from(name: &'a str) -> Self {
    TypeRef::Name(Cow::Borrowed(name))
  }
}

impl<'a> From<&'a String> for TypeRef<'a> {
  fn from(name: &'a String) -> Self {
    TypeRef::Name(Cow::Borrowed(name.as_str()))
  }
}

impl From<String> for TypeRef<'_> {
  fn from(name: String) -> Self {
    TypeRef::Name(Cow::Owned(name))
  }
}

impl From<Token> for TypeRef<'_> {
  fn from(token: Token) -> Self {
    TypeRef::Token(token)
  }
}

impl From<&Token> for TypeRef<'_> {
  fn from(token: &Token) -> Self {
    TypeRef::Token(token.clone())
  }
}

impl<'a> From<&'a TypeKey> for TypeRef<'a> {
  fn from(key: &'a TypeKey) -> Self {
    match key {
      TypeKey::Name(name) => TypeRef::Name(Cow::Borrowed(name)),
      TypeKey::Token(token) => TypeRef::Token(token.clone()),
    }
  }
}

impl From<TypeKey> for TypeRef<'_> {
  fn from(key: TypeKey) -> Self {
    match key {
      TypeKey::Name(name) => TypeRef::Name(Cow::Owned(name.to_string())),
      TypeKey::Token(token) => TypeRef::Token(token),
    }
  }
}

/// Normalizes a type reference into the key used for map lookups.
///
/// Names and tokens pass through unchanged; a concrete type becomes its
/// declared name.
pub fn canonicalize(reference: TypeRef<'_>) -> TypeKey {
  match reference {
    TypeRef::Name(name) => TypeKey::Name(Arc::from(name.as_ref())),
    TypeRef::Token(token) => TypeKey::Token(token),
    TypeRef::Type(full_name) => TypeKey::Name(Arc::from(declared_name(full_name))),
  }
}

/// Strips module paths from a `type_name`, keeping generic structure intact:
/// `alloc::vec::Vec<app::Job>` becomes `Vec<Job>`.
pub(crate) fn declared_name(full_name: &str) -> String {
  let mut out = String::with_capacity(full_name.len());
  let mut path = String::new();
  for ch in full_name.chars() {
    if ch.is_alphanumeric() || ch == '_' || ch == ':' {
      path.push(ch);
      continue;
    }
    out.push_str(last_segment(&path));
    path.clear();
    out.push(ch);
  }
  out.push_str(last_segment(&path));
  out
}

fn last_segment(path: &str) -> &str {
  path.rsplit("::").next().unwrap_or(path)
}

/// One key or a set of keys a registration is installed under.
pub trait IntoTypeKeys {
  fn into_type_keys(self) -> Vec<TypeKey>;
}

impl IntoTypeKeys for &str {
  fn into_type_keys(self) -> Vec<TypeKey> {
    vec![TypeKey::from(self)]
  }
}

impl IntoTypeKeys for &String {
  fn into_type_keys(self) -> Vec<TypeKey> {
    vec![TypeKey::from(self.as_str())]
  }
}

impl IntoTypeKeys for &Token {
  fn into_type_keys(self) -> Vec<TypeKey> {
    vec![TypeKey::from(self)]
  }
}

impl IntoTypeKeys for &TypeKey {
  fn into_type_keys(self) -> Vec<TypeKey> {
    vec![self.clone()]
  }
}

impl IntoTypeKeys for String {
  fn into_type_keys(self) -> Vec<TypeKey> {
    vec![TypeKey::from(self)]
  }
}

impl IntoTypeKeys for Token {
  fn into_type_keys(self) -> Vec<TypeKey> {
    vec![TypeKey::Token(self)]
  }
}

impl IntoTypeKeys for TypeKey {
  fn into_type_keys(self) -> Vec<TypeKey> {
    vec![self]
  }
}

impl IntoTypeKeys for TypeRef<'_> {
  fn into_type_keys(self) -> Vec<TypeKey> {
    vec![canonicalize(self)]
  }
}

impl<'a, K: Into<TypeRef<'a>>, const N: usize> IntoTypeKeys for [K; N] {
  fn into_type_keys(self) -> Vec<TypeKey> {
    self.into_iter().map(|key| canonicalize(key.into())).collect()
  }
}

impl<'a, K: Into<TypeRef<'a>>> IntoTypeKeys for Vec<K> {
  fn into_type_keys(self) -> Vec<TypeKey> {
    self.into_iter().map(|key| canonicalize(key.into())).collect()
  }
}

impl<'a, K: Clone + Into<TypeRef<'a>>> IntoTypeKeys for &[K] {
  fn into_type_keys(self) -> Vec<TypeKey> {
    self.iter().cloned().map(|key| canonicalize(key.into())).collect()
  }
}
