//! The process-wide constructor metadata registry.

use crate::metadata::MetadataRegistry;
use once_cell::sync::Lazy;
use std::sync::Arc;

// Created on first access. Containers built with `Container::new()` share it.
static GLOBAL_METADATA: Lazy<Arc<MetadataRegistry>> = Lazy::new(|| Arc::new(MetadataRegistry::new()));

impl MetadataRegistry {
  /// Provides the process-wide registry.
  ///
  /// Types are usually marked injectable here once at startup, and every
  /// container created with `Container::new()` builds them from it.
  ///
  /// # Examples
  ///
  /// ```
  /// use std::sync::Arc;
  /// use tessel_ioc::{Arguments, Injectable, MetadataRegistry};
  ///
  /// struct Clock;
  ///
  /// impl Injectable for Clock {
  ///   fn construct(_args: &mut Arguments) -> tessel_ioc::Result<Self> {
  ///     Ok(Clock)
  ///   }
  /// }
  ///
  /// MetadataRegistry::global().mark_injectable::<Clock>();
  /// assert!(MetadataRegistry::global().is_injectable::<Clock>());
  /// assert!(Arc::ptr_eq(&MetadataRegistry::global(), &MetadataRegistry::global()));
  /// ```
  pub fn global() -> Arc<MetadataRegistry> {
    Arc::clone(&GLOBAL_METADATA)
  }
}
