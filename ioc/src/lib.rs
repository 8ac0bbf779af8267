//! # Tessel IoC
//!
//! A small Inversion of Control (IoC) container for Rust.
//!
//! Implementations declare once what their constructor needs, as an ordered list
//! of keys. Registrations then bind keys to a way of producing a value, and
//! resolving a key builds the whole dependency chain from the same container.
//!
//! ## Core Concepts
//!
//! - **Keys**: a registration is addressed by a contract name (`"ILogger"`), an
//!   opaque [`Token`], or a concrete type ([`TypeKey::of`]). All three are
//!   normalized by [`canonicalize`].
//! - **Metadata**: the [`MetadataRegistry`] holds one [`ConstructorSpec`] per
//!   type marked injectable. Types describe their constructor through
//!   [`Injectable`], usually generated with [`injectable!`].
//! - **Registrations**: factory, transient, singleton and instance. A
//!   registration installed under several keys is shared by all of them.
//! - **Resolution**: [`Container::resolve`] returns an erased [`Object`];
//!   [`Container::get`] serves it as a concrete type or an exposed trait object.
//!   Failures are [`ResolveError`]s, including dependency cycles.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tessel_ioc::{injectable, Container, MetadataRegistry};
//!
//! trait Logger: Send + Sync {
//!   fn write(&self, level: i32, message: &str);
//! }
//!
//! #[derive(Default)]
//! struct ConsoleLogger;
//!
//! impl Logger for ConsoleLogger {
//!   fn write(&self, _level: i32, message: &str) {
//!     println!("{}", message);
//!   }
//! }
//!
//! struct App {
//!   logger: Arc<dyn Logger>,
//! }
//!
//! impl App {
//!   fn new(logger: Arc<dyn Logger>) -> Self {
//!     Self { logger }
//!   }
//!
//!   fn run(&self) {
//!     self.logger.write(0, "App starting...");
//!   }
//! }
//!
//! injectable!(ConsoleLogger => default() as dyn Logger);
//! injectable!(App => new("ILogger" => dyn Logger));
//!
//! fn main() -> tessel_ioc::Result<()> {
//!   let metadata = Arc::new(MetadataRegistry::new());
//!   metadata
//!     .mark_injectable::<ConsoleLogger>()
//!     .mark_injectable::<App>();
//!
//!   let container = Container::with_metadata(metadata);
//!   container
//!     .register_transient::<ConsoleLogger>("ILogger")
//!     .register_singleton::<App>("IApp");
//!
//!   let app = container.get::<App>("IApp")?;
//!   app.run();
//!   assert!(Arc::ptr_eq(&app, &container.get::<App>("IApp")?));
//!   Ok(())
//! }
//! ```

mod container;
mod core;
mod error;
mod global;
mod key;
mod macros;
mod metadata;
mod object;

pub use container::Container;
pub use error::{ResolveError, Result};
pub use key::{canonicalize, IntoTypeKeys, Token, TypeKey, TypeRef};
pub use metadata::{Arguments, ConstructorSpec, Injectable, MetadataRegistry};
pub use object::{IntoObject, Object, Views};
