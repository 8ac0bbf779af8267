//! Sample application for `tessel_ioc`: an [`App`] that logs through whatever
//! [`Logger`] the container hands it.

mod app;
mod logger;

pub use app::{App, AppService, IAPP};
pub use logger::{ConsoleLogger, Logger, ILOGGER};

use tessel_ioc::{Container, MetadataRegistry};

/// Declares the constructors of this crate's injectable types.
pub fn declare(metadata: &MetadataRegistry) {
  metadata
    .mark_injectable::<ConsoleLogger>()
    .mark_injectable::<App>();
}

/// Registration module: a transient console logger and a singleton app.
pub fn compose(container: &Container) {
  container
    .register_transient::<ConsoleLogger>(ILOGGER)
    .register_singleton::<App>(IAPP);
}
