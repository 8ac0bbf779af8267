use tessel_app::{compose, declare, AppService, IAPP};
use tessel_ioc::{Container, ResolveError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ResolveError> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .init();

  let container = Container::new();
  declare(container.metadata());
  container.install(compose);

  let app = container.get::<dyn AppService>(IAPP).map_err(|err| {
    tracing::error!(error = %err, "failed to wire the application");
    err
  })?;
  app.run();
  Ok(())
}
