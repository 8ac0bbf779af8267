use std::sync::Arc;
use tessel_ioc::{injectable, Container, MetadataRegistry, TypeRef};

// 1. Define the abstractions (the traits)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

trait Flush: Send + Sync {
  fn flush(&self);
}

// 2. Define a concrete implementation serving both
#[derive(Default)]
struct ConsoleLogger;

impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

impl Flush for ConsoleLogger {
  fn flush(&self) {
    println!("[CONSOLE LOG]: flushed");
  }
}

injectable!(ConsoleLogger => default() as dyn Logger, dyn Flush);

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn new(logger: Arc<dyn Logger>) -> Self {
    Self { logger }
  }

  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

injectable!(ReportService => new("ILogger" => dyn Logger));

fn main() -> tessel_ioc::Result<()> {
  let metadata = Arc::new(MetadataRegistry::new());
  metadata
    .mark_injectable::<ConsoleLogger>()
    .mark_injectable::<ReportService>();

  // --- Registration ---
  // One singleton, served under two contracts and its own type.
  let container = Container::with_metadata(metadata);
  container
    .register_singleton::<ConsoleLogger>([
      TypeRef::from("ILogger"),
      TypeRef::from("IFlush"),
      TypeRef::of::<ConsoleLogger>(),
    ])
    .register_singleton::<ReportService>(TypeRef::of::<ReportService>());

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = container.get::<ReportService>(TypeRef::of::<ReportService>())?;
  report_service.generate_report();

  let flush = container.get::<dyn Flush>("IFlush")?;
  flush.flush();
  Ok(())
}
