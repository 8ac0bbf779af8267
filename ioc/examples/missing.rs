use std::sync::Arc;
use tessel_ioc::{injectable, Container, MetadataRegistry, ResolveError};

#[derive(Default)]
struct ReportService;

injectable!(ReportService => default());

fn main() {
  let metadata = Arc::new(MetadataRegistry::new());
  let container = Container::with_metadata(Arc::clone(&metadata));

  // --- A key nobody registered ---
  println!("Attempting to resolve a key that was never registered...");
  match container.resolve("IReportService") {
    Err(err @ ResolveError::UnregisteredType(_)) => println!("Correctly failed: {}", err),
    other => panic!("unexpected outcome: {:?}", other),
  }

  // --- A registration whose implementation was never marked injectable ---
  // Registration succeeds; the problem only surfaces on the first request.
  container.register_singleton::<ReportService>("IReportService");
  println!("\nAttempting to resolve an implementation that was never marked injectable...");
  match container.resolve("IReportService") {
    Err(err @ ResolveError::NotInjectable(_)) => println!("Correctly failed: {}", err),
    other => panic!("unexpected outcome: {:?}", other),
  }

  // --- Marking the type fixes the same registration ---
  metadata.mark_injectable::<ReportService>();
  let resolved = container.resolve("IReportService");
  assert!(resolved.is_ok());
  println!("\nResolved after marking: {:?}", resolved);
}
