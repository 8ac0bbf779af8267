use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tessel_app::{compose, declare, App, AppService, ConsoleLogger, Logger, IAPP, ILOGGER};
use tessel_ioc::{injectable, Container, MetadataRegistry, Object};

// --- Test Fixtures ---

type Journal = Mutex<Vec<(i32, String)>>;

const JOURNAL: &str = "Journal";

// A logger that records into a journal shared through the container.
struct RecordingLogger {
  journal: Arc<Journal>,
}

impl RecordingLogger {
  fn new(journal: Arc<Journal>) -> Self {
    Self { journal }
  }
}

impl Logger for RecordingLogger {
  fn write(&self, level: i32, message: &str) {
    self.journal.lock().push((level, message.to_string()));
  }
}

injectable!(RecordingLogger => new(JOURNAL => Journal) as dyn Logger);

fn container() -> Container {
  let metadata = Arc::new(MetadataRegistry::new());
  declare(&metadata);
  metadata.mark_injectable::<RecordingLogger>();
  Container::with_metadata(metadata)
}

// --- Composition Tests ---

#[test]
fn test_app_writes_once_at_startup() {
  // Arrange
  let journal: Arc<Journal> = Arc::new(Mutex::new(Vec::new()));
  let container = container();
  container
    .install(compose)
    .register_instance(JOURNAL, Arc::clone(&journal))
    .register_transient::<RecordingLogger>(ILOGGER);

  // Act
  let app = container.get::<dyn AppService>(IAPP).unwrap();
  app.run();

  // Assert
  assert_eq!(*journal.lock(), vec![(0, "App starting...".to_string())]);
}

#[test]
fn test_composition_root_wires_console_logger() {
  let container = container();
  container.install(compose);

  let app = container.get::<dyn AppService>(IAPP).unwrap();
  app.run();

  let logger = container.resolve(ILOGGER).unwrap();
  assert!(logger.downcast::<ConsoleLogger>().is_some());
  assert!(logger.downcast::<dyn Logger>().is_some());
}

#[test]
fn test_logger_is_transient_and_app_is_singleton() {
  let container = container();
  container.install(compose);

  let first_logger = container.resolve(ILOGGER).unwrap();
  let second_logger = container.resolve(ILOGGER).unwrap();
  assert!(!Object::ptr_eq(&first_logger, &second_logger));

  let first_app = container.get::<App>(IAPP).unwrap();
  let second_app = container.get::<dyn AppService>(IAPP).unwrap();
  assert_eq!(
    Arc::as_ptr(&first_app) as *const (),
    Arc::as_ptr(&second_app) as *const ()
  );
}
