use std::sync::Arc;
use tessel_ioc::{injectable, Container, MetadataRegistry};

struct Greeting {
  text: String,
}

impl Greeting {
  fn new(name: Arc<String>) -> Self {
    Self {
      text: format!("Hello, {}!", name),
    }
  }
}

injectable!(Greeting => new("name" => String));

// Configures a container and runs some logic against it.
// Accepting a `&Container` lets callers hand in a controlled environment.
fn greet(container: &Container, name: &str) -> tessel_ioc::Result<String> {
  container
    .register_instance("name", Arc::new(name.to_string()))
    .register_singleton::<Greeting>("greeting");
  Ok(container.get::<Greeting>("greeting")?.text.clone())
}

fn main() -> tessel_ioc::Result<()> {
  // The constructor is declared once and shared by every container.
  let metadata = Arc::new(MetadataRegistry::new());
  metadata.mark_injectable::<Greeting>();

  let first = Container::with_metadata(Arc::clone(&metadata));
  let second = Container::with_metadata(Arc::clone(&metadata));

  println!("{}", greet(&first, "first")?);
  println!("{}", greet(&second, "second")?);

  // Registrations stay with the container they were made in.
  assert_eq!(first.get::<String>("name")?.as_str(), "first");
  assert_eq!(second.get::<String>("name")?.as_str(), "second");
  assert!(Container::with_metadata(metadata).resolve("greeting").is_err());

  println!("\nVerified that containers sharing metadata keep separate registrations.");
  Ok(())
}
