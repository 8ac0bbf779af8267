use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tessel_ioc::{Arguments, Container, Injectable, MetadataRegistry};

static CONNECTIONS_OPENED: AtomicUsize = AtomicUsize::new(0);

struct DatabasePool {
  id: usize,
}

impl Injectable for DatabasePool {
  fn construct(_args: &mut Arguments) -> tessel_ioc::Result<Self> {
    let id = CONNECTIONS_OPENED.fetch_add(1, Ordering::SeqCst);
    println!("Opening database pool #{}", id);
    Ok(DatabasePool { id })
  }
}

struct RequestId(usize);

impl Injectable for RequestId {
  fn construct(_args: &mut Arguments) -> tessel_ioc::Result<Self> {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    Ok(RequestId(NEXT.fetch_add(1, Ordering::SeqCst)))
  }
}

fn main() -> tessel_ioc::Result<()> {
  let metadata = Arc::new(MetadataRegistry::new());
  metadata
    .mark_injectable::<DatabasePool>()
    .mark_injectable::<RequestId>();

  let container = Container::with_metadata(metadata);
  container
    .register_singleton::<DatabasePool>("DatabasePool")
    .register_transient::<RequestId>("RequestId");

  // The pool is opened on the first request only.
  let pool1 = container.get::<DatabasePool>("DatabasePool")?;
  let pool2 = container.get::<DatabasePool>("DatabasePool")?;
  assert!(Arc::ptr_eq(&pool1, &pool2));
  assert_eq!(CONNECTIONS_OPENED.load(Ordering::SeqCst), 1);
  println!("Both handles share pool #{}", pool1.id);

  // Every request gets a fresh id.
  let first = container.get::<RequestId>("RequestId")?;
  let second = container.get::<RequestId>("RequestId")?;
  assert_ne!(first.0, second.0);
  println!("Request ids: {} and {}", first.0, second.0);
  Ok(())
}
