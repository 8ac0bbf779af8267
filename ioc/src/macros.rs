//! Public macros for declaring injectable types.

/// Implements [`Injectable`](crate::Injectable) for a type from its constructor.
///
/// The constructor is an associated function of the type. Each parameter is
/// written as `key => Type`: the key it is resolved under, and the type it is
/// served as (the constructor receives an `Arc<Type>`). An optional `as` list
/// names the contracts the type can be served as.
///
/// The macro only describes the constructor. The type still has to be marked
/// injectable in a [`MetadataRegistry`](crate::MetadataRegistry) before a
/// container can build it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tessel_ioc::{injectable, Container, MetadataRegistry};
///
/// trait Greeter: Send + Sync {
///   fn greet(&self) -> String;
/// }
///
/// struct English {
///   name: Arc<String>,
/// }
///
/// impl English {
///   fn new(name: Arc<String>) -> Self {
///     Self { name }
///   }
/// }
///
/// impl Greeter for English {
///   fn greet(&self) -> String {
///     format!("Hello, {}!", self.name)
///   }
/// }
///
/// injectable!(English => new("name" => String) as dyn Greeter);
///
/// let metadata = Arc::new(MetadataRegistry::new());
/// metadata.mark_injectable::<English>();
///
/// let container = Container::with_metadata(metadata);
/// container
///   .register_instance("name", Arc::new(String::from("World")))
///   .register_transient::<English>("Greeter");
///
/// let greeter = container.get::<dyn Greeter>("Greeter").unwrap();
/// assert_eq!(greeter.greet(), "Hello, World!");
/// ```
#[macro_export]
macro_rules! injectable {
  ($type:ty => $constructor:ident ( $($key:expr => $param:ty),* $(,)? ) $(as $($contract:ty),+)?) => {
    impl $crate::Injectable for $type {
      fn dependencies() -> ::std::vec::Vec<$crate::TypeKey> {
        ::std::vec![$($crate::TypeKey::from($key)),*]
      }

      #[allow(unused_variables)]
      fn construct(args: &mut $crate::Arguments) -> $crate::Result<Self> {
        ::std::result::Result::Ok(<$type>::$constructor($(args.take::<$param>()?),*))
      }

      $(
      fn expose(views: &mut $crate::Views<Self>) {
        $(views.expose::<$contract>(|it| it);)+
      }
      )?
    }
  };
}
