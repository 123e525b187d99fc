//! Public macros for declaring annotations and resolving services.

/// Builds an [`Inject`](crate::Inject) annotation from service keys.
///
/// # Examples
///
/// ```
/// use fibre_inject::inject;
///
/// let annotation = inject!["config.name", "mailer"];
/// assert_eq!(annotation.services(), ["config.name", "mailer"]);
/// ```
#[macro_export]
macro_rules! inject {
  () => {
    $crate::Inject::default()
  };
  ($($key:expr),+ $(,)?) => {
    $crate::Inject::new([$($key),+])
  };
}

/// Resolves a typed service by name from a container, returning `None` if it
/// is missing, fails to build, or has another type.
///
/// # Examples
///
/// ```
/// use fibre_inject::{maybe_resolve_from, Container};
///
/// let container = Container::new();
/// container.add_instance("port", 8080u16);
///
/// assert_eq!(*maybe_resolve_from!(container, u16, "port").unwrap(), 8080);
/// assert!(maybe_resolve_from!(container, u16, "host").is_none());
/// ```
#[macro_export]
macro_rules! maybe_resolve_from {
  ($container:expr, $type:ty, $name:expr) => {
    $container.resolve::<$type>($name).ok()
  };
}

/// Resolves a typed service by name from a container.
///
/// # Panics
///
/// Panics if the service cannot be resolved. Use
/// [`Container::resolve`](crate::Container::resolve) for the fallible form.
///
/// # Examples
///
/// ```
/// use fibre_inject::{resolve_from, Container};
///
/// let container = Container::new();
/// container.add_instance("greeting", String::from("hello"));
///
/// let greeting = resolve_from!(container, String, "greeting");
/// assert_eq!(*greeting, "hello");
/// ```
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, $type:ty, $name:expr) => {
    $container
      .resolve::<$type>($name)
      .unwrap_or_else(|e| {
        panic!(
          "Failed to resolve required service with name '{}': {} ({})",
          $name,
          std::any::type_name::<$type>(),
          e
        )
      })
  };
}
