//! The annotated factory: builds a registered class by name and injects its
//! constructor and setter dependencies.

use crate::annotation::{AnnotationReader, DeclaredAnnotationReader, Inject};
use crate::arguments::Arguments;
use crate::error::{Error, Result};
use crate::global::global;
use crate::locator::{Service, ServiceLocator};
use crate::path;
use crate::registry::ClassRegistry;
use std::any::{type_name, Any};
use std::sync::Arc;

/// Builds objects from a [`ClassRegistry`], resolving the services named by
/// their [`Inject`] annotations against a [`ServiceLocator`].
///
/// The factory holds no state between calls: every call reads annotations
/// afresh and resolves every dependency again.
#[derive(Clone)]
pub struct AnnotatedFactory {
  registry: Arc<ClassRegistry>,
  reader: Arc<dyn AnnotationReader>,
}

impl AnnotatedFactory {
  /// A factory over `registry` that reads the annotations declared on each
  /// class definition.
  pub fn new(registry: Arc<ClassRegistry>) -> Self {
    Self {
      registry,
      reader: Arc::new(DeclaredAnnotationReader),
    }
  }

  /// A factory over the [global](crate::global) registry.
  pub fn global() -> Self {
    Self::new(global())
  }

  /// Replaces the annotation reader.
  pub fn with_reader(mut self, reader: Arc<dyn AnnotationReader>) -> Self {
    self.reader = reader;
    self
  }

  pub fn registry(&self) -> &Arc<ClassRegistry> {
    &self.registry
  }

  /// Builds a new instance of `class_name`.
  ///
  /// The constructor is called with the services named by its annotation, or
  /// with no arguments when it has none. Every public method carrying an
  /// annotation is then invoked with its own services. Any failure aborts the
  /// whole call and no instance is returned.
  pub fn create_object(&self, locator: &dyn ServiceLocator, class_name: &str) -> Result<Service> {
    let class = self
      .registry
      .get(class_name)
      .ok_or_else(|| Error::ClassNotFound(class_name.to_owned()))?;
    tracing::debug!(class = class_name, "creating annotated object");

    let mut instance = if class.has_constructor() {
      let inject = self.reader.constructor_annotation(&class);
      if inject.is_none() && class.required_parameters() > 0 {
        return Err(Error::MissingInjectionAnnotation {
          class: class_name.to_owned(),
          annotation: Inject::NAME,
          factory: type_name::<Self>(),
        });
      }
      let args = match &inject {
        Some(inject) => self.resolve_services(locator, inject)?,
        None => Arguments::empty(),
      };
      class.instantiate(&args)?
    } else {
      class.instantiate(&Arguments::empty())?
    };

    for method in class.methods() {
      if let Some(inject) = self.reader.method_annotation(&class, method) {
        tracing::trace!(class = class_name, method = method.name(), "injecting method");
        let args = self.resolve_services(locator, &inject)?;
        method.invoke(&mut instance, &args)?;
      }
    }

    Ok(Arc::from(instance))
  }

  /// Builds a new instance of `class_name` and downcasts it to `T`.
  pub fn create<T: Any + Send + Sync>(
    &self,
    locator: &dyn ServiceLocator,
    class_name: &str,
  ) -> Result<Arc<T>> {
    self
      .create_object(locator, class_name)?
      .downcast::<T>()
      .map_err(|_| Error::ServiceType {
        name: class_name.to_owned(),
        expected: type_name::<T>(),
      })
  }

  /// Resolves every key of `inject`, in order.
  ///
  /// A key is first looked up literally. Only when the locator has no
  /// service under the full key and the key contains dots is it read as
  /// `service.key.key...`. A key the locator does not know is instantiated as
  /// a registered class if that class needs no constructor arguments; such
  /// objects receive no injection of their own.
  pub fn resolve_services(
    &self,
    locator: &dyn ServiceLocator,
    inject: &Inject,
  ) -> Result<Arguments> {
    inject
      .services()
      .iter()
      .map(|key| self.resolve_service(locator, key))
      .collect()
  }

  fn resolve_service(&self, locator: &dyn ServiceLocator, key: &str) -> Result<Service> {
    let parts: Vec<&str> = key.split('.').collect();
    let (name, segments) = if parts.len() > 1 && !locator.has(key) {
      (parts[0], &parts[1..])
    } else {
      (key, &[][..])
    };

    let service = if locator.has(name) {
      locator.get(name)?
    } else {
      match self.registry.get(name) {
        Some(class) if class.instantiable_without_arguments() => {
          tracing::trace!(class = name, "instantiating dependency directly");
          Arc::from(class.instantiate(&Arguments::empty())?)
        }
        _ => return Err(Error::ClassNotFound(name.to_owned())),
      }
    };

    if segments.is_empty() {
      tracing::trace!(key, "resolved service");
      return Ok(service);
    }
    let value = path::read_keys(key, &service, segments)?;
    tracing::trace!(key, service = name, "resolved dotted service");
    Ok(path::into_service(value))
  }
}

impl std::fmt::Debug for AnnotatedFactory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AnnotatedFactory")
      .field("registry", &self.registry)
      .finish_non_exhaustive()
  }
}
