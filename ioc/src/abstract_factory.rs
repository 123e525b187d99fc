//! Fallback factories a container consults for names it has no registration
//! for, and the provider that wires the annotated factory in as one.

use crate::container::Container;
use crate::error::Result;
use crate::factory::AnnotatedFactory;
use crate::locator::{Service, ServiceLocator};
use std::sync::Arc;

/// Creates services on demand for names a container does not know.
pub trait AbstractFactory: Send + Sync {
  fn can_create(&self, locator: &dyn ServiceLocator, name: &str) -> bool;

  fn create(&self, locator: &dyn ServiceLocator, name: &str) -> Result<Service>;
}

/// Builds any class known to its factory's registry, so a container can hand
/// out annotated classes by name without registering each one.
#[derive(Clone)]
pub struct AnnotatedAbstractFactory {
  factory: AnnotatedFactory,
}

impl AnnotatedAbstractFactory {
  pub fn new(factory: AnnotatedFactory) -> Self {
    Self { factory }
  }
}

impl AbstractFactory for AnnotatedAbstractFactory {
  fn can_create(&self, _locator: &dyn ServiceLocator, name: &str) -> bool {
    self.factory.registry().contains(name)
  }

  fn create(&self, locator: &dyn ServiceLocator, name: &str) -> Result<Service> {
    self.factory.create_object(locator, name)
  }
}

/// Installs the annotated abstract factory into a container.
///
/// ```
/// use fibre_inject::{AnnotatedFactory, ClassDefinition, ClassRegistry, ConfigProvider, Container};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Clock;
///
/// let registry = Arc::new(ClassRegistry::new());
/// registry.register(ClassDefinition::without_constructor::<Clock>("Clock").build());
///
/// let container = Container::new();
/// ConfigProvider::new(AnnotatedFactory::new(registry)).register(&container);
///
/// assert!(container.has("Clock"));
/// assert!(container.resolve::<Clock>("Clock").is_ok());
/// ```
#[derive(Clone)]
pub struct ConfigProvider {
  factory: AnnotatedFactory,
}

impl ConfigProvider {
  pub fn new(factory: AnnotatedFactory) -> Self {
    Self { factory }
  }

  pub fn register(&self, container: &Container) {
    container.add_abstract_factory(Arc::new(AnnotatedAbstractFactory::new(self.factory.clone())));
  }
}

impl Default for ConfigProvider {
  /// A provider over the global class registry.
  fn default() -> Self {
    Self::new(AnnotatedFactory::global())
  }
}
