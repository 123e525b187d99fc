//! The `Container` struct: a name-keyed service locator.

use crate::abstract_factory::AbstractFactory;
use crate::core::{next_container_id, Provider, ResolutionGuard, ServiceFactory};
use crate::error::{Error, Result};
use crate::locator::{Service, ServiceLocator};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::any::{type_name, Any};
use std::sync::Arc;

/// A thread-safe service container keyed by name.
///
/// Services can be registered as ready instances, as lazily built singletons
/// or as transients built on every lookup. Names with no registration fall
/// through to the registered [`AbstractFactory`]s, in the order they were
/// added.
pub struct Container {
  id: u64,
  providers: DashMap<String, Arc<Provider>>,
  abstract_factories: RwLock<Vec<Arc<dyn AbstractFactory>>>,
}

impl Default for Container {
  fn default() -> Self {
    Self {
      id: next_container_id(),
      providers: DashMap::new(),
      abstract_factories: RwLock::new(Vec::new()),
    }
  }
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn insert(&self, name: &str, provider: Provider) {
    tracing::trace!(service = name, "registering service");
    self.providers.insert(name.to_owned(), Arc::new(provider));
  }

  fn erase<T: Any + Send + Sync>(
    factory: impl Fn(&Container) -> Result<T> + Send + Sync + 'static,
  ) -> ServiceFactory {
    Box::new(move |container: &Container| factory(container).map(|v| Arc::new(v) as Service))
  }

  fn abstract_factory_for(&self, name: &str) -> Option<Arc<dyn AbstractFactory>> {
    // Snapshot first: `can_create` may query this container again.
    let factories = self.abstract_factories.read().clone();
    factories
      .into_iter()
      .find(|factory| factory.can_create(self, name))
  }

  // --- Registration ---

  /// Registers a ready-made instance.
  pub fn add_instance<T: Any + Send + Sync>(&self, name: &str, instance: T) {
    self.insert(name, Provider::instance(Arc::new(instance)));
  }

  /// Registers an already shared service as-is.
  pub fn add_service(&self, name: &str, service: Service) {
    self.insert(name, Provider::instance(service));
  }

  /// Registers a service built on first lookup and shared afterwards.
  ///
  /// The factory runs at most once, even under concurrent lookups. A factory
  /// that fails leaves the singleton unbuilt so a later lookup retries.
  pub fn add_singleton<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&Container) -> Result<T> + Send + Sync + 'static,
  ) {
    self.insert(
      name,
      Provider::Singleton {
        cell: once_cell::sync::OnceCell::new(),
        factory: Self::erase(factory),
      },
    );
  }

  /// Registers a service built anew on every lookup.
  pub fn add_transient<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&Container) -> Result<T> + Send + Sync + 'static,
  ) {
    self.insert(
      name,
      Provider::Transient {
        factory: Self::erase(factory),
      },
    );
  }

  /// Adds a fallback consulted for names with no registration of their own.
  pub fn add_abstract_factory(&self, factory: Arc<dyn AbstractFactory>) {
    self.abstract_factories.write().push(factory);
  }

  // --- Resolution ---

  /// Returns `true` if `name` is registered or an abstract factory can
  /// create it.
  pub fn has(&self, name: &str) -> bool {
    self.providers.contains_key(name) || self.abstract_factory_for(name).is_some()
  }

  /// Resolves a service by name.
  pub fn get(&self, name: &str) -> Result<Service> {
    // The guard fails on circular resolution and unwinds the stack on return.
    let _guard = ResolutionGuard::enter(self.id, name)?;

    // Clone the provider out so no map shard stays locked while its factory
    // resolves further services.
    let provider = self.providers.get(name).map(|entry| Arc::clone(entry.value()));
    if let Some(provider) = provider {
      return provider.provide(self);
    }

    match self.abstract_factory_for(name) {
      Some(factory) => {
        tracing::debug!(service = name, "creating service through abstract factory");
        factory.create(self, name)
      }
      None => Err(Error::ServiceNotFound(name.to_owned())),
    }
  }

  /// Resolves a service by name and downcasts it to `T`.
  pub fn resolve<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    self.get(name)?.downcast::<T>().map_err(|_| Error::ServiceType {
      name: name.to_owned(),
      expected: type_name::<T>(),
    })
  }
}

impl ServiceLocator for Container {
  fn has(&self, key: &str) -> bool {
    Container::has(self, key)
  }

  fn get(&self, key: &str) -> Result<Service> {
    Container::get(self, key)
  }
}

impl std::fmt::Debug for Container {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut names: Vec<String> = self.providers.iter().map(|e| e.key().clone()).collect();
    names.sort();
    f.debug_struct("Container")
      .field("services", &names)
      .field("abstract_factories", &self.abstract_factories.read().len())
      .finish()
  }
}
