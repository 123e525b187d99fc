//! The read-only service lookup capability the factory consumes.

use crate::error::{Error, Result};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A live, type-erased service.
pub type Service = Arc<dyn Any + Send + Sync>;

/// A registry of services addressed by string keys.
///
/// The factory only ever queries a locator. Whether `get` builds, caches or
/// shares what it returns is the locator's own concern.
pub trait ServiceLocator {
  /// Returns `true` if a service is available under `key`.
  fn has(&self, key: &str) -> bool;

  /// Fetches the service registered under `key`.
  ///
  /// Fails if `has` would have returned `false`. Errors are handed back to the
  /// factory's caller unmodified.
  fn get(&self, key: &str) -> Result<Service>;
}

impl<L: ServiceLocator + ?Sized> ServiceLocator for &L {
  fn has(&self, key: &str) -> bool {
    (**self).has(key)
  }

  fn get(&self, key: &str) -> Result<Service> {
    (**self).get(key)
  }
}

impl<L: ServiceLocator + ?Sized> ServiceLocator for Arc<L> {
  fn has(&self, key: &str) -> bool {
    (**self).has(key)
  }

  fn get(&self, key: &str) -> Result<Service> {
    (**self).get(key)
  }
}

impl ServiceLocator for HashMap<String, Service> {
  fn has(&self, key: &str) -> bool {
    self.contains_key(key)
  }

  fn get(&self, key: &str) -> Result<Service> {
    HashMap::get(self, key)
      .cloned()
      .ok_or_else(|| Error::ServiceNotFound(key.to_owned()))
  }
}
