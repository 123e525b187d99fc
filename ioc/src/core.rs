//! Core, non-public data structures for the service container.

use crate::container::Container;
use crate::error::{Error, Result};
use crate::locator::Service;
use std::cell::RefCell;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(0);

/// Hands out a process-unique id for a new container.
pub(crate) fn next_container_id() -> u64 {
  NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed)
}

thread_local! {
  // The (container, service name) pairs currently being resolved on this
  // thread. A pair seen twice means a factory asked, directly or indirectly,
  // its own container for itself.
  static RESOLVING_STACK: RefCell<HashSet<(u64, String)>> = RefCell::new(HashSet::new());
}

/// An RAII guard that detects circular resolution within one container.
///
/// Entering a pair that is already on this thread's stack fails with
/// [`Error::CircularDependency`]. Dropping the guard removes the pair again.
pub(crate) struct ResolutionGuard {
  key: (u64, String),
}

impl ResolutionGuard {
  pub(crate) fn enter(container_id: u64, name: &str) -> Result<Self> {
    let key = (container_id, name.to_owned());
    RESOLVING_STACK.with(|stack| {
      // `insert` returns `false` if the value was already present.
      if !stack.borrow_mut().insert(key.clone()) {
        return Err(Error::CircularDependency(name.to_owned()));
      }
      Ok(Self { key })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.key);
    });
  }
}

pub(crate) type ServiceFactory = Box<dyn Fn(&Container) -> Result<Service> + Send + Sync>;

pub(crate) enum Provider {
  Singleton {
    cell: once_cell::sync::OnceCell<Service>,
    factory: ServiceFactory,
  },
  Transient {
    factory: ServiceFactory,
  },
}

impl Provider {
  pub(crate) fn instance(service: Service) -> Self {
    Provider::Singleton {
      cell: once_cell::sync::OnceCell::with_value(service),
      factory: Box::new(|_: &Container| {
        Err(Error::Internal(
          "pre-initialized singleton factory should not be called".to_owned(),
        ))
      }),
    }
  }

  pub(crate) fn provide(&self, container: &Container) -> Result<Service> {
    match self {
      Provider::Singleton { cell, factory } => cell.get_or_try_init(|| factory(container)).cloned(),
      Provider::Transient { factory } => factory(container),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn guard_rejects_reentry_until_dropped() {
    let outer = ResolutionGuard::enter(1, "loop").unwrap();
    assert!(matches!(
      ResolutionGuard::enter(1, "loop"),
      Err(Error::CircularDependency(name)) if name == "loop"
    ));
    drop(outer);
    assert!(ResolutionGuard::enter(1, "loop").is_ok());
  }

  #[test]
  fn guard_is_scoped_to_one_container() {
    let _outer = ResolutionGuard::enter(1, "logger").unwrap();
    assert!(ResolutionGuard::enter(2, "logger").is_ok());
  }
}
