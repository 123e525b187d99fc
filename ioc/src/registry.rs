//! The name-to-class table the factory instantiates from.

use crate::class::ClassDefinition;
use dashmap::DashMap;
use std::sync::Arc;

/// A thread-safe registry of [`ClassDefinition`]s keyed by class name.
///
/// Classes can be registered at any point; the latest registration under a
/// name wins.
#[derive(Default)]
pub struct ClassRegistry {
  classes: DashMap<String, Arc<ClassDefinition>>,
}

impl ClassRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `class` under its own name, returning the definition it
  /// replaced, if any.
  pub fn register(&self, class: ClassDefinition) -> Option<Arc<ClassDefinition>> {
    let name = class.name().to_owned();
    tracing::trace!(class = %name, type_name = class.type_name(), "registering class");
    self.classes.insert(name, Arc::new(class))
  }

  /// Looks up a class. The returned handle does not keep the registry locked.
  pub fn get(&self, name: &str) -> Option<Arc<ClassDefinition>> {
    self.classes.get(name).map(|entry| Arc::clone(entry.value()))
  }

  pub fn contains(&self, name: &str) -> bool {
    self.classes.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.classes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.classes.is_empty()
  }
}

impl std::fmt::Debug for ClassRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut names: Vec<String> = self.classes.iter().map(|e| e.key().clone()).collect();
    names.sort();
    f.debug_struct("ClassRegistry").field("classes", &names).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct First;
  #[derive(Default)]
  struct Second;

  #[test]
  fn latest_registration_wins() {
    let registry = ClassRegistry::new();
    assert!(registry.is_empty());

    assert!(registry
      .register(ClassDefinition::without_constructor::<First>("Thing").build())
      .is_none());
    let replaced = registry
      .register(ClassDefinition::without_constructor::<Second>("Thing").build())
      .unwrap();

    assert!(replaced.type_name().ends_with("First"));
    assert!(registry.get("Thing").unwrap().type_name().ends_with("Second"));
    assert!(registry.contains("Thing"));
    assert!(!registry.contains("Other"));
    assert_eq!(registry.len(), 1);
  }
}
