//! The global class registry and access functions.

use crate::registry::ClassRegistry;
use once_cell::sync::Lazy;
use std::sync::Arc;

// The process-wide registry, created on first access.
static GLOBAL_REGISTRY: Lazy<Arc<ClassRegistry>> = Lazy::new(Default::default);

/// Returns a handle to the global class registry.
///
/// Classes registered here are visible to every factory built with
/// [`AnnotatedFactory::global`](crate::AnnotatedFactory::global).
///
/// # Examples
///
/// ```
/// use fibre_inject::{global, ClassDefinition};
///
/// #[derive(Default)]
/// struct Clock;
///
/// global().register(ClassDefinition::without_constructor::<Clock>("Clock").build());
/// assert!(global().contains("Clock"));
/// ```
pub fn global() -> Arc<ClassRegistry> {
  Arc::clone(&GLOBAL_REGISTRY)
}
