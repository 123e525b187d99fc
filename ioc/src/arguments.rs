//! Positional dependency lists handed to constructors and setters.

use crate::error::{Error, Result};
use crate::locator::Service;
use serde::de::DeserializeOwned;
use std::any::{type_name, Any};
use std::sync::Arc;

/// The resolved dependencies for one constructor or method call, in the
/// order their keys were declared.
#[derive(Clone, Default)]
pub struct Arguments {
  values: Vec<Service>,
}

impl Arguments {
  /// An empty argument list, used for constructors invoked without injection.
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// The raw service at `index`, if one was injected there.
  pub fn raw(&self, index: usize) -> Option<&Service> {
    self.values.get(index)
  }

  /// Downcasts the argument at `index` to a shared `T`.
  pub fn service<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
    let raw = self.raw(index).ok_or(Error::MissingArgument { index })?;
    Arc::clone(raw)
      .downcast::<T>()
      .map_err(|_| Error::ArgumentType {
        index,
        expected: type_name::<T>(),
      })
  }

  /// Like [`Arguments::service`], but yields `None` when nothing was injected
  /// at `index`.
  pub fn optional_service<T: Any + Send + Sync>(&self, index: usize) -> Result<Option<Arc<T>>> {
    if index >= self.len() {
      return Ok(None);
    }
    self.service(index).map(Some)
  }

  /// Decodes an array-shaped argument (a `serde_json::Value`) into `T`.
  ///
  /// This is how scalar values extracted with a dotted key, such as
  /// `"config.name"`, reach a typed parameter.
  pub fn value<T: DeserializeOwned>(&self, index: usize) -> Result<T> {
    let value = self.service::<serde_json::Value>(index)?;
    T::deserialize(&*value).map_err(|source| Error::ArgumentDecode { index, source })
  }

  /// Like [`Arguments::value`], but yields `None` when nothing was injected at
  /// `index`.
  pub fn optional_value<T: DeserializeOwned>(&self, index: usize) -> Result<Option<T>> {
    if index >= self.len() {
      return Ok(None);
    }
    self.value(index).map(Some)
  }
}

impl From<Vec<Service>> for Arguments {
  fn from(values: Vec<Service>) -> Self {
    Self { values }
  }
}

impl FromIterator<Service> for Arguments {
  fn from_iter<I: IntoIterator<Item = Service>>(iter: I) -> Self {
    Self {
      values: iter.into_iter().collect(),
    }
  }
}

impl std::fmt::Debug for Arguments {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Arguments({} values)", self.values.len())
  }
}
