//! Injection annotations and the readers that look them up.

use crate::class::{ClassDefinition, MethodDefinition};
use crate::config::AnnotationConfig;

/// An injection annotation: the ordered service keys whose resolved values are
/// passed positionally to a constructor or a method.
///
/// Each key is either a literal locator key or a dotted path such as
/// `"config.database.host"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inject {
  services: Vec<String>,
}

impl Inject {
  /// The name reported when a required annotation is missing.
  pub const NAME: &'static str = "Inject";

  pub fn new<I, S>(services: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      services: services.into_iter().map(Into::into).collect(),
    }
  }

  pub fn services(&self) -> &[String] {
    &self.services
  }
}

impl From<Vec<String>> for Inject {
  fn from(services: Vec<String>) -> Self {
    Self { services }
  }
}

/// Looks up the injection annotations attached to a class.
pub trait AnnotationReader: Send + Sync {
  fn constructor_annotation(&self, class: &ClassDefinition) -> Option<Inject>;

  fn method_annotation(&self, class: &ClassDefinition, method: &MethodDefinition) -> Option<Inject>;
}

/// Reads the annotations declared on the class definitions themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeclaredAnnotationReader;

impl AnnotationReader for DeclaredAnnotationReader {
  fn constructor_annotation(&self, class: &ClassDefinition) -> Option<Inject> {
    class.constructor_inject().cloned()
  }

  fn method_annotation(
    &self,
    _class: &ClassDefinition,
    method: &MethodDefinition,
  ) -> Option<Inject> {
    method.inject().cloned()
  }
}

/// Reads annotations from a configuration side table, falling back to the
/// declared annotations for anything the table does not mention.
#[derive(Debug, Default, Clone)]
pub struct ConfiguredAnnotationReader {
  config: AnnotationConfig,
}

impl ConfiguredAnnotationReader {
  pub fn new(config: AnnotationConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &AnnotationConfig {
    &self.config
  }
}

impl AnnotationReader for ConfiguredAnnotationReader {
  fn constructor_annotation(&self, class: &ClassDefinition) -> Option<Inject> {
    match self
      .config
      .class(class.name())
      .and_then(|entry| entry.constructor.as_ref())
    {
      Some(keys) => Some(Inject::new(keys.iter().cloned())),
      None => DeclaredAnnotationReader.constructor_annotation(class),
    }
  }

  fn method_annotation(
    &self,
    class: &ClassDefinition,
    method: &MethodDefinition,
  ) -> Option<Inject> {
    match self
      .config
      .class(class.name())
      .and_then(|entry| entry.methods.get(method.name()))
    {
      Some(keys) => Some(Inject::new(keys.iter().cloned())),
      None => DeclaredAnnotationReader.method_annotation(class, method),
    }
  }
}
