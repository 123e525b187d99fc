use thiserror::Error;

/// The error type for every fallible operation in `fibre_inject`.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Class not found: {0}")]
  ClassNotFound(String),

  #[error("{annotation} annotation not found on the constructor of {class}, required by {factory}")]
  MissingInjectionAnnotation {
    class: String,
    annotation: &'static str,
    factory: &'static str,
  },

  #[error("The key \"{key}\" provided in the dotted notation could not be found in the array service")]
  MissingKey { key: String },

  #[error("Cannot read key \"{segment}\" of dotted service \"{path}\": the value is not an array service")]
  NotIndexable { path: String, segment: String },

  #[error("Service not found: {0}")]
  ServiceNotFound(String),

  #[error("Circular dependency detected while resolving service: {0}")]
  CircularDependency(String),

  #[error("Service '{name}' is not of the requested type {expected}")]
  ServiceType { name: String, expected: &'static str },

  #[error("Missing injected argument at position {index}")]
  MissingArgument { index: usize },

  #[error("Injected argument at position {index} is not of type {expected}")]
  ArgumentType { index: usize, expected: &'static str },

  #[error("Failed to decode injected argument at position {index}: {source}")]
  ArgumentDecode {
    index: usize,
    #[source]
    source: serde_json::Error,
  },

  #[error("Service locator failed: {0}")]
  Locator(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("Configuration file not found: {0}")]
  ConfigNotFound(String),

  #[error("Failed to read configuration file: {0}")]
  ConfigRead(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  ConfigParse(String),

  #[error("Internal library error: {0}")]
  Internal(String),
}

/// A specialized `Result` type for `fibre_inject` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
