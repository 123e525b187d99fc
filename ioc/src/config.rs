//! Annotation side tables loaded from YAML or JSON.
//!
//! ```yaml
//! classes:
//!   Greeter:
//!     constructor: ["config.greeting.name"]
//!     methods:
//!       set_mailer: ["mailer"]
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_BASE_NAME: &str = "fibre_inject";
const DEFAULT_CONFIG_EXTENSION: &str = "yaml";

/// Injection annotations keyed by class name.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnnotationConfig {
  #[serde(default)]
  pub classes: BTreeMap<String, ClassAnnotations>,
}

/// The annotations configured for one class.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClassAnnotations {
  /// Services for the constructor. Absent means "use what the class declares".
  #[serde(default)]
  pub constructor: Option<Vec<String>>,
  /// Services per public method name.
  #[serde(default)]
  pub methods: BTreeMap<String, Vec<String>>,
}

impl AnnotationConfig {
  pub fn class(&self, name: &str) -> Option<&ClassAnnotations> {
    self.classes.get(name)
  }

  pub fn from_yaml_str(source: &str) -> Result<Self> {
    serde_yaml::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))
  }

  pub fn from_json_str(source: &str) -> Result<Self> {
    serde_json::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))
  }

  /// Loads a config file. Files ending in `.json` are read as JSON, anything
  /// else as YAML.
  pub fn from_file(path: &Path) -> Result<Self> {
    tracing::debug!(path = %path.display(), "loading annotation config");
    let reader = io::BufReader::new(File::open(path)?);
    let is_json = path
      .extension()
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
      serde_json::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))
    } else {
      serde_yaml::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))
    }
  }
}

/// Finds the annotation config file in the working directory.
///
/// With an environment name (given, or taken from `FIBRE_ENV` or `APP_ENV`)
/// `fibre_inject.<env>.yaml` is preferred over `fibre_inject.yaml`.
pub fn find_config_file(environment_suffix: Option<&str>) -> Result<PathBuf> {
  let environment = environment_name(environment_suffix, |var| env::var(var).ok());
  find_config_file_in(Path::new("."), environment.as_deref())
}

// An explicit, non-empty name wins over the environment variables.
fn environment_name(
  explicit: Option<&str>,
  lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
  explicit
    .map(str::to_owned)
    .or_else(|| lookup("FIBRE_ENV"))
    .or_else(|| lookup("APP_ENV"))
    .filter(|name| !name.is_empty())
}

fn find_config_file_in(dir: &Path, environment: Option<&str>) -> Result<PathBuf> {
  let candidates: Vec<String> = environment
    .map(|env| format!("{DEFAULT_CONFIG_BASE_NAME}.{env}.{DEFAULT_CONFIG_EXTENSION}"))
    .into_iter()
    .chain([format!("{DEFAULT_CONFIG_BASE_NAME}.{DEFAULT_CONFIG_EXTENSION}")])
    .collect();

  candidates
    .iter()
    .map(|name| dir.join(name))
    .find(|path| path.is_file())
    .ok_or_else(|| {
      Error::ConfigNotFound(format!(
        "none of {:?} in {:?}; set FIBRE_ENV or APP_ENV to pick an environment",
        candidates, dir
      ))
    })
}
