//! # Fibre Inject
//!
//! An annotation-driven object factory for name-keyed service containers.
//!
//! Given a class name, [`AnnotatedFactory`] builds the class and injects the
//! services its [`Inject`] annotations ask for, first into the constructor and
//! then into every annotated public method. A service key is either a literal
//! name known to the [`ServiceLocator`], or a dotted path such as
//! `"config.name"` that reads key `name` out of the array-shaped `config`
//! service. Keys the locator does not know are built directly when they name
//! a registered class that needs no constructor arguments.
//!
//! ## Core Concepts
//!
//! - **ClassRegistry**: class names mapped to [`ClassDefinition`]s, standing in
//!   for runtime reflection. A global registry is reachable via `global()`.
//! - **ServiceLocator**: anything answering `has` and `get` by name, such as the
//!   bundled [`Container`].
//! - **AnnotationReader**: where annotations come from. Definitions carry their
//!   own, and [`ConfiguredAnnotationReader`] layers a YAML/JSON side table on top.
//! - **Array services**: a `serde_json::Value` registered as a service can be
//!   read with dotted keys.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_inject::{inject, AnnotatedFactory, ClassDefinition, ClassRegistry, Container};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct Greeter {
//!     name: String,
//! }
//!
//! let registry = Arc::new(ClassRegistry::new());
//! registry.register(
//!     ClassDefinition::with_constructor("Greeter", 1, |args| {
//!         Ok(Greeter { name: args.value(0)? })
//!     })
//!     .inject(inject!["config.name"])
//!     .build(),
//! );
//!
//! let container = Container::new();
//! container.add_instance("config", json!({ "name": "Ada" }));
//!
//! let factory = AnnotatedFactory::new(registry);
//! let greeter = factory.create::<Greeter>(&container, "Greeter").unwrap();
//! assert_eq!(greeter.name, "Ada");
//! ```

mod abstract_factory;
mod annotation;
mod arguments;
mod class;
pub mod config;
mod container;
mod core;
pub mod error;
mod factory;
mod global;
mod locator;
mod macros;
mod path;
mod registry;

pub use abstract_factory::{AbstractFactory, AnnotatedAbstractFactory, ConfigProvider};
pub use annotation::{
  AnnotationReader, ConfiguredAnnotationReader, DeclaredAnnotationReader, Inject,
};
pub use arguments::Arguments;
pub use class::{ClassBuilder, ClassDefinition, Instance, MethodDefinition};
pub use config::{find_config_file, AnnotationConfig, ClassAnnotations};
pub use container::Container;
pub use error::{Error, Result};
pub use factory::AnnotatedFactory;
pub use global::global;
pub use locator::{Service, ServiceLocator};
pub use registry::ClassRegistry;
