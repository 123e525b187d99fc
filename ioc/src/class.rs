//! Class definitions: the metadata the factory walks to build an object by name.
//!
//! Rust has no runtime reflection, so a "class" is registered up front with
//! its constructor, the number of parameters that constructor requires, and
//! its public methods. Each of these may carry an [`Inject`] annotation.

use crate::annotation::Inject;
use crate::arguments::Arguments;
use crate::error::{Error, Result};
use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;

/// A freshly built, not yet shared object.
pub type Instance = Box<dyn Any + Send + Sync>;

type ConstructorFn = Box<dyn Fn(&Arguments) -> Result<Instance> + Send + Sync>;
type MethodFn = Box<dyn Fn(&mut (dyn Any + Send + Sync), &Arguments) -> Result<()> + Send + Sync>;

enum Constructor {
  /// The class declares no constructor and is built from its default value.
  Absent(ConstructorFn),
  Declared {
    required_parameters: usize,
    inject: Option<Inject>,
    build: ConstructorFn,
  },
}

/// A public method that can be invoked on a built instance.
pub struct MethodDefinition {
  name: String,
  inject: Option<Inject>,
  invoke: MethodFn,
}

impl MethodDefinition {
  pub fn name(&self) -> &str {
    &self.name
  }

  /// The annotation declared on this method, if any.
  pub fn inject(&self) -> Option<&Inject> {
    self.inject.as_ref()
  }

  pub fn invoke(&self, instance: &mut Instance, args: &Arguments) -> Result<()> {
    (self.invoke)(instance.as_mut(), args)
  }
}

impl fmt::Debug for MethodDefinition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MethodDefinition")
      .field("name", &self.name)
      .field("inject", &self.inject)
      .finish()
  }
}

/// Everything the factory needs to know about one constructible type.
pub struct ClassDefinition {
  name: String,
  type_name: &'static str,
  constructor: Constructor,
  methods: Vec<MethodDefinition>,
}

impl ClassDefinition {
  /// Starts a definition for a class that declares no constructor.
  pub fn without_constructor<T>(name: impl Into<String>) -> ClassBuilder<T>
  where
    T: Default + Any + Send + Sync,
  {
    ClassBuilder::new(
      name.into(),
      Constructor::Absent(Box::new(|_: &Arguments| Ok(Box::new(T::default()) as Instance))),
    )
  }

  /// Starts a definition for a class whose constructor takes positional
  /// arguments, `required_parameters` of which have no default.
  pub fn with_constructor<T, F>(
    name: impl Into<String>,
    required_parameters: usize,
    constructor: F,
  ) -> ClassBuilder<T>
  where
    T: Any + Send + Sync,
    F: Fn(&Arguments) -> Result<T> + Send + Sync + 'static,
  {
    ClassBuilder::new(
      name.into(),
      Constructor::Declared {
        required_parameters,
        inject: None,
        build: Box::new(move |args: &Arguments| {
          constructor(args).map(|v| Box::new(v) as Instance)
        }),
      },
    )
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// The Rust type this class builds.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub fn has_constructor(&self) -> bool {
    matches!(self.constructor, Constructor::Declared { .. })
  }

  /// Parameters the constructor cannot do without. Zero when there is no
  /// constructor.
  pub fn required_parameters(&self) -> usize {
    match &self.constructor {
      Constructor::Absent(_) => 0,
      Constructor::Declared {
        required_parameters,
        ..
      } => *required_parameters,
    }
  }

  /// The annotation declared on the constructor, if there is one.
  pub fn constructor_inject(&self) -> Option<&Inject> {
    match &self.constructor {
      Constructor::Absent(_) => None,
      Constructor::Declared { inject, .. } => inject.as_ref(),
    }
  }

  pub fn instantiable_without_arguments(&self) -> bool {
    self.required_parameters() == 0
  }

  /// Runs the constructor with `args`.
  pub fn instantiate(&self, args: &Arguments) -> Result<Instance> {
    match &self.constructor {
      Constructor::Absent(build) | Constructor::Declared { build, .. } => build(args),
    }
  }

  /// Public methods in declaration order.
  pub fn methods(&self) -> &[MethodDefinition] {
    &self.methods
  }

  pub fn method(&self, name: &str) -> Option<&MethodDefinition> {
    self.methods.iter().find(|m| m.name == name)
  }
}

impl fmt::Debug for ClassDefinition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ClassDefinition")
      .field("name", &self.name)
      .field("type_name", &self.type_name)
      .field("has_constructor", &self.has_constructor())
      .field("required_parameters", &self.required_parameters())
      .field("constructor_inject", &self.constructor_inject())
      .field("methods", &self.methods)
      .finish()
  }
}

/// Builder returned by [`ClassDefinition::without_constructor`] and
/// [`ClassDefinition::with_constructor`].
pub struct ClassBuilder<T> {
  name: String,
  constructor: Constructor,
  methods: Vec<MethodDefinition>,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ClassBuilder<T> {
  fn new(name: String, constructor: Constructor) -> Self {
    Self {
      name,
      constructor,
      methods: Vec::new(),
      _marker: PhantomData,
    }
  }

  /// Annotates the constructor. Has no effect on a class without one.
  pub fn inject(mut self, annotation: Inject) -> Self {
    if let Constructor::Declared { inject, .. } = &mut self.constructor {
      *inject = Some(annotation);
    }
    self
  }

  /// Adds a public method without an annotation. The factory never calls it,
  /// but a configured reader may annotate it by name.
  pub fn method<F>(self, name: impl Into<String>, method: F) -> Self
  where
    F: Fn(&mut T, &Arguments) -> Result<()> + Send + Sync + 'static,
  {
    self.push_method(name.into(), None, method)
  }

  /// Adds a public method the factory invokes right after construction.
  pub fn inject_method<F>(self, name: impl Into<String>, annotation: Inject, method: F) -> Self
  where
    F: Fn(&mut T, &Arguments) -> Result<()> + Send + Sync + 'static,
  {
    self.push_method(name.into(), Some(annotation), method)
  }

  fn push_method<F>(mut self, name: String, inject: Option<Inject>, method: F) -> Self
  where
    F: Fn(&mut T, &Arguments) -> Result<()> + Send + Sync + 'static,
  {
    let method_name = name.clone();
    let invoke: MethodFn = Box::new(
      move |instance: &mut (dyn Any + Send + Sync), args: &Arguments| {
        let target = instance.downcast_mut::<T>().ok_or_else(|| {
          Error::Internal(format!(
            "method '{}' invoked on an instance that is not a {}",
            method_name,
            type_name::<T>()
          ))
        })?;
        method(target, args)
      },
    );
    self.methods.push(MethodDefinition {
      name,
      inject,
      invoke,
    });
    self
  }

  pub fn build(self) -> ClassDefinition {
    ClassDefinition {
      name: self.name,
      type_name: type_name::<T>(),
      constructor: self.constructor,
      methods: self.methods,
    }
  }
}
