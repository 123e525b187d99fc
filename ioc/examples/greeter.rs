use fibre_inject::{
  global, inject, AnnotatedFactory, Arguments, ClassDefinition, ConfigProvider, Container,
};
use serde_json::json;
use std::sync::Arc;

// --- Services ---

#[derive(Default)]
struct ConsoleMailer;

impl ConsoleMailer {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending to {}: '{}'", to, message)
  }
}

struct Greeter {
  name: String,
  mailer: Option<Arc<ConsoleMailer>>,
}

impl Greeter {
  fn greet(&self) -> String {
    let message = format!("Hello, {}!", self.name);
    match &self.mailer {
      Some(mailer) => mailer.send(&self.name, &message),
      None => message,
    }
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::TRACE)
    .init();

  // --- Registration ---
  global().register(
    ClassDefinition::without_constructor::<ConsoleMailer>("ConsoleMailer").build(),
  );
  global().register(
    ClassDefinition::with_constructor("Greeter", 1, |args: &Arguments| {
      Ok(Greeter {
        name: args.value(0)?,
        mailer: None,
      })
    })
    .inject(inject!["config.greeting.name"])
    .inject_method("set_mailer", inject!["ConsoleMailer"], |greeter: &mut Greeter, args| {
      greeter.mailer = Some(args.service(0)?);
      Ok(())
    })
    .build(),
  );

  let container = Container::new();
  container.add_instance("config", json!({ "greeting": { "name": "Ada" } }));
  ConfigProvider::new(AnnotatedFactory::global()).register(&container);

  // --- Resolution ---
  let greeter = container
    .resolve::<Greeter>("Greeter")
    .expect("Greeter should be buildable");

  let result = greeter.greet();
  println!("{}", result);
  assert_eq!(result, "Sending to Ada: 'Hello, Ada!'");
}
