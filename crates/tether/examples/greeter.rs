//! Example: a greeter controller bound to a small page

use tether::{Action, Actions, Context, Controller, Document, Event, Registry};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Greeter</title></head>
  <body>
    <div data-controller="greeter">
      <input data-greeter-target="name" value="World">
      <button data-action="click->greeter#sayHello">Greet</button>
      <span data-greeter-target="output"></span>
    </div>
  </body>
</html>"#;

#[derive(Default)]
struct Greeter {
    greetings: u32,
}

impl Greeter {
    fn say_hello(&mut self, action: Action<'_>) {
        self.greetings += 1;

        let tree = action.document.tree_mut();
        let name = action
            .context
            .target("name")
            .and_then(|input| tree.attribute(input, "value"))
            .unwrap_or("stranger")
            .to_string();

        tracing::info!("Hello, {}!", name);
        if let Some(output) = action.context.target("output") {
            tree.set_text_content(output, &format!("Hello, {}!", name));
        }
    }
}

impl Controller for Greeter {
    fn actions() -> Actions<Self> {
        Actions::new().with("sayHello", Self::say_hello)
    }

    fn connect(&mut self, context: &Context, _document: &mut Document) {
        tracing::info!("Greeter is ready! ({} target(s))", context.targets().len());
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let document = tether_html::parse(PAGE)?;
    println!("tether v{} loaded \"{}\"", tether::VERSION, document.title());

    let mut registry = Registry::new(document);
    let greeter = registry.register("greeter", |_| Greeter::default())?;
    for warning in greeter.warnings() {
        println!("warning: {}", warning);
    }

    let button = registry
        .document()
        .query_selector("button")
        .ok_or_else(|| anyhow::anyhow!("page has no button"))?;
    registry.dispatch(button, Event::click());

    let output = greeter
        .target("output")
        .map(|node| registry.document().tree().text_content(node))
        .unwrap_or_default();
    println!("output: {}", output);
    println!("greetings: {}", greeter.controller().greetings);

    Ok(())
}
