//! Tests for the public facade.

use pretty_assertions::assert_eq;
use serde::Deserialize;
use yconf_rs::events::{Event, emit_to_string};
use yconf_rs::{Config, ConfigRoot, DumpOptions, Element, init_logging};
use yconf_rs_test_utils::{PET_YAML, pet_schema};

#[derive(Debug, Deserialize, PartialEq)]
struct Owner {
    name: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Pet {
    pet: String,
    legs: u32,
    names: Vec<String>,
    owner: Owner,
}

/// Logging can be initialised repeatedly.
#[test]
fn init_logging_is_idempotent() {
    init_logging();
    init_logging();
}

/// Validated documents decode into typed structs.
#[test]
fn validated_documents_decode() -> anyhow::Result<()> {
    init_logging();
    let config = Config::new(pet_schema())?;
    let pet: Pet = config.load_str(PET_YAML)?.deserialize()?;
    assert_eq!(
        pet,
        Pet {
            pet: "dog".to_string(),
            legs: 4,
            names: vec!["Fido".to_string(), "Rex".to_string()],
            owner: Owner {
                name: "Sam".to_string(),
                email: Some("sam@example.org".to_string()),
            },
        }
    );
    Ok(())
}

/// Root events can be post-processed before emission.
#[test]
fn events_are_exposed() -> anyhow::Result<()> {
    let config = Config::new(Element::keyed(vec![
        Element::string().named("name").with_default("demo"),
    ]))?
    .with_options(DumpOptions {
        show_comments: false,
        ..DumpOptions::default()
    });
    let mut events = config.to_events(None);
    events.insert(1, Event::comment("generated"));
    assert_eq!(emit_to_string(&events)?, "# generated\nname: demo\n");
    Ok(())
}
