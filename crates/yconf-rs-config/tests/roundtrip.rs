//! Load/dump behaviour of complete schemas.

use pretty_assertions::assert_eq;
use yconf_rs_config::{Config, ConfigError, ConfigRoot, DumpOptions, Element, Mapping, Value};
use yconf_rs_test_utils::{FLEET_YAML, PET_YAML, fleet_schema, keyed_ab, pet_schema};

fn map(entries: Vec<(&str, Value)>) -> Value {
    Value::Mapping(entries.into_iter().collect::<Mapping>())
}

fn option_sets() -> Vec<DumpOptions> {
    vec![
        DumpOptions::default(),
        DumpOptions {
            show_comments: false,
            ..DumpOptions::default()
        },
        DumpOptions {
            comment_width: 12,
            omit_defaults: true,
            ..DumpOptions::default()
        },
        DumpOptions {
            show_choices: false,
            comment_width: 1,
            ..DumpOptions::default()
        },
    ]
}

/// Dumping and reloading a validated document yields the same document.
fn assert_round_trip(config: &Config, doc: &Value) {
    for options in option_sets() {
        let config = config.clone().with_options(options.clone());
        let text = config.dump_to_string(Some(doc)).expect("dump");
        let reloaded = config.load_str(&text).expect("reload");
        assert_eq!(&reloaded, doc, "options {options:?}\n{text}");
    }
}

/// The pet fixture loads in declared order with defaults filled in.
#[test]
fn pet_document_loads() {
    let config = Config::new(pet_schema()).expect("schema");
    let doc = config.load_str(PET_YAML).expect("load");
    let expected = map(vec![
        ("pet", Value::from("dog")),
        ("legs", Value::Int(4)),
        ("weight", Value::Float(12.5)),
        ("indoor", Value::Bool(true)),
        ("names", Value::from(vec!["Fido", "Rex"])),
        (
            "owner",
            map(vec![
                ("name", Value::from("Sam")),
                ("email", Value::from("sam@example.org")),
                ("home", Value::Null),
            ]),
        ),
    ]);
    assert_eq!(doc, expected);
}

/// The dumped pet document is fully commented and in declared order.
#[test]
fn pet_document_dumps_with_comments() {
    let config = Config::new(pet_schema()).expect("schema");
    let doc = config.load_str(PET_YAML).expect("load");
    let text = config.dump_to_string(Some(&doc)).expect("dump");
    let expected = "\
# PET(required str): The kind of pet.
# Choices: cat, dog, squirrel
pet: dog
# LEGS(int): How many legs the pet has.
# Valid Range: 0 - 8
legs: 4
# WEIGHT(float): Weight in kilograms.
weight: 12.5
# INDOOR(bool)
indoor: true
# NAMES(list of items): Names the pet answers to.
# May contain 0 - inf items.
names:
  # (str): Such as Fido.
  - Fido
  - Rex
# OWNER(mapping): Who looks after the pet.
owner:
  # NAME(str)
  name: Sam
  # EMAIL(str)
  # Values must match: r'[a-z0-9.]+@[a-z0-9.]+'
  email: sam@example.org
  # HOME(path)
  home:
";
    assert_eq!(text, expected);
}

/// Documents survive dump and reload under every dump option combination.
#[test]
fn documents_round_trip() {
    let pets = Config::new(pet_schema()).expect("schema");
    assert_round_trip(&pets, &pets.load_str(PET_YAML).expect("pet"));

    let fleet = Config::new(fleet_schema()).expect("schema");
    assert_round_trip(&fleet, &fleet.load_str(FLEET_YAML).expect("fleet"));

    let ab = Config::new(keyed_ab()).expect("schema");
    assert_round_trip(&ab, &ab.load_str("a: -3\n").expect("ab"));
}

/// Strings that look like other scalars survive as strings.
#[test]
fn ambiguous_strings_round_trip() {
    let config = Config::new(pet_schema()).expect("schema");
    let mut doc = config.load_str(PET_YAML).expect("load");
    let names = [
        "true", "null", "~", "12", "1.5", "", " padded", "a: b", "# hash", "- dash", "multi\nline",
    ];
    *config.find_mut(&mut doc, "names").expect("names") = Value::from(names.to_vec());
    assert_round_trip(&config, &doc);
}

/// Defaulted categories, code blocks and derived values in one document.
#[test]
fn fleet_document_loads() {
    let config = Config::new(fleet_schema()).expect("schema");
    let doc = config.load_str(FLEET_YAML).expect("load");

    assert_eq!(config.find(&doc, "car_count").expect("count"), &Value::Int(2));
    assert_eq!(
        config.find(&doc, "notes").expect("notes"),
        &Value::from("first line\nsecond line\n")
    );
    assert_eq!(
        config.find(&doc, "garages").expect("garages"),
        &map(vec![
            (
                "north",
                map(vec![
                    ("spaces", Value::Int(2)),
                    ("door", Value::from("roller")),
                    ("city", Value::from("Ljubljana")),
                ]),
            ),
            (
                "south",
                map(vec![
                    ("spaces", Value::Int(4)),
                    ("door", Value::from("swing")),
                    ("city", Value::from("Ljubljana")),
                ]),
            ),
        ])
    );
    assert_eq!(
        config.find(&doc, "cars.1").expect("car"),
        &map(vec![
            ("color", Value::from("blue")),
            ("make", Value::Null),
            ("year", Value::Null),
            ("accessories", map(vec![])),
        ])
    );
    assert_eq!(
        config
            .find(&doc, "cars.0.accessories")
            .expect("accessories")
            .as_mapping()
            .expect("mapping")
            .keys()
            .collect::<Vec<_>>(),
        vec!["roof", "rear"]
    );
}

/// Derived values are never written out.
#[test]
fn derived_values_are_not_dumped() {
    let config = Config::new(fleet_schema()).expect("schema");
    let doc = config.load_str(FLEET_YAML).expect("load");
    let text = config.dump_to_string(Some(&doc)).expect("dump");
    assert!(!text.contains("car_count"));
    assert!(!text.contains("\n  _:"));
}

/// Validation failures inside nested structures name the full path.
#[test]
fn nested_failures_name_their_path() {
    let config = Config::new(fleet_schema()).expect("schema");
    let cases = [
        ("cars:\n  - color: pink\n", "cars.0.color"),
        ("cars:\n  - color: red\n    year: 1800\n", "cars.0.year"),
        ("cars:\n  - color: red\n  - {}\n", "cars.1.color"),
        ("cars: []\n", "cars"),
        ("cars:\n  - color: red\n    wheels: 3\n", "cars.0.wheels"),
        ("cars:\n  - color: red\ngarages:\n  east:\n    door: flap\n", "garages.east.spaces"),
    ];
    for (text, path) in cases {
        let err = config.load_str(text).unwrap_err();
        assert_eq!(err.path(), Some(path), "{text}: {err}");
    }
}

/// A template dump is valid structured text that validates partially.
#[test]
fn templates_parse_back() {
    for schema in [pet_schema(), fleet_schema(), keyed_ab()] {
        let config = Config::new(schema).expect("schema");
        let text = config.dump_to_string(None).expect("template");
        let raw = Value::from_yaml_str(&text).expect("parse");
        config.validate_partial(&raw).expect("partial");
    }
}

/// The template shows one placeholder item per list.
#[test]
fn template_lists_have_a_placeholder() {
    let config = Config::new(fleet_schema()).expect("schema");
    let raw = Value::from_yaml_str(&config.dump_to_string(None).expect("template"))
        .expect("parse");
    let cars = raw.get("cars").and_then(Value::as_sequence).expect("cars");
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].get("color"), Some(&Value::Null));
}

/// Required values missing from a template are reported on full load.
#[test]
fn templates_need_required_values() {
    let config = Config::new(pet_schema()).expect("schema");
    let text = config.dump_to_string(None).expect("template");
    let err = config.load_str(&text).unwrap_err();
    assert!(matches!(&err, ConfigError::MissingKey { path } if path == "pet"));
}

/// Unicode line separators and very long keys survive dump and reload.
#[test]
fn unusual_text_round_trips() {
    let strings = Config::new(Element::keyed(vec![Element::string().named("s")])).expect("schema");
    for text in ["a\u{85}b", "a\u{2028}b", "a\u{2029}b", "tail\u{2028}", "del\u{7f}"] {
        let doc = strings
            .validate(&map(vec![("s", Value::from(text))]))
            .expect("valid");
        assert_round_trip(&strings, &doc);
    }

    let counts = Config::new(Element::category(Element::integer())).expect("schema");
    let long = "k".repeat(1100);
    let doc = counts
        .validate(&map(vec![
            ("a\u{85}b", Value::Int(1)),
            ("c\u{2028}d", Value::Int(2)),
            (long.as_str(), Value::Int(3)),
            ("short", Value::Int(4)),
        ]))
        .expect("valid");
    assert_round_trip(&counts, &doc);
}

/// Numeric text is accepted where numbers are expected.
#[test]
fn numeric_strings_load_as_numbers() {
    let config = Config::new(Element::keyed(vec![
        Element::integer().named("port"),
        Element::float().named("ratio").min(0.0).max(1.0),
    ]))
    .expect("schema");
    let doc = config.load_str("port: \"8080\"\nratio: '0.5'\n").expect("load");
    assert_eq!(
        doc,
        map(vec![("port", Value::Int(8080)), ("ratio", Value::Float(0.5))])
    );

    let err = config.load_str("port: eighty\n").unwrap_err();
    assert!(matches!(&err, ConfigError::Validation { path, .. } if path == "port"));
    let err = config.load_str("ratio: .nan\n").unwrap_err();
    assert!(matches!(&err, ConfigError::Validation { path, .. } if path == "ratio"));
}
