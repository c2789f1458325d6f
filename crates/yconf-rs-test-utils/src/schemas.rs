use yconf_rs_config::{Element, Value};

/// `{a: required int, b: int = 5}`
pub fn keyed_ab() -> Element {
    Element::keyed(vec![
        Element::integer().named("a").required(),
        Element::integer().named("b").with_default(5),
    ])
}

/// A small schema touching every scalar kind and a nested keyed section.
pub fn pet_schema() -> Element {
    Element::keyed(vec![
        Element::string()
            .named("pet")
            .required()
            .choices(["cat", "dog", "squirrel"])
            .help("The kind of pet."),
        Element::integer()
            .named("legs")
            .with_default(4)
            .min(0.0)
            .max(8.0)
            .help("How many legs the pet has."),
        Element::float().named("weight").help("Weight in kilograms."),
        Element::boolean().named("indoor").with_default(true),
        Element::list(Element::string().help("Such as Fido."))
            .named("names")
            .help("Names the pet answers to."),
        Element::keyed(vec![
            Element::string().named("name"),
            Element::regex(r"[a-z0-9.]+@[a-z0-9.]+").named("email"),
            Element::path().named("home"),
        ])
        .named("owner")
        .help("Who looks after the pet."),
    ])
}

/// Lists of keyed cars, a defaulted category of garages and a derived total.
pub fn fleet_schema() -> Element {
    let car = Element::keyed(vec![
        Element::string()
            .named("color")
            .required()
            .choices(["red", "blue", "green"]),
        Element::string().named("make"),
        Element::integer().named("year").min(1886.0),
        Element::category(Element::string())
            .named("accessories")
            .help("Extra parts, by slot."),
    ]);
    Element::keyed(vec![
        Element::list(car)
            .named("cars")
            .min_length(1)
            .help("Every car in the fleet."),
        Element::defaulted_category(vec![
            Element::integer().named("spaces").required(),
            Element::string().named("door").with_default("roller"),
            Element::string().named("city"),
        ])
        .named("garages")
        .help("Garages keyed by name. The '_' entry sets defaults for the others."),
        Element::code().named("notes"),
        Element::derived(|siblings| {
            let count = siblings
                .get("cars")
                .and_then(Value::as_sequence)
                .map_or(0, Vec::len);
            i64::try_from(count)
                .map(Value::Int)
                .map_err(|err| err.to_string())
        })
        .named("car_count"),
    ])
}
