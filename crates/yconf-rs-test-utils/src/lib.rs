//! Fixture schemas and documents shared across yconf crates.

pub mod documents;
pub mod schemas;

pub use documents::{FLEET_YAML, PET_YAML};
pub use schemas::{fleet_schema, keyed_ab, pet_schema};
