//! Loading from and dumping to files.

use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;
use yconf_rs_config::{Config, ConfigError, ConfigRoot, Element, Value};
use yconf_rs_test_utils::{PET_YAML, pet_schema};

/// A dumped file loads back to the same document.
#[test]
fn dump_path_then_load_path() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("pet.yaml");
    let config = Config::new(pet_schema())?;
    let doc = config.load_str(PET_YAML)?;

    config.dump_path(Some(&doc), &path)?;
    assert_eq!(config.load_path(&path)?, doc);
    Ok(())
}

/// Dumping replaces existing file content.
#[test]
fn dump_path_truncates() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("port.yaml");
    fs::write(&path, "this text is much longer than the dump\n")?;
    let port = Element::integer().with_default(80);
    let root = port.as_root()?;

    root.dump_path(Some(&Value::Int(8080)), &path)?;
    assert_eq!(fs::read_to_string(&path)?, "8080\n");
    Ok(())
}

/// A template written to disk carries the schema documentation.
#[test]
fn template_file_is_commented() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("template.yaml");
    let config = Config::new(pet_schema())?;
    config.dump_path(None, &path)?;

    let text = fs::read_to_string(&path)?;
    assert!(text.starts_with("# PET(required str): The kind of pet.\n"));
    assert!(text.contains("\nlegs: 4\n"));
    Ok(())
}

/// Missing files surface as io errors.
#[test]
fn load_path_missing_file() {
    let dir = TempDir::new().expect("tempdir");
    let config = Config::new(pet_schema()).expect("schema");
    let err = config.load_path(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

/// Invalid file content fails without returning a partial document.
#[test]
fn load_path_invalid_content() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "pet: dog\nlegs: 12\n").expect("write");
    let config = Config::new(pet_schema()).expect("schema");
    let err = config.load_path(&path).unwrap_err();
    assert_eq!(err.path(), Some("legs"));
}
