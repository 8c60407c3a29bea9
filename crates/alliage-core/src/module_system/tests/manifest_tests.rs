use std::path::Path;

use tempfile::tempdir;

use crate::module_system::{DefinitionFormat, ModuleDefinition, ModuleSystemError, ModulesDefinition};

#[test]
fn test_format_from_path() {
    assert_eq!(DefinitionFormat::from_path(Path::new("alliage-modules.json")), Some(DefinitionFormat::Json));
    assert_eq!(DefinitionFormat::from_path(Path::new("modules.TOML")), Some(DefinitionFormat::Toml));
    assert_eq!(DefinitionFormat::from_path(Path::new("modules.yml")), Some(DefinitionFormat::Yaml));
    assert_eq!(DefinitionFormat::from_path(Path::new("modules.ini")), None);
    assert_eq!(DefinitionFormat::from_path(Path::new("modules")), None);
    assert_eq!(DefinitionFormat::Toml.extension(), "toml");
}

#[test]
fn test_parse_json() {
    let content = r#"{
        "module1": { "module": "./relative/path/1", "deps": ["module2"], "envs": ["dev"] },
        "module2": { "module": "global-module", "deps": [] }
    }"#;

    let definitions = ModulesDefinition::parse(content, DefinitionFormat::Json).unwrap();

    assert_eq!(definitions.len(), 2);
    assert_eq!(
        definitions.get("module1"),
        Some(&ModuleDefinition {
            module: "./relative/path/1".to_string(),
            deps: vec!["module2".to_string()],
            envs: vec!["dev".to_string()],
        })
    );
    // Missing `envs` means every environment
    assert!(definitions.get("module2").unwrap().envs.is_empty());
}

#[test]
fn test_parse_toml() {
    let content = r#"
        [logging]
        module = "core-logging"

        [environment]
        module = "core-environment"
        deps = ["logging"]
        envs = ["dev", "production"]
    "#;

    let definitions = ModulesDefinition::parse(content, DefinitionFormat::Toml).unwrap();

    let names: Vec<&str> = definitions.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["logging", "environment"]);
    let environment = definitions.get("environment").unwrap();
    assert_eq!(environment.deps, vec!["logging"]);
    assert_eq!(environment.envs, vec!["dev", "production"]);
    assert!(definitions.get("logging").unwrap().deps.is_empty());
}

#[test]
fn test_parse_keeps_declaration_order() {
    let json = r#"{ "zeta": { "module": "z" }, "alpha": { "module": "a" }, "mid": { "module": "m" } }"#;
    let yaml = "zeta:\n  module: z\nalpha:\n  module: a\nmid:\n  module: m\n";
    let toml_content = "[zeta]\nmodule = \"z\"\n[alpha]\nmodule = \"a\"\n[mid]\nmodule = \"m\"\n";

    for (content, format) in [
        (json, DefinitionFormat::Json),
        (yaml, DefinitionFormat::Yaml),
        (toml_content, DefinitionFormat::Toml),
    ] {
        let definitions = ModulesDefinition::parse(content, format).unwrap();
        let names: Vec<&str> = definitions.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"], "wrong order for {:?}", format);
    }
}

#[test]
fn test_insert_replaces_in_place() {
    let mut definitions = ModulesDefinition::new();
    definitions
        .insert("first", ModuleDefinition::new("a"))
        .insert("second", ModuleDefinition::new("b"))
        .insert("first", ModuleDefinition::new("c"));

    let entries: Vec<(&str, &str)> = definitions.iter().map(|(name, def)| (name, def.module.as_str())).collect();
    assert_eq!(entries, vec![("first", "c"), ("second", "b")]);
}

#[test]
fn test_parse_yaml() {
    let content = "logging:\n  module: core-logging\n  envs: [dev]\n";
    let definitions = ModulesDefinition::parse(content, DefinitionFormat::Yaml).unwrap();
    assert_eq!(definitions.get("logging").unwrap().envs, vec!["dev"]);
}

#[test]
fn test_parse_rejects_missing_module_reference() {
    let err = ModulesDefinition::parse(r#"{ "broken": { "deps": [] } }"#, DefinitionFormat::Json).unwrap_err();
    assert!(matches!(err, ModuleSystemError::DeserializationError { ref format, .. } if format == "JSON"));
}

#[tokio::test]
async fn test_load_from_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("alliage-modules.toml");
    std::fs::write(&path, "[solo]\nmodule = \"solo-module\"\n").expect("Failed to write definitions");

    let definitions = ModulesDefinition::load(&path).await.unwrap();
    assert_eq!(definitions.get("solo").map(|d| d.module.as_str()), Some("solo-module"));
}

#[tokio::test]
async fn test_load_missing_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("missing.json");

    let err = ModulesDefinition::load(&path).await.unwrap_err();
    assert!(matches!(err, ModuleSystemError::DefinitionsNotFound(ref p) if p == &path));
}

#[tokio::test]
async fn test_load_unsupported_extension() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("modules.ini");
    std::fs::write(&path, "").expect("Failed to write file");

    let err = ModulesDefinition::load(&path).await.unwrap_err();
    assert!(matches!(err, ModuleSystemError::UnsupportedDefinitionsFormat(_)));
}
