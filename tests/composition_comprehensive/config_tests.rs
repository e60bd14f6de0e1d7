//! Loading composer configuration from disk

use crate::common::*;
use tempfile::TempDir;
use tessera::{ContractDescriptor, MemberDescriptor, CONFIG_FILE_NAME};

trait Report: Send + Sync {}

fn report_contract() -> ContractDescriptor {
    ContractDescriptor::new(TypeRef::interface::<dyn Report>())
        .with_member(MemberDescriptor::property("clock", TypeRef::interface::<dyn Clock>()))
        .with_member(MemberDescriptor::property("title", TypeRef::concrete::<String>()))
}

#[test]
fn test_default_file_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    ComposerConfig::write_default_if_missing(&path).unwrap();
    let config = ComposerConfig::from_file(&path).unwrap();
    assert_eq!(config, ComposerConfig::default());
}

#[test]
fn test_lenient_file_allows_value_members() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "strict_members = false\n").unwrap();

    let config = ComposerConfig::from_file(&path).unwrap();
    assert!(!config.strict_members);
    assert!(config.cache_types);

    let (registry, _, _) = greeter_registry();
    let instance = isolated_composer(registry.clone(), config)
        .compose_descriptor(&report_contract())
        .unwrap();
    assert_eq!(instance.slot_names().collect::<Vec<_>>(), vec!["clock"]);

    let err = isolated_composer(registry, ComposerConfig::default())
        .compose_descriptor(&report_contract())
        .unwrap_err();
    assert!(matches!(err, ComposeError::IncompleteContract { .. }));
}

#[test]
fn test_uncached_config_synthesizes_fresh_layouts() {
    let (registry, _, _) = greeter_registry();
    let config = ComposerConfig {
        cache_types: false,
        ..ComposerConfig::default()
    };
    let composer = isolated_composer(registry, config);

    let a = composer.compose::<dyn Greeter>().unwrap();
    let b = composer.compose::<dyn Greeter>().unwrap();
    assert_ne!(addr(&a), addr(&b));
    assert!(composer.synthesizer().is_empty());
}

#[test]
fn test_malformed_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "strict_members = \"sometimes\"\n").unwrap();

    let err = ComposerConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ComposeError::Config(_)));
}
