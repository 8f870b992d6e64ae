//! Configuration tests

use super::*;
use jvm_tuner_engine::{GcAffinity, GcType};
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(config.version, parsed.version);
    assert_eq!(config.gc_type, parsed.gc_type);
    assert_eq!(config.output.options, parsed.output.options);
}

#[test]
fn test_config_from_file() {
    let mut config = Config::default();
    config.gc_type = "CMS".to_string();
    config.heap.size = Some("12G".to_string());
    config.directives.exclude = Some("-XX:+UseG1GC".to_string());

    let temp_file = NamedTempFile::new().unwrap();
    config.save_to_file(temp_file.path()).unwrap();

    let loaded = Config::from_file(temp_file.path()).unwrap();
    assert_eq!(loaded.gc_type, "CMS");
    assert_eq!(loaded.heap.size.as_deref(), Some("12G"));
    assert_eq!(loaded.directives.exclude.as_deref(), Some("-XX:+UseG1GC"));
    assert_eq!(loaded.heap.new_size, None);
}

#[test]
fn test_minimal_yaml() {
    let yaml = r#"
version: "1.0"
gc_type: g1gc
output:
  options: /tmp/jvm-server.options
  version_options: /tmp/jvm8-server.options
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.gc().unwrap(), GcType::G1gc);
    assert!(config.templates.options.is_none());
    assert!(!config.output.active_only);
}

#[test]
fn test_config_validation() {
    assert!(Config::default().validate().is_ok());

    let mut config = Config::default();
    config.version = "2.0".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.gc_type = "ZGC".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("ZGC"));

    let mut config = Config::default();
    config.output.version_options = config.output.options.clone();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.templates.options = Some(PathBuf::new());
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.heap.size = Some("12 G".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_directives_from_config() {
    let mut config = Config::default();
    config.heap.new_size = Some("3G".to_string());
    config.heap.size = Some("12G".to_string());
    config.directives.upsert = Some("-Dsample".to_string());
    config.directives.inject = Some("-Da=1,2".to_string());

    let directives = config.directives();
    assert_eq!(directives.gc_type, "G1GC");
    assert_eq!(directives.heap_new_size.as_deref(), Some("3G"));
    assert_eq!(directives.heap_size.as_deref(), Some("12G"));
    assert_eq!(directives.upsert.as_deref(), Some("-Dsample"));
    assert_eq!(directives.inject.as_deref(), Some("-Da=1,2"));
    assert_eq!(directives.exclude, None);
}

#[test]
fn test_gc_rules_config() {
    let rules = GcRulesConfig {
        cms: vec![],
        g1gc: vec!["-XX:G1HeapRegionSize".to_string()],
    }
    .build();

    assert_eq!(
        rules.classify_name("-XX:G1HeapRegionSize"),
        GcAffinity::Collector(GcType::G1gc)
    );
    assert_eq!(
        rules.classify_name("-XX:+UseParNewGC"),
        GcAffinity::Collector(GcType::Cms)
    );
}
