#![allow(clippy::unwrap_used)]

use super::*;
use std::io::Write;

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.year, 2022);
    assert_eq!(config.on_error, ErrorPolicy::FailFast);
    assert_eq!(config.rules.government_marker, "CANADA ");
    assert_eq!(config.keyword_set("uber").unwrap(), ["UBER".to_string()]);
    assert_eq!(config.keyword_sets.len(), 8);
}

#[test]
fn test_empty_object_is_default() {
    let file = config_file("{}");
    assert_eq!(Config::from_file(file.path()).unwrap(), Config::default());
}

#[test]
fn test_partial_override() {
    let file = config_file(
        r#"{
            "year": 2023,
            "on_error": "skip-file",
            "rules": { "income_markers": ["PAYROLL"] },
            "keyword_sets": { "coffee": ["TIM HORTONS", "STARBUCKS"] }
        }"#,
    );
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.year, 2023);
    assert_eq!(config.on_error, ErrorPolicy::SkipFile);
    assert_eq!(config.rules.income_markers, vec!["PAYROLL".to_string()]);
    // Unset rule fields keep their defaults
    assert_eq!(config.rules.government_marker, "CANADA ");
    assert_eq!(config.keyword_set("coffee").unwrap().len(), 2);
    // A given map replaces the built-in sets
    assert!(config.keyword_set("uber").is_err());
}

#[test]
fn test_invalid_json() {
    let file = config_file("{ year: ");
    let err = Config::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_unknown_policy_rejected() {
    let file = config_file(r#"{ "on_error": "ignore" }"#);
    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_load_explicit_missing_file() {
    let err = Config::load(Some(Path::new("/nonexistent/spendtrail.json"))).unwrap_err();
    assert!(err.to_string().contains("Failed to open config file"));
}

#[test]
fn test_unknown_keyword_set() {
    let err = Config::default().keyword_set("yachts").unwrap_err();
    assert!(err.to_string().contains("yachts"));
}
