use std::io::Write;

use super::*;

#[test]
fn defaults_are_valid() {
    ExtractionRules::default().validate().unwrap();
}

#[test]
fn default_fallback_column_is_twenty() {
    assert_eq!(ExtractionRules::default().usage.fallback_column, 20);
}

#[test]
fn empty_document_yields_defaults() {
    let rules = parse_rules("{}").unwrap();
    assert_eq!(rules, ExtractionRules::default());
}

#[test]
fn partial_section_keeps_other_defaults() {
    let yaml = r"
usage:
  fallback_column: 18
roles:
  usage_file_pattern: shiyou
";
    let rules = parse_rules(yaml).unwrap();
    assert_eq!(rules.usage.fallback_column, 18);
    assert_eq!(rules.usage.name_labels, vec!["薬品名", "商品名"]);
    assert_eq!(rules.roles.usage_file_pattern, "shiyou");
    assert_eq!(rules.roles.deadstock_file_pattern, "hudoaddlist");
    assert_eq!(rules.deadstock, DeadstockRules::default());
}

#[test]
fn rejects_empty_name_labels() {
    let yaml = "usage:\n  name_labels: []\n";
    let err = parse_rules(yaml).unwrap_err();
    assert!(
        matches!(err, ConfigError::Validation(ref msg) if msg.contains("usage.name_labels")),
        "unexpected error: {err:?}"
    );
}

#[test]
fn rejects_blank_label() {
    let yaml = "deadstock:\n  name_labels: ['  ']\n";
    let err = parse_rules(yaml).unwrap_err();
    assert!(err.to_string().contains("blank label"));
}

#[test]
fn rejects_zero_scan_rows() {
    let yaml = "usage:\n  store_scan_rows: 0\n";
    let err = parse_rules(yaml).unwrap_err();
    assert!(err.to_string().contains("store_scan_rows"));
}

#[test]
fn rejects_identical_role_patterns() {
    let yaml = "roles:\n  deadstock_file_pattern: List\n  usage_file_pattern: list\n";
    let err = parse_rules(yaml).unwrap_err();
    assert!(err.to_string().contains("must differ"));
}

#[test]
fn rejects_malformed_yaml() {
    let err = parse_rules("usage: [unclosed").unwrap_err();
    assert!(matches!(err, ConfigError::RulesFileParse(_)));
}

#[test]
fn load_rules_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "usage:\n  fallback_column: 7").unwrap();
    let rules = load_rules(file.path()).unwrap();
    assert_eq!(rules.usage.fallback_column, 7);
}

#[test]
fn load_rules_missing_file_is_io_error() {
    let err = load_rules(Path::new("/nonexistent/stockmatch-rules.yaml")).unwrap_err();
    assert!(
        matches!(err, ConfigError::RulesFileIo { ref path, .. } if path.contains("stockmatch-rules")),
        "unexpected error: {err:?}"
    );
}

#[test]
fn example_rules_file_matches_defaults() {
    let rules = parse_rules(include_str!("../../../config/rules.example.yaml")).unwrap();
    assert_eq!(rules, ExtractionRules::default());
}
