//! Tests for config functionality.

use crate::condition::{ConditionContext, GateDecision};
use crate::config::types::DEFAULT_CONFIG_FILE_PATHS;
use crate::config::{
    resolve_config_path, Config, CoverageConfig, DatastoreConfig, GithubDatastoreConfig,
};
use crate::env::EnvSnapshot;
use crate::error::ConfigError;
use crate::event::GithubEvent;
use chrono::{TimeZone, Utc};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn empty_ctx() -> ConditionContext {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    ConditionContext::new(now, &GithubEvent::default(), &EnvSnapshot::default())
}

#[test]
fn test_candidate_file_names() {
    assert_eq!(DEFAULT_CONFIG_FILE_PATHS, [".octocov.yml", "octocov.yml"]);
}

#[test]
fn test_empty_working_directory_loads_nothing() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::new(dir.path());
    config.load(None).unwrap();

    assert!(!config.loaded());
    assert_eq!(config.config_path(), None);
    assert_eq!(config.coverage.path, dir.path().to_string_lossy());
    assert_eq!(config.root(), dir.path());
}

#[test]
fn test_duplicate_candidates_are_rejected() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".octocov.yml", "repository: a/b\n");
    write(dir.path(), "octocov.yml", "repository: c/d\n");

    let mut config = Config::new(dir.path());
    let err = config.load(None).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateConfig { .. }));
    assert_eq!(
        err.to_string(),
        "duplicate config file [.octocov.yml, octocov.yml]"
    );
}

#[test]
fn test_explicit_path_skips_candidate_scan() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".octocov.yml", "repository: a/b\n");
    write(dir.path(), "octocov.yml", "repository: c/d\n");
    write(dir.path(), "custom.yml", "repository: e/f\n");

    let mut config = Config::new(dir.path());
    config.load(Some(Path::new("custom.yml"))).unwrap();
    assert!(config.loaded());
    assert_eq!(config.repository, "e/f");
    assert_eq!(config.config_path(), Some(dir.path().join("custom.yml").as_path()));
}

#[test]
fn test_absolute_explicit_path_replaces_working_directory() {
    let wd = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    write(wd.path(), ".octocov.yml", "repository: a/b\n");
    write(elsewhere.path(), "shared.yml", "repository: c/d\n");
    let shared = elsewhere.path().join("shared.yml");

    let resolved = resolve_config_path(wd.path(), Some(&shared)).unwrap();
    assert_eq!(resolved, Some(shared.clone()));

    let mut config = Config::new(wd.path());
    config.load(Some(&shared)).unwrap();
    assert_eq!(config.repository, "c/d");
    assert_eq!(config.root(), elsewhere.path().to_path_buf());
}

#[test]
fn test_directory_candidate_is_ignored() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".octocov.yml")).unwrap();
    write(dir.path(), "octocov.yml", "repository: a/b\n");

    let resolved = resolve_config_path(dir.path(), None).unwrap();
    assert_eq!(resolved, Some(dir.path().join("octocov.yml")));
}

#[test]
fn test_empty_explicit_path_scans_candidates() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".octocov.yml", "");

    let resolved = resolve_config_path(dir.path(), Some(Path::new(""))).unwrap();
    assert_eq!(resolved, Some(dir.path().join(".octocov.yml")));
}

#[test]
fn test_coverage_path_defaults_to_config_directory() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("ci");
    fs::create_dir(&sub).unwrap();
    write(&sub, "octocov.yml", "repository: acme/widgets\n");

    let mut config = Config::new(dir.path());
    config.load(Some(Path::new("ci/octocov.yml"))).unwrap();
    assert_eq!(config.coverage.path, sub.to_string_lossy());
    assert_eq!(config.root(), sub);
    assert_eq!(config.wd(), dir.path());
}

#[test]
fn test_coverage_path_from_document_is_kept() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "octocov.yml", "coverage:\n  path: coverage/lcov.info\n");

    let mut config = Config::new(dir.path());
    config.load(None).unwrap();
    assert_eq!(config.coverage.path, "coverage/lcov.info");
}

#[test]
fn test_missing_explicit_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::new(dir.path());
    let err = config.load(Some(Path::new("nope.yml"))).unwrap_err();
    let ConfigError::Io(inner) = err else {
        panic!("expected I/O error, got {:?}", err);
    };
    assert_eq!(inner.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn test_malformed_document_is_parse_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "octocov.yml", "coverage: [unclosed\n");

    let mut config = Config::new(dir.path());
    let err = config.load(None).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_parse_full_document() {
    let yaml = r#"
repository: acme/widgets
coverage:
  path: coverage.out
  badge:
    path: docs/coverage.svg
  acceptable: 60%
codeToTestRatio:
  code:
    - "**/*.go"
    - "!**/*_test.go"
  test:
    - "**/*_test.go"
  badge:
    path: docs/ratio.svg
datastore:
  if: github.event_name == 'push'
  github:
    repository: acme/reports
    branch: main
    path: reports/report.json
central:
  enable: true
  root: .
  reports: reports
  badges: badges
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.repository, "acme/widgets");
    assert_eq!(config.coverage.path, "coverage.out");
    assert_eq!(config.coverage.badge.path, "docs/coverage.svg");
    assert_eq!(config.coverage.acceptable.as_deref(), Some("60%"));

    let ratio = config.code_to_test_ratio.as_ref().unwrap();
    assert_eq!(ratio.code, vec!["**/*.go", "!**/*_test.go"]);
    assert_eq!(ratio.test, vec!["**/*_test.go"]);
    assert_eq!(ratio.badge.path, "docs/ratio.svg");

    let datastore = config.datastore.as_ref().unwrap();
    assert_eq!(
        datastore.condition.as_deref(),
        Some("github.event_name == 'push'")
    );
    let github = datastore.github.as_ref().unwrap();
    assert_eq!(github.repository, "acme/reports");
    assert_eq!(github.branch, "main");
    assert_eq!(github.path, "reports/report.json");

    let central = config.central.as_ref().unwrap();
    assert!(central.enable);
    assert_eq!(central.root, ".");
}

#[test]
fn test_numeric_acceptable() {
    let config = Config::from_yaml("coverage:\n  acceptable: 75\n").unwrap();
    assert_eq!(config.coverage.acceptable.as_deref(), Some("75"));
    assert!(config.acceptable(&75.0).is_ok());
}

#[test]
fn test_unknown_fields_are_ignored() {
    let config = Config::from_yaml("repository: a/b\nreport:\n  foo: 1\n").unwrap();
    assert_eq!(config.repository, "a/b");
}

#[test]
fn test_null_patterns_become_empty() {
    let config = Config::from_yaml("codeToTestRatio:\n  code:\n  test: ~\n").unwrap();
    let ratio = config.code_to_test_ratio.unwrap();
    assert!(ratio.code.is_empty());
    assert!(ratio.test.is_empty());
}

#[test]
fn test_null_coverage_section_uses_defaults() {
    for doc in ["coverage:\n", "coverage: ~\n", "coverage: null\n"] {
        let config = Config::from_yaml(doc).unwrap();
        assert_eq!(config.coverage, CoverageConfig::default(), "document {:?}", doc);
    }
}

#[test]
fn test_null_coverage_section_still_defaults_path_on_load() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".octocov.yml", "coverage: ~\n");

    let mut config = Config::new(dir.path());
    config.load(None).unwrap();
    assert_eq!(config.coverage.path, dir.path().to_string_lossy());
}

#[test]
fn test_repository_defaults_from_environment() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "octocov.yml", "repository: \"\"\n");
    let env = EnvSnapshot::from_pairs([("GITHUB_REPOSITORY", "acme/widgets")]);

    let mut config = Config::new(dir.path());
    config.load(None).unwrap();
    config.build(&env);
    assert_eq!(config.repository, "acme/widgets");
}

#[test]
fn test_repository_expanding_to_empty_defaults_from_environment() {
    let env = EnvSnapshot::from_pairs([("GITHUB_REPOSITORY", "acme/widgets")]);
    let mut config = Config::from_yaml("repository: $UNSET_REPO\n").unwrap();
    config.build(&env);
    assert_eq!(config.repository, "acme/widgets");
}

#[test]
fn test_build_expands_string_fields() {
    let yaml = r#"
repository: ${OWNER}/widgets
coverage:
  badge:
    path: $BADGES/coverage.svg
datastore:
  if: env.OWNER == 'acme'
  github:
    repository: $OWNER/reports
    branch: $BRANCH
    path: ${OWNER}/report.json
central:
  root: $ROOT
  reports: $ROOT/reports
  badges: $ROOT/badges
"#;
    let env = EnvSnapshot::from_pairs([
        ("OWNER", "acme"),
        ("BADGES", "docs"),
        ("BRANCH", "trunk"),
        ("ROOT", "/srv/central"),
    ]);
    let mut config = Config::from_yaml(yaml).unwrap();
    config.build(&env);

    assert_eq!(config.repository, "acme/widgets");
    assert_eq!(config.coverage.badge.path, "docs/coverage.svg");

    let datastore = config.datastore.as_ref().unwrap();
    assert_eq!(datastore.condition.as_deref(), Some("env.OWNER == 'acme'"));
    let github = datastore.github.as_ref().unwrap();
    assert_eq!(github.repository, "acme/reports");
    assert_eq!(github.branch, "trunk");
    assert_eq!(github.path, "acme/report.json");

    let central = config.central.as_ref().unwrap();
    assert_eq!(central.root, "/srv/central");
    assert_eq!(central.reports, "/srv/central/reports");
    assert_eq!(central.badges, "/srv/central/badges");
}

#[test]
fn test_build_is_idempotent() {
    let env = EnvSnapshot::from_pairs([("GITHUB_REPOSITORY", "acme/widgets"), ("X", "x")]);
    let mut config = Config::from_yaml("coverage:\n  badge:\n    path: $X.svg\n").unwrap();
    config.build(&env);
    let once = config.clone();
    config.build(&env);
    assert_eq!(config, once);
}

#[test]
fn test_build_without_optional_sections() {
    let mut config = Config::new("/work");
    config.build(&EnvSnapshot::default());
    assert_eq!(config.repository, "");
    assert!(config.datastore.is_none());
    assert!(config.central.is_none());
    assert!(config.code_to_test_ratio.is_none());
}

#[test]
fn test_readiness_predicates() {
    let mut config = Config::from_yaml(
        "coverage:\n  badge:\n    path: cov.svg\ncodeToTestRatio:\n  code: ['**/*.rs']\n",
    )
    .unwrap();
    assert!(config.coverage_badge_ready());
    assert!(!config.code_to_test_ratio_ready());
    assert!(!config.code_to_test_ratio_badge_ready());
    assert!(!config.central_ready());

    let ratio = config.code_to_test_ratio.as_mut().unwrap();
    ratio.test = vec!["tests/**".to_string()];
    assert!(config.code_to_test_ratio_ready());
    assert!(!config.code_to_test_ratio_badge_ready());

    config.code_to_test_ratio.as_mut().unwrap().badge.path = "ratio.svg".to_string();
    assert!(config.code_to_test_ratio_badge_ready());
}

#[test]
fn test_datastore_gate() {
    let mut config = Config::new("/work");
    assert_eq!(config.datastore_gate(&empty_ctx()), None);
    assert!(!config.datastore_ready(&empty_ctx()));

    config.datastore = Some(DatastoreConfig {
        condition: None,
        github: Some(GithubDatastoreConfig::default()),
    });
    assert_eq!(
        config.datastore_gate(&empty_ctx()),
        Some(GateDecision::Proceed)
    );
    assert!(config.datastore_ready(&empty_ctx()));

    config.datastore.as_mut().unwrap().condition = Some("1 == 2".to_string());
    assert!(matches!(
        config.datastore_gate(&empty_ctx()),
        Some(GateDecision::Skip { .. })
    ));
    assert!(!config.datastore_ready(&empty_ctx()));

    config.datastore.as_mut().unwrap().condition = Some("year == 2024".to_string());
    assert!(config.datastore_ready(&empty_ctx()));
}

#[test]
fn test_load_build_and_validate_datastore() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        ".octocov.yml",
        "datastore:\n  github:\n    repository: acme/reports\n",
    );
    let env = EnvSnapshot::from_pairs([("GITHUB_REPOSITORY", "acme/widgets")]);

    let mut config = Config::new(dir.path());
    config.load(None).unwrap();
    config.build(&env);
    let datastore = config.build_datastore().unwrap();
    let github = datastore.github.unwrap();
    assert_eq!(github.branch, "main");
    assert_eq!(github.path, "reports/acme/widgets/report.json");
}

#[test]
fn test_to_yaml_skips_runtime_fields() {
    let mut config = Config::new("/work");
    config.repository = "acme/widgets".to_string();
    let yaml = config.to_yaml().unwrap();
    assert!(yaml.contains("repository: acme/widgets"));
    assert!(!yaml.contains("/work"));

    let parsed = Config::from_yaml(&yaml).unwrap();
    assert_eq!(parsed.repository, "acme/widgets");
}

#[test]
fn test_set_wd_changes_search_directory() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "octocov.yml", "repository: acme/widgets\n");

    let mut config = Config::new("/nonexistent");
    config.set_wd(dir.path());
    config.load(None).unwrap();
    assert!(config.loaded());
    assert_eq!(config.repository, "acme/widgets");
}
