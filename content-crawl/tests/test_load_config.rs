use content_crawl::load_config::{load_config, PROVIDER_ENV, SITES_ENV};
use content_crawl_core::content_type::ContentType;
use serial_test::serial;
use std::env;
use std::fs::write;
use tempfile::NamedTempFile;

const CONFIG_YAML: &str = r#"
provider: static
targets:
  - organisation: ACME
    type: post
    sites: [1, 2]
    pages:
      - url: https://acme.example/blog
        teasers:
          selector: div.post
          fields:
            title: { selector: h2 }
            publishedDate: { selector: time, expr: '(\d{4}-\d{2}-\d{2})', format: '$1' }
  - organisation: ACME
    type: job
    pages:
      - url: https://acme.example/careers
        articles:
          fields:
            location: { selector: span.where }
"#;

fn write_config(yaml: &str) -> NamedTempFile {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), yaml).unwrap();
    config_file
}

fn clear_env() {
    env::remove_var(PROVIDER_ENV);
    env::remove_var(SITES_ENV);
}

/// A valid config loads unchanged when no override variables are set.
#[test]
#[serial]
fn test_load_config_without_overrides() {
    clear_env();
    let config_file = write_config(CONFIG_YAML);

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.provider.as_deref(), Some("static"));
    assert_eq!(config.targets.len(), 2);
    let post = config.find("ACME", ContentType::Post).unwrap();
    assert_eq!(post.sites, vec![1, 2]);
    assert!(config.find("ACME", ContentType::Job).unwrap().sites.is_empty());
}

/// Environment variables replace the provider and narrow the site lists.
#[test]
#[serial]
fn test_load_config_applies_env_overrides() {
    clear_env();
    env::set_var(PROVIDER_ENV, "browser");
    env::set_var(SITES_ENV, "2, 5");
    let config_file = write_config(CONFIG_YAML);

    let config = load_config(config_file.path()).expect("Config should load");
    clear_env();

    assert_eq!(config.provider.as_deref(), Some("browser"));
    let post = config.find("ACME", ContentType::Post).unwrap();
    assert_eq!(post.sites, vec![2]);
    assert!(post.enabled);
    let job = config.find("ACME", ContentType::Job).unwrap();
    assert_eq!(job.sites, vec![2, 5]);
}

/// A malformed site list is reported rather than ignored.
#[test]
#[serial]
fn test_load_config_rejects_bad_sites_env() {
    clear_env();
    env::set_var(SITES_ENV, "1,north");
    let config_file = write_config(CONFIG_YAML);

    let err = load_config(config_file.path()).unwrap_err();
    clear_env();

    assert!(err.to_string().contains("north"), "got: {err}");
}

/// If the config file is not valid YAML, load_config errors and says so.
#[test]
#[serial]
fn test_load_config_errors_for_invalid_file() {
    clear_env();
    let config_file = write_config("not-yaml: [:::");

    let err = load_config(config_file.path()).unwrap_err();
    let msg = err.to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

/// Structurally invalid configs (here, a target with no pages) are rejected.
#[test]
#[serial]
fn test_load_config_errors_for_invalid_target() {
    clear_env();
    let config_file = write_config("targets:\n  - organisation: ACME\n    type: post\n");

    let err = load_config(config_file.path()).unwrap_err();
    assert!(err.to_string().contains("invalid"), "got: {err}");
}

#[test]
#[serial]
fn test_load_config_errors_for_missing_file() {
    clear_env();
    let err = load_config("does/not/exist.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read"), "got: {err}");
}
