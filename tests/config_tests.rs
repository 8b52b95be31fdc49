use std::io::Write;
use tempfile::NamedTempFile;

use revmetrics::error::MetricsError;
use revmetrics::util::config::AppConfig;

#[test]
fn test_load_full_config() {
    let toml = r#"
[bitbucket]
base_url = "https://git.example.com/"
project = "PLAT"
repos = ["widgets", "gadgets"]
token = "s3cret"

[output]
dir = "/var/lib/revmetrics"
"#;
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert_eq!(config.bitbucket.base_url, "https://git.example.com/");
    assert_eq!(config.bitbucket.project, "PLAT");
    assert_eq!(config.bitbucket.repos, vec!["widgets", "gadgets"]);
    assert_eq!(config.bitbucket.token.as_deref(), Some("s3cret"));
    assert_eq!(config.output.dir.to_str(), Some("/var/lib/revmetrics"));
}

#[test]
fn test_output_dir_defaults_to_cwd() {
    let toml = r#"
[bitbucket]
base_url = "https://git.example.com"
project = "PLAT"
repos = ["widgets"]
"#;
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert_eq!(config.output.dir.to_str(), Some("."));
}

#[test]
fn test_empty_repo_list_rejected() {
    let toml = r#"
[bitbucket]
base_url = "https://git.example.com"
project = "PLAT"
repos = []
"#;
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();

    let err = AppConfig::load(Some(f.path())).unwrap_err();
    assert!(matches!(err, MetricsError::Config(_)));
}

#[test]
fn test_missing_project_rejected() {
    let toml = r#"
[bitbucket]
base_url = "https://git.example.com"
repos = ["widgets"]
"#;
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();

    let err = AppConfig::load(Some(f.path())).unwrap_err();
    assert!(matches!(err, MetricsError::ConfigParse { .. }));
}

#[test]
fn test_unparseable_config_rejected() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"not really toml [[[").unwrap();

    let err = AppConfig::load(Some(f.path())).unwrap_err();
    assert!(matches!(err, MetricsError::ConfigParse { .. }));
}

#[test]
fn test_missing_file_rejected() {
    let err = AppConfig::load(Some(std::path::Path::new("/nonexistent/revmetrics.toml")))
        .unwrap_err();
    assert!(matches!(err, MetricsError::ConfigRead { .. }));
}

#[test]
fn test_token_resolved_from_config() {
    let toml = r#"
[bitbucket]
base_url = "https://git.example.com"
project = "PLAT"
repos = ["widgets"]
token = "abc123"
"#;
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert_eq!(config.resolve_token().unwrap(), "abc123");
}
