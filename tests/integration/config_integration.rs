//! Integration tests for layered configuration loading

use super::test_utils::with_xdg_env;
use sphere_viewer::cli::RunContext;
use sphere_viewer::config::{global_config_path, ConfigLoader};
use std::fs;
use tempfile::TempDir;

fn write_global_config(test_dir: &TempDir, contents: &str) {
    let dir = test_dir.path().join("sphere-viewer");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_global_config_path_follows_xdg_config_home() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = global_config_path().unwrap();
        assert_eq!(
            path,
            test_dir.path().join("sphere-viewer").join("config.toml")
        );
    });
}

#[test]
fn test_global_config_is_loaded() {
    let test_dir = TempDir::new().unwrap();
    let project_dir = TempDir::new().unwrap();
    write_global_config(
        &test_dir,
        r#"
[gateway]
origin = "http://127.0.0.1:5001"
key = "global-key"

[logging]
level = "info"
"#,
    );

    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(project_dir.path(), None).unwrap();
        assert_eq!(
            config.gateway.origin.as_deref(),
            Some("http://127.0.0.1:5001")
        );
        assert_eq!(config.gateway.key, "global-key");
        assert_eq!(config.logging.level, "info");
    });
}

#[test]
fn test_project_config_overrides_global() {
    let test_dir = TempDir::new().unwrap();
    let project_dir = TempDir::new().unwrap();
    write_global_config(
        &test_dir,
        "[gateway]\nkey = \"global-key\"\nrequest_timeout_secs = 90\n",
    );
    fs::write(
        project_dir.path().join("sphere-viewer.toml"),
        "[gateway]\nkey = \"project-key\"\n",
    )
    .unwrap();

    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(project_dir.path(), None).unwrap();
        assert_eq!(config.gateway.key, "project-key");
        assert_eq!(config.gateway.request_timeout_secs, 90);
    });
}

#[test]
fn test_missing_global_config_uses_defaults() {
    let test_dir = TempDir::new().unwrap();
    let project_dir = TempDir::new().unwrap();

    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(project_dir.path(), None).unwrap();
        assert!(config.gateway.origin.is_none());
        assert_eq!(config.gateway.key, "anonymous");
        assert_eq!(config.gateway.connect_timeout_secs, 10);
        assert_eq!(config.logging.output, "stderr");
    });
}

#[test]
fn test_invalid_project_config_fails_run_context() {
    let test_dir = TempDir::new().unwrap();
    let project_dir = TempDir::new().unwrap();
    fs::write(
        project_dir.path().join("sphere-viewer.toml"),
        "[logging]\nlevel = \"chatty\"\n",
    )
    .unwrap();

    with_xdg_env(&test_dir, || {
        let result = RunContext::new(project_dir.path().to_path_buf(), None);
        let message = result.err().unwrap().to_string();
        assert!(message.contains("Invalid log level"), "{}", message);
    });
}
