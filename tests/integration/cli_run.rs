//! Integration tests for CLI command execution

use super::test_utils::{SphereFixture, FIXTURE_FILES, SPHERE_DID, SPHERE_VERSION};
use clap::Parser;
use sphere_viewer::cli::{Cli, RunContext};
use sphere_viewer::config::ViewerConfig;
use sphere_viewer::error::ViewerError;

fn run_context() -> RunContext {
    RunContext::from_config(ViewerConfig::default()).unwrap()
}

#[tokio::test]
async fn test_open_renders_json_view() {
    let fixture = SphereFixture::start();
    let location = fixture.sphere_location(Some("intro"));
    let cli = Cli::try_parse_from(["sphere-viewer", "open", &location, "--format", "json"]).unwrap();

    let output = run_context().execute(&cli.command).await.unwrap();
    assert!(output.success);

    let value: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(value["connected"], true);
    assert!(value["connected_at"].is_string());
    assert_eq!(value["sphere_id"], SPHERE_DID);
    assert_eq!(value["sphere_version"], SPHERE_VERSION);
    assert_eq!(value["file"]["slug"], "intro");
    assert_eq!(value["file"]["content"], "Welcome to my sphere.");
    assert!(value["error"].is_null());
}

#[tokio::test]
async fn test_open_unknown_slug_reports_failure() {
    let fixture = SphereFixture::start();
    let location = fixture.sphere_location(Some("nowhere"));
    let cli = Cli::try_parse_from(["sphere-viewer", "open", &location]).unwrap();

    let output = run_context().execute(&cli.command).await.unwrap();
    assert!(!output.success);
    assert!(output.text.contains("File not found: nowhere"));
}

#[tokio::test]
async fn test_ls_lists_fixture_slugs() {
    let fixture = SphereFixture::start();
    let location = fixture.sphere_location(None);
    let cli = Cli::try_parse_from(["sphere-viewer", "ls", &location, "--format", "json"]).unwrap();

    let output = run_context().execute(&cli.command).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    let slugs: Vec<&str> = value["slugs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    let expected: Vec<&str> = FIXTURE_FILES.iter().map(|(slug, _)| *slug).collect();
    assert_eq!(slugs, expected);
    assert_eq!(value["identity"], SPHERE_DID);
}

#[tokio::test]
async fn test_ls_without_sphere_is_an_error() {
    let fixture = SphereFixture::start();
    let location = fixture.location("?slug=intro");
    let cli = Cli::try_parse_from(["sphere-viewer", "ls", &location]).unwrap();

    let result = run_context().execute(&cli.command).await;
    assert!(matches!(result, Err(ViewerError::NotFound(_))));
}

#[tokio::test]
async fn test_gateway_flag_overrides_location_origin() {
    let fixture = SphereFixture::start();
    let location = format!(
        "https://viewer.invalid/?id={}&version={}&slug=notes",
        SPHERE_DID, SPHERE_VERSION
    );
    let gateway = fixture.server.base_url();
    let cli = Cli::try_parse_from([
        "sphere-viewer",
        "open",
        &location,
        "--gateway",
        &gateway,
        "--format",
        "json",
    ])
    .unwrap();

    let output = run_context().execute(&cli.command).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&output.text).unwrap();
    assert_eq!(value["file"]["content"], "# Notes\n\nSome subtext.");
}

#[tokio::test]
async fn test_empty_key_flag_is_rejected() {
    let fixture = SphereFixture::start();
    let location = fixture.sphere_location(Some("intro"));
    let cli = Cli::try_parse_from(["sphere-viewer", "open", &location, "--key", ""]).unwrap();

    let result = run_context().execute(&cli.command).await;
    assert!(matches!(result, Err(ViewerError::ConfigError(_))));
}

#[tokio::test]
async fn test_config_show_renders_toml() {
    let cli = Cli::try_parse_from(["sphere-viewer", "config", "show"]).unwrap();
    let output = run_context().execute(&cli.command).await.unwrap();
    assert!(output.success);
    assert!(output.text.contains("[gateway]"));
    assert!(output.text.contains("key = \"anonymous\""));
}

#[test]
fn test_verbose_conflicts_with_quiet() {
    let result = Cli::try_parse_from(["sphere-viewer", "--verbose", "--quiet", "config", "show"]);
    assert!(result.is_err());
}

#[test]
fn test_invalid_config_rejected_by_run_context() {
    let mut config = ViewerConfig::default();
    config.gateway.origin = Some("ftp://example.com".to_string());
    let result = RunContext::from_config(config);
    assert!(matches!(result, Err(ViewerError::ConfigError(_))));
}
