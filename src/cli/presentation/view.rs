//! View presentation: opened sphere, opened file, slug listings.

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::state::{SphereViewerState, ViewSummary};
use crate::types::{Did, Slug, Version};
use comfy_table::Table;
use owo_colors::OwoColorize;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ViewerError> {
    serde_json::to_string_pretty(value).map_err(|e| ViewerError::OutputError(e.to_string()))
}

fn heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold())
    } else {
        title.to_string()
    }
}

/// Render the state left behind by a bootstrap.
pub fn format_view(
    state: &SphereViewerState,
    format: &str,
    color: bool,
) -> Result<String, ViewerError> {
    let summary = ViewSummary::from(state);
    if format == "json" {
        return to_json(&summary);
    }

    let mut lines = Vec::new();
    match &summary.ipfs_api {
        Some(ipfs_api) => match summary.connected_at {
            Some(at) => lines.push(format!(
                "Connected: {} (since {})",
                ipfs_api,
                at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
            )),
            None => lines.push(format!("Connected: {}", ipfs_api)),
        },
        None => lines.push("Not connected".to_string()),
    }

    if let (Some(id), Some(version)) = (&summary.sphere_id, &summary.sphere_version) {
        lines.push(heading("Sphere", color));
        lines.push(format!("  Identity: {}", id));
        lines.push(format!("  Version:  {}", version));
    }

    if let Some(file) = &summary.file {
        lines.push(heading("File", color));
        lines.push(format!("  Slug:         {}", file.slug));
        lines.push(format!("  Memo:         {}", file.memo));
        lines.push(format!(
            "  Content-Type: {}",
            file.content_type.as_deref().unwrap_or("-")
        ));
        lines.push(String::new());
        lines.push(file.content.clone());
    }

    if let Some(error) = &summary.error {
        let label = if color {
            format!("{}", "Error:".red())
        } else {
            "Error:".to_string()
        };
        lines.push(format!("{} {}", label, error));
    }

    Ok(lines.join("\n"))
}

/// Render the slugs of an opened sphere.
pub fn format_slug_list(
    identity: &Did,
    version: &Version,
    slugs: &[Slug],
    format: &str,
) -> Result<String, ViewerError> {
    if format == "json" {
        return to_json(&serde_json::json!({
            "identity": identity,
            "version": version,
            "slugs": slugs,
        }));
    }

    if slugs.is_empty() {
        return Ok(format!("Sphere {} at {} has no files.", identity, version));
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["#", "Slug"]);
    for (i, slug) in slugs.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), slug.to_string()]);
    }
    Ok(format!("Sphere {} at {}\n{}", identity, version, table))
}

pub fn format_config(config: &ViewerConfig) -> Result<String, ViewerError> {
    config.to_toml()
}
