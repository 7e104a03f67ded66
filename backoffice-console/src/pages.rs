//! Built-in page catalogue.

use anyhow::{Context, Result};
use backoffice_model::PageConfig;
use std::path::Path;

const ADMINS: &str = include_str!("../pages/admins.json");
const USERS: &str = include_str!("../pages/users.json");
const TEAM: &str = include_str!("../pages/team.json");

/// A page reachable from the sidebar.
#[derive(Debug, Clone)]
pub struct PageEntry {
    /// Route name: `admins`, `users`, `team`.
    pub key: String,
    /// Sidebar label.
    pub label: String,
    pub config: PageConfig,
}

/// The admins, users and team pages.
pub fn catalogue() -> Result<Vec<PageEntry>> {
    [
        ("admins", "Admins", ADMINS),
        ("users", "Users", USERS),
        ("team", "My Team", TEAM),
    ]
    .into_iter()
    .map(|(key, label, json)| {
        let config = PageConfig::from_json(json)
            .with_context(|| format!("built-in page `{key}` is malformed"))?;
        Ok(PageEntry {
            key: key.to_string(),
            label: label.to_string(),
            config,
        })
    })
    .collect()
}

/// Loads an extra page from a JSON file. The route name is the file stem.
pub fn load_page(path: &Path) -> Result<PageEntry> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = PageConfig::from_json(&json)
        .with_context(|| format!("failed to parse page config {}", path.display()))?;
    let key = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "custom".to_string());
    Ok(PageEntry {
        label: config.entity_name().to_string(),
        key,
        config,
    })
}
