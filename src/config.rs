use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "railway-dashboard.json";

/// Startup settings. Every field has a default, so the config file only
/// needs the keys it wants to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Ticket sales CSV.
    pub data_path: PathBuf,
    /// Initial state of the map's "Show points" toggle.
    pub show_points: bool,
    /// Initial state of the map's "Show routes" toggle.
    pub show_routes: bool,
    /// Maximum number of rows drawn in the record table.
    pub table_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("railway.csv"),
            show_points: true,
            show_routes: true,
            table_rows: 500,
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = DashboardConfig::from_json(r#"{ "data_path": "data/tickets.csv", "show_routes": false }"#)
            .unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("data/tickets.csv"));
        assert!(!cfg.show_routes);
        assert!(cfg.show_points);
        assert_eq!(cfg.table_rows, 500);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(DashboardConfig::from_json(r#"{ "map_style": "Dark" }"#).is_err());
    }

    #[test]
    fn missing_file_means_defaults() {
        let cfg = DashboardConfig::load(Path::new("no/such/railway-dashboard.json")).unwrap();
        assert_eq!(cfg, DashboardConfig::default());
    }
}
