use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::plugin_management::{
    PluginManagementSpec, PluginRepositories, PluginResolutionStrategy, RepositoriesBlock,
};
use crate::resource::HttpOptions;

/// `[plugin_management]` section: repositories to declare and version pins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManagementConfig {
    #[serde(default)]
    pub repositories: RepositoriesBlock,
    /// Plugin id to version.
    #[serde(default)]
    pub resolution: BTreeMap<String, String>,
}

impl PluginManagementConfig {
    /// Builds the plugin management object this section describes.
    pub fn build(&self) -> Result<PluginManagementSpec> {
        let mut strategy = PluginResolutionStrategy::new();
        for (plugin, version) in &self.resolution {
            strategy.use_version(plugin, version);
        }
        let mut management = PluginManagementSpec::new(PluginRepositories::new(), strategy);
        management
            .repositories_block(&self.repositories)
            .context("plugin_management.repositories")?;
        Ok(management)
    }
}

/// Global configuration loaded from `~/.config/resfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResfetchConfig {
    /// Seconds allowed for connecting to a remote host.
    pub connect_timeout_secs: u64,
    /// Upper bound in seconds for a whole transfer.
    pub timeout_secs: u64,
    /// Transfers slower than this (bytes/sec) for `low_speed_time_secs` are aborted.
    pub low_speed_limit_bytes: u32,
    pub low_speed_time_secs: u64,
    pub max_redirects: u32,
    /// Optional JSON-lines file receiving one entry per finished operation.
    #[serde(default)]
    pub trace_file: Option<PathBuf>,
    #[serde(default)]
    pub plugin_management: Option<PluginManagementConfig>,
}

impl Default for ResfetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 3600,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            max_redirects: 10,
            trace_file: None,
            plugin_management: None,
        }
    }
}

impl ResfetchConfig {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            low_speed_limit: self.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(self.low_speed_time_secs),
            max_redirects: self.max_redirects,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("resfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ResfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ResfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ResfetchConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin_management::{PluginRepository, RepositoryConfig};

    #[test]
    fn default_config_values() {
        let cfg = ResfetchConfig::default();
        assert_eq!(cfg.http_options(), HttpOptions::default());
        assert!(cfg.trace_file.is_none());
        assert!(cfg.plugin_management.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ResfetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ResfetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            connect_timeout_secs = 5
            timeout_secs = 120
            low_speed_limit_bytes = 1
            low_speed_time_secs = 30
            max_redirects = 0
            trace_file = "/var/tmp/resfetch-trace.jsonl"
        "#;
        let cfg: ResfetchConfig = toml::from_str(toml).unwrap();
        let http = cfg.http_options();
        assert_eq!(http.connect_timeout, Duration::from_secs(5));
        assert_eq!(http.timeout, Duration::from_secs(120));
        assert_eq!(http.max_redirects, 0);
        assert_eq!(
            cfg.trace_file.as_deref(),
            Some(std::path::Path::new("/var/tmp/resfetch-trace.jsonl"))
        );
    }

    #[test]
    fn config_toml_plugin_management() {
        let toml = r#"
            connect_timeout_secs = 15
            timeout_secs = 3600
            low_speed_limit_bytes = 1024
            low_speed_time_secs = 60
            max_redirects = 10

            [[plugin_management.repositories]]
            type = "maven"
            name = "corp"
            url = "https://repo.corp.example/plugins"

            [[plugin_management.repositories]]
            type = "plugin_portal"

            [plugin_management.resolution]
            "org.acme.lint" = "2.1.0"
        "#;
        let cfg: ResfetchConfig = toml::from_str(toml).unwrap();
        let section = cfg.plugin_management.as_ref().unwrap();
        assert_eq!(section.repositories.0.len(), 2);
        assert_eq!(section.repositories.0[1], RepositoryConfig::PluginPortal);

        let management = section.build().unwrap();
        let repos: Vec<_> = management.configured_repositories().iter().cloned().collect();
        assert!(matches!(&repos[0], PluginRepository::Maven { name, .. } if name == "corp"));
        assert_eq!(repos[1], PluginRepository::PluginPortal);
        assert_eq!(
            management.plugin_resolution_strategy().version_for("org.acme.lint"),
            Some("2.1.0")
        );
    }

    #[test]
    fn plugin_management_bad_url_is_reported() {
        let section = PluginManagementConfig {
            repositories: RepositoriesBlock(vec![RepositoryConfig::Maven {
                name: "corp".to_string(),
                url: "::".to_string(),
            }]),
            resolution: BTreeMap::new(),
        };
        let err = section.build().unwrap_err();
        assert!(format!("{err:#}").contains("plugin_management.repositories"));
    }
}
