//! `resfetch repos` – show the configured plugin management.

use anyhow::Result;
use resfetch_core::config::ResfetchConfig;
use resfetch_core::plugin_management::{PluginManagementSpec, PluginRepository};

pub fn run_repos(cfg: &ResfetchConfig) -> Result<()> {
    let Some(section) = &cfg.plugin_management else {
        println!("No plugin management configured.");
        return Ok(());
    };
    print!("{}", format_plugin_management(&section.build()?));
    Ok(())
}

pub fn format_plugin_management(management: &PluginManagementSpec) -> String {
    let mut out = String::from("repositories:\n");
    for repo in management.configured_repositories().iter() {
        match repo {
            PluginRepository::PluginPortal => out.push_str("  plugin portal\n"),
            PluginRepository::Maven { name, url } => {
                out.push_str(&format!("  maven {name} {url}\n"))
            }
        }
    }
    out.push_str("resolution:\n");
    for (plugin, version) in management.plugin_resolution_strategy().pins() {
        out.push_str(&format!("  {plugin} = {version}\n"));
    }
    out
}
