//! Plugin management settings: where plugins come from and which versions to use.
//!
//! [`PluginManagementSpec`] adds nothing of its own. It hands repository
//! configuration to the inner repositories object and exposes the inner
//! resolution strategy as is.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Something plugin repositories can be declared on.
pub trait PluginRepositoriesSpec {
    fn maven(&mut self, name: &str, url: Url);

    fn plugin_portal(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginRepository {
    PluginPortal,
    Maven { name: String, url: Url },
}

/// Ordered list of declared plugin repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginRepositories {
    repositories: Vec<PluginRepository>,
}

impl PluginRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginRepository> {
        self.repositories.iter()
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

impl PluginRepositoriesSpec for PluginRepositories {
    fn maven(&mut self, name: &str, url: Url) {
        self.repositories.push(PluginRepository::Maven {
            name: name.to_string(),
            url,
        });
    }

    fn plugin_portal(&mut self) {
        self.repositories.push(PluginRepository::PluginPortal);
    }
}

/// One `[[plugin_management.repositories]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RepositoryConfig {
    PluginPortal,
    Maven { name: String, url: String },
}

/// Declarative form of a repositories configuration, applied in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoriesBlock(pub Vec<RepositoryConfig>);

impl RepositoriesBlock {
    /// Declares every entry on `target`. Fails on the first invalid URL;
    /// entries before it have already been applied.
    pub fn apply_to<R: PluginRepositoriesSpec + ?Sized>(&self, target: &mut R) -> Result<()> {
        for entry in &self.0 {
            match entry {
                RepositoryConfig::PluginPortal => target.plugin_portal(),
                RepositoryConfig::Maven { name, url } => {
                    let url = Url::parse(url)
                        .with_context(|| format!("invalid URL for repository {name}"))?;
                    target.maven(name, url);
                }
            }
        }
        Ok(())
    }
}

/// Plugin id to pinned version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginResolutionStrategy {
    versions: BTreeMap<String, String>,
}

impl PluginResolutionStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_version(&mut self, plugin_id: &str, version: &str) {
        self.versions.insert(plugin_id.to_string(), version.to_string());
    }

    pub fn version_for(&self, plugin_id: &str) -> Option<&str> {
        self.versions.get(plugin_id).map(String::as_str)
    }

    pub fn pins(&self) -> impl Iterator<Item = (&str, &str)> {
        self.versions.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Forwards configuration to the repositories object and resolution strategy it wraps.
#[derive(Debug, Clone, Default)]
pub struct PluginManagementSpec<R = PluginRepositories, S = PluginResolutionStrategy> {
    repositories: R,
    resolution_strategy: S,
}

impl<R, S> PluginManagementSpec<R, S>
where
    R: PluginRepositoriesSpec,
{
    pub fn new(repositories: R, resolution_strategy: S) -> Self {
        Self {
            repositories,
            resolution_strategy,
        }
    }

    /// Runs `configure` against the repositories object.
    pub fn repositories(&mut self, configure: impl FnOnce(&mut R)) {
        configure(&mut self.repositories);
    }

    /// Applies a declarative repositories block to the repositories object.
    pub fn repositories_block(&mut self, block: &RepositoriesBlock) -> Result<()> {
        block.apply_to(&mut self.repositories)
    }

    pub fn plugin_resolution_strategy(&self) -> &S {
        &self.resolution_strategy
    }

    pub fn plugin_resolution_strategy_mut(&mut self) -> &mut S {
        &mut self.resolution_strategy
    }

    pub fn configured_repositories(&self) -> &R {
        &self.repositories
    }
}
