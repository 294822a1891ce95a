use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configurator settings.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfigInner {
    pub registry: RegistryConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ConfiguratorConfig {
    #[serde(flatten, default)]
    inner: Arc<ConfiguratorConfigInner>,
}

impl Deref for ConfiguratorConfig {
    type Target = ConfiguratorConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ConfiguratorConfig {
    fn deref_mut(&mut self) -> &mut ConfiguratorConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Startup verification knobs for the model registry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Abort startup on any verification finding instead of logging it.
    pub strict: bool,
    /// Check that every directed matrix agrees with its reverse.
    pub verify_symmetry: bool,
    /// Reject models flagged `pairwiseExact = false` that have no allowlist.
    pub require_allowlist_for_false_positives: bool,
}

/// Where model definitions come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Register the compiled-in catalog.
    pub builtin: bool,
    /// Extra JSON model documents loaded after the built-ins.
    pub documents: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Rolling log files go here when set.
    pub directory: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { strict: true, verify_symmetry: true, require_allowlist_for_false_positives: true }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { builtin: true, documents: Vec::new() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false }
    }
}
