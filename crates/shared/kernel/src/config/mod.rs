use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Base name of the configuration file looked up when no path is given.
pub const DEFAULT_CONFIG_BASE: &str = "configurator";
/// Prefix of environment overrides (`PCFG__REGISTRY__STRICT=false`).
pub const ENV_PREFIX: &str = "PCFG";

/// Custom error type for config loading.
#[pcfg_derive::pcfg_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration by layering a file under environment overrides.
///
/// 1. **File**: an explicit `path` must exist; its format follows the extension. Without a
///    path, a file named `configurator` (any supported extension) is used if present.
/// 2. **Environment**: variables prefixed with `PCFG__` override file values. Nested
///    sections use double underscores (`PCFG__CATALOG__BUILTIN` maps to `catalog.builtin`).
///
/// Sections missing from both sources fall back to `T`'s serde defaults.
///
/// # Errors
/// * The explicit file is missing or unreadable.
/// * The merged values do not deserialize into `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let required = path.is_some();
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_BASE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    trace!(path = %effective_path.display(), required, "Loading config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
