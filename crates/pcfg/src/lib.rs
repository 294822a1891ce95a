//! Facade crate for the product configurator.
//! Re-exports domain/kernel primitives and the feature slices, and builds the model registry.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load a [`ConfiguratorConfig`] (see [`kernel::config::load_config`]).
//! - Call [`init`] once at startup and share the registry behind an `Arc`.
//! - Open a [`features::session::Session`] per buyer.

pub use pcfg_domain as domain;
pub use pcfg_kernel as kernel;

use pcfg_catalog::{CatalogError, ModelRegistry, load_document, models};
use pcfg_domain::config::ConfiguratorConfig;
use tracing::info;

/// Feature slices.
pub mod features {
    pub use pcfg_allowlist as allowlist;
    pub use pcfg_catalog as catalog;
    pub use pcfg_constraints as constraints;
    pub use pcfg_product_code as product_code;
    pub use pcfg_session as session;
}

/// Builds the model registry: the built-in catalog when enabled, then every configured
/// document, in order.
///
/// # Errors
/// Returns the first document that fails to load or model that fails verification.
pub fn init(config: &ConfiguratorConfig) -> Result<ModelRegistry, CatalogError> {
    let mut entries = if config.catalog.builtin { models::builtin() } else { Vec::new() };
    for path in &config.catalog.documents {
        entries.push(load_document(path)?);
    }

    info!(
        builtin = config.catalog.builtin,
        documents = config.catalog.documents.len(),
        strict = config.registry.strict,
        "Building model registry"
    );
    ModelRegistry::build(entries, &config.registry)
}
