//! # Model Catalog
//!
//! Static product definitions and the registry that owns them at runtime.
//!
//! * **Models ([`models`])**: the built-in catalog, one module per product.
//! * **Documents ([`document`])**: extra models supplied as JSON.
//! * **Registry ([`registry`])**: built once at startup. It migrates legacy dependencies,
//!   verifies matrices, loads allowlists and flags models whose matrices are known to be
//!   looser than the product list.

pub mod document;
mod error;
pub mod models;
pub mod registry;

pub use crate::document::{load_document, parse_document};
pub use crate::error::{CatalogError, CatalogErrorExt};
pub use crate::models::{AllowlistSource, CatalogEntry, Codec};
pub use crate::registry::{ModelRegistry, RegisteredModel};
