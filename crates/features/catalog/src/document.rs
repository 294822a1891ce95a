//! JSON catalog documents.
//!
//! ```json
//! { "definition": { ... }, "constraints": { "model": "...", "constraints": [ ... ] },
//!   "allowlist": ["CODE-1", "CODE-2"] }
//! ```
//!
//! `constraints` and `allowlist` are optional. Allowlisted documents are decoded with the
//! schema codec.

use crate::error::{CatalogError, CatalogErrorExt};
use crate::models::{AllowlistSource, CatalogEntry};
use pcfg_domain::{ModelConstraints, ModelDefinition};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    definition: ModelDefinition,
    #[serde(default)]
    constraints: Option<ModelConstraints>,
    #[serde(default)]
    allowlist: Option<Vec<String>>,
}

/// Parses one model document.
pub fn parse_document(raw: &str) -> Result<CatalogEntry, CatalogError> {
    let document: CatalogDocument = serde_json::from_str(raw)?;
    let constraints =
        document.constraints.unwrap_or_else(|| ModelConstraints::new(document.definition.id.clone()));

    Ok(CatalogEntry {
        definition: document.definition,
        constraints,
        allowlist: document.allowlist.map(AllowlistSource::schema),
    })
}

/// Reads and parses one model document from disk.
pub fn load_document(path: impl AsRef<Path>) -> Result<CatalogEntry, CatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).context(format!("Reading {}", path.display()))?;
    let entry = parse_document(&raw).context(format!("Parsing {}", path.display()))?;
    info!(model = %entry.definition.id, path = %path.display(), "Loaded catalog document");
    Ok(entry)
}
