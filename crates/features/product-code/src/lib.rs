//! # Product Model Builder
//!
//! Serializes a configuration into the manufacturer product code. The builder trusts its
//! input: compatibility is settled upstream by the constraint engine and allowlist.

mod error;

pub use crate::error::{ProductCodeError, ProductCodeErrorExt};

use pcfg_domain::{CodePart, Configuration, ModelDefinition, ProductModel};
use tracing::trace;

/// Assembles the product code and completeness report for `config`.
///
/// Fragments follow `parts_order`. A separator is only written between two non-empty pieces,
/// so a step whose code is empty (unselected, or a no-suffix option) leaves no trace.
///
/// # Errors
/// [`ProductCodeError::UnknownOption`] when a selected option is not defined on its step.
pub fn build_product_model(
    definition: &ModelDefinition,
    config: &Configuration,
) -> Result<ProductModel, ProductCodeError> {
    let schema = &definition.schema;
    let mut code = schema.base_code.clone();
    let mut parts = Vec::new();

    for step in &schema.parts_order {
        let Some(selected) = config.get(step.as_str()) else {
            continue;
        };
        let fragment = definition
            .option(step.as_str(), selected.as_str())
            .map(|option| option.code.as_str())
            .ok_or_else(|| ProductCodeError::UnknownOption {
                step: step.to_string(),
                option: selected.to_string(),
                context: Some(definition.id.to_string().into()),
            })?;

        parts.push(CodePart { step: step.clone(), code: fragment.to_owned() });
        if fragment.is_empty() {
            continue;
        }
        if !code.is_empty() {
            code.push_str(schema.separator.before(step));
        }
        code.push_str(fragment);
    }

    let missing_steps: Vec<_> =
        definition.required_steps().filter(|step| !config.is_selected(step.as_str())).cloned().collect();
    trace!(model = %definition.id, %code, missing = missing_steps.len(), "Built product model");

    Ok(ProductModel {
        base_code: schema.base_code.clone(),
        parts,
        code,
        is_complete: missing_steps.is_empty(),
        missing_steps,
    })
}

/// `true` iff every required step of `definition` has a selection.
#[must_use]
pub fn is_complete(definition: &ModelDefinition, config: &Configuration) -> bool {
    definition.required_steps().all(|step| config.is_selected(step.as_str()))
}
