//! Built-in product models.
//!
//! Each module owns one model's static tables and returns a fresh [`CatalogEntry`]; the
//! registry takes ownership at startup. Matrices are authored in both directions and checked
//! against each other when the registry is built.

pub mod call_point;
pub mod global_reset;
pub mod stopper_station;
pub mod universal_stopper;
pub mod waterproof_call_point;

use pcfg_allowlist::SkuCodec;
use pcfg_domain::{ConstraintMatrix, ModelConstraints, ModelDefinition, OptionDef, Step, StepId};

/// `(source option, legal target options)` rows of one directed matrix.
pub(crate) type Rows = &'static [(&'static str, &'static [&'static str])];

/// How allowlist codes are decoded.
#[derive(Debug)]
pub enum Codec {
    /// [`pcfg_allowlist::SchemaCodec`] over the model's own schema.
    Schema,
    Custom(Box<dyn SkuCodec>),
}

/// Manufactured codes of an allowlist-governed model.
#[derive(Debug)]
pub struct AllowlistSource {
    pub codes: Vec<String>,
    pub codec: Codec,
}

impl AllowlistSource {
    pub fn schema(codes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { codes: codes.into_iter().map(Into::into).collect(), codec: Codec::Schema }
    }

    pub fn custom(codes: impl IntoIterator<Item = impl Into<String>>, codec: Box<dyn SkuCodec>) -> Self {
        Self { codes: codes.into_iter().map(Into::into).collect(), codec: Codec::Custom(codec) }
    }
}

/// Everything the registry needs to register one model.
#[derive(Debug)]
pub struct CatalogEntry {
    pub definition: ModelDefinition,
    pub constraints: ModelConstraints,
    pub allowlist: Option<AllowlistSource>,
}

/// Every built-in model, in display order.
#[must_use]
pub fn builtin() -> Vec<CatalogEntry> {
    vec![
        global_reset::entry(),
        call_point::entry(),
        waterproof_call_point::entry(),
        stopper_station::entry(),
        universal_stopper::entry(),
    ]
}

pub(crate) fn option(id: &str, label: &str, code: &str) -> OptionDef {
    OptionDef::builder().id(id).label(label).code(code).build()
}

pub(crate) fn step(id: &str, title: &str, options: Vec<OptionDef>) -> Step {
    Step::builder().id(id).title(title).options(options).build()
}

pub(crate) fn order(steps: &[&str]) -> Vec<StepId> {
    steps.iter().map(|step| StepId::from(*step)).collect()
}

pub(crate) fn matrix(rows: Rows) -> ConstraintMatrix {
    ConstraintMatrix::from_rows(rows.iter().copied())
}
