//! Model catalog types: steps, options and the SKU assembly schema.

use crate::ids::{ModelId, OptionId, StepId};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Single-parent dependency carried by older catalog entries.
///
/// Superseded by the matrix engine: the registry migrates these into directed matrices at
/// startup and strips them from the definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDependency {
    pub depends_on: StepId,
    pub available_for: Vec<OptionId>,
}

/// One legal value of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct OptionDef {
    #[builder(setter(into))]
    pub id: OptionId,
    #[builder(setter(into))]
    pub label: String,
    /// Fragment contributed to the product code. Empty for a standard,
    /// no-suffix choice.
    #[builder(setter(into))]
    pub code: String,
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<LegacyDependency>,
}

/// One attribute of the product being configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[builder(setter(into))]
    pub id: StepId,
    #[builder(setter(into))]
    pub title: String,
    #[builder(default = true)]
    #[serde(default = "required_by_default")]
    pub required: bool,
    pub options: Vec<OptionDef>,
}

const fn required_by_default() -> bool {
    true
}

impl Step {
    #[must_use]
    pub fn option(&self, id: &str) -> Option<&OptionDef> {
        self.options.iter().find(|option| option.id == id)
    }

    #[must_use]
    pub fn has_option(&self, id: &str) -> bool {
        self.option(id).is_some()
    }

    pub fn option_ids(&self) -> impl Iterator<Item = &OptionId> {
        self.options.iter().map(|option| &option.id)
    }
}

/// How part fragments are joined after the base code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum Separator {
    /// Fragments are concatenated directly.
    #[default]
    None,
    /// A literal `-` between fragments.
    Dash,
    /// The same custom string between fragments.
    Custom(String),
    /// A separator per step, placed before that step's fragment. Missing steps use none.
    PerStep(FxHashMap<StepId, String>),
}

impl Separator {
    /// Separator placed in front of `step`'s fragment.
    #[must_use]
    pub fn before(&self, step: &StepId) -> &str {
        match self {
            Self::None => "",
            Self::Dash => "-",
            Self::Custom(sep) => sep,
            Self::PerStep(map) => map.get(step).map_or("", String::as_str),
        }
    }

    /// Builds a per-step map from `(step, separator)` pairs.
    pub fn per_step<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::PerStep(pairs.into_iter().map(|(step, sep)| (StepId::from(step), sep.to_owned())).collect())
    }
}

/// Shape of a model's product code: base code, part order and separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ProductModelSchema {
    #[builder(setter(into))]
    pub base_code: String,
    pub parts_order: Vec<StepId>,
    #[builder(default)]
    #[serde(default)]
    pub separator: Separator,
}

/// Static definition of one selectable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinition {
    #[builder(setter(into))]
    pub id: ModelId,
    #[builder(setter(into))]
    pub name: String,
    #[builder(setter(into))]
    pub slug: String,
    pub steps: Vec<Step>,
    /// Canonical step sequence. May omit a step from `steps` that this variant never uses.
    pub step_order: Vec<StepId>,
    pub schema: ProductModelSchema,
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_dependency_step: Option<StepId>,
    /// `false` when the pairwise matrices are known to admit combinations that are not
    /// manufactured; such models need an allowlist.
    #[builder(default = true)]
    #[serde(default = "required_by_default")]
    pub pairwise_exact: bool,
}

impl ModelDefinition {
    #[must_use]
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    /// Steps in `step_order` sequence. Ids without a definition are skipped.
    pub fn ordered_steps(&self) -> impl Iterator<Item = &Step> {
        self.step_order.iter().filter_map(|id| self.step(id.as_str()))
    }

    #[must_use]
    pub fn first_step(&self) -> Option<&StepId> {
        self.step_order.first()
    }

    /// Position of `step` in `step_order`.
    #[must_use]
    pub fn position(&self, step: &str) -> Option<usize> {
        self.step_order.iter().position(|id| id == step)
    }

    #[must_use]
    pub fn uses_step(&self, step: &str) -> bool {
        self.position(step).is_some()
    }

    /// Required steps that belong to `step_order`, in that order.
    pub fn required_steps(&self) -> impl Iterator<Item = &StepId> {
        self.ordered_steps().filter(|step| step.required).map(|step| &step.id)
    }

    /// Looks up an option of a step.
    #[must_use]
    pub fn option(&self, step: &str, option: &str) -> Option<&OptionDef> {
        self.step(step).and_then(|step| step.option(option))
    }
}
