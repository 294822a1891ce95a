use crate::ids::StepId;
use serde::{Deserialize, Serialize};

/// One fragment of an assembled product code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodePart {
    pub step: StepId,
    pub code: String,
}

/// Product code assembled from a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductModel {
    pub base_code: String,
    /// Fragments of the selected steps, in `parts_order`.
    pub parts: Vec<CodePart>,
    pub code: String,
    pub is_complete: bool,
    /// Required steps without a selection, in `step_order`.
    pub missing_steps: Vec<StepId>,
}

impl ProductModel {
    /// Fragment contributed by `step`, if it was selected.
    #[must_use]
    pub fn part(&self, step: &str) -> Option<&str> {
        self.parts.iter().find(|part| part.step == step).map(|part| part.code.as_str())
    }
}
