//! Per-option availability answers and combination verdicts.

use crate::configuration::Selection;
use crate::ids::{OptionId, StepId};
use serde::{Deserialize, Serialize};

/// Why an option is currently unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum BlockReason {
    /// A selection on `step` has a matrix row that excludes the option.
    Matrix { step: StepId, option: OptionId },
    /// No manufactured product combines the option with the fixed selections.
    Allowlist { fixed: Vec<Selection> },
}

impl BlockReason {
    /// The step whose selection blocks, for matrix reasons.
    #[must_use]
    pub fn blocking_step(&self) -> Option<&StepId> {
        match self {
            Self::Matrix { step, .. } => Some(step),
            Self::Allowlist { .. } => None,
        }
    }
}

/// Availability of one option under the current configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionAvailability {
    pub option: OptionId,
    pub available: bool,
    /// Empty when available.
    pub reasons: Vec<BlockReason>,
}

impl OptionAvailability {
    pub fn available(option: impl Into<OptionId>) -> Self {
        Self { option: option.into(), available: true, reasons: Vec::new() }
    }

    pub fn blocked(option: impl Into<OptionId>, reasons: Vec<BlockReason>) -> Self {
        Self { option: option.into(), available: false, reasons }
    }
}

/// Availability of every option of one step, in the step's declared option order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepAvailability {
    pub step: StepId,
    pub options: Vec<OptionAvailability>,
}

impl StepAvailability {
    pub fn available_ids(&self) -> impl Iterator<Item = &OptionId> {
        self.options.iter().filter(|option| option.available).map(|option| &option.option)
    }

    /// Whether `option` is listed and available.
    #[must_use]
    pub fn is_available(&self, option: &str) -> bool {
        self.options.iter().any(|entry| entry.option == option && entry.available)
    }

    #[must_use]
    pub fn get(&self, option: &str) -> Option<&OptionAvailability> {
        self.options.iter().find(|entry| entry.option == option)
    }

    /// A step with options where none can be chosen.
    #[must_use]
    pub fn is_dead_end(&self) -> bool {
        !self.options.is_empty() && self.options.iter().all(|option| !option.available)
    }
}

/// Verdict on a configuration as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum CombinationValidity {
    /// Complete and manufacturable.
    Valid,
    /// Not complete yet; nothing is known to be wrong.
    Provisional,
    /// Complete, but the assembled code is not a manufactured product.
    Invalid { code: String, reason: String },
}

impl CombinationValidity {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}
