//! Startup verification of authored constraint data.
//!
//! Matrices are maintained by hand in both directions, so nothing guarantees that
//! `colour -> text` and `text -> colour` agree. [`check`] collects every finding instead of
//! stopping at the first one; [`verify`] turns a non-empty list into an error.

use crate::error::ConstraintError;
use fxhash::FxHashSet;
use pcfg_domain::{ModelConstraints, ModelDefinition, OptionId, StepConstraint, StepId};
use std::fmt;

/// One problem in a model's constraint data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A constraint names a step the model does not define.
    UnknownStep { source: StepId, target: StepId, step: StepId },
    /// A matrix row key is not an option of the source step.
    UnknownSourceOption { source: StepId, target: StepId, option: OptionId },
    /// A matrix row lists a value that is not an option of the target step.
    UnknownTargetOption { source: StepId, target: StepId, option: OptionId },
    SelfPair { step: StepId },
    DuplicatePair { source: StepId, target: StepId },
    /// `source -> target` and its inverse disagree about one option pair.
    Asymmetric {
        source: StepId,
        source_option: OptionId,
        target: StepId,
        target_option: OptionId,
        /// What the `source -> target` direction says.
        forward_permits: bool,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStep { source, target, step } => {
                write!(f, "{source} -> {target} references unknown step '{step}'")
            },
            Self::UnknownSourceOption { source, target, option } => {
                write!(f, "{source} -> {target} has a row for unknown option '{option}' of {source}")
            },
            Self::UnknownTargetOption { source, target, option } => {
                write!(f, "{source} -> {target} lists unknown option '{option}' of {target}")
            },
            Self::SelfPair { step } => write!(f, "{step} constrains itself"),
            Self::DuplicatePair { source, target } => {
                write!(f, "{source} -> {target} is defined more than once")
            },
            Self::Asymmetric { source, source_option, target, target_option, forward_permits } => {
                let (forward, backward) =
                    if *forward_permits { ("permits", "excludes") } else { ("excludes", "permits") };
                write!(
                    f,
                    "{source}={source_option} {forward} {target}={target_option}, \
                     but {target}={target_option} {backward} {source}={source_option}"
                )
            },
        }
    }
}

/// Collects every violation in `constraints` against `definition`.
///
/// Symmetry is only checked when `verify_symmetry` is set, and only for pairs authored in both
/// directions whose references are valid.
#[must_use]
pub fn check(
    definition: &ModelDefinition,
    constraints: &ModelConstraints,
    verify_symmetry: bool,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut seen: FxHashSet<(&StepId, &StepId)> = FxHashSet::default();

    for constraint in constraints.iter() {
        let StepConstraint { source, target, matrix } = constraint;

        if source == target {
            violations.push(Violation::SelfPair { step: source.clone() });
            continue;
        }
        if !seen.insert((source, target)) {
            violations.push(Violation::DuplicatePair { source: source.clone(), target: target.clone() });
            continue;
        }

        let mut references_ok = true;
        for step in [source, target] {
            if definition.step(step.as_str()).is_none() {
                violations.push(Violation::UnknownStep {
                    source: source.clone(),
                    target: target.clone(),
                    step: step.clone(),
                });
                references_ok = false;
            }
        }
        if !references_ok {
            continue;
        }

        for (row, targets) in matrix.rows() {
            if definition.option(source.as_str(), row.as_str()).is_none() {
                violations.push(Violation::UnknownSourceOption {
                    source: source.clone(),
                    target: target.clone(),
                    option: row.clone(),
                });
            }
            for option in targets {
                if definition.option(target.as_str(), option.as_str()).is_none() {
                    violations.push(Violation::UnknownTargetOption {
                        source: source.clone(),
                        target: target.clone(),
                        option: option.clone(),
                    });
                }
            }
        }
    }

    if verify_symmetry && violations.is_empty() {
        violations.extend(asymmetries(definition, constraints));
    }

    // Row iteration order is unspecified; keep reports stable.
    violations.sort_by_cached_key(ToString::to_string);
    violations
}

/// Runs [`check`] and fails with [`ConstraintError::Inconsistent`] on any finding.
pub fn verify(
    definition: &ModelDefinition,
    constraints: &ModelConstraints,
    verify_symmetry: bool,
) -> Result<(), ConstraintError> {
    let violations = check(definition, constraints, verify_symmetry);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConstraintError::Inconsistent {
            model: definition.id.to_string(),
            violations,
            context: None,
        })
    }
}

fn asymmetries(definition: &ModelDefinition, constraints: &ModelConstraints) -> Vec<Violation> {
    let mut found = Vec::new();

    for forward in constraints.iter() {
        // Each unordered pair is compared once, from its lexically smaller source.
        if forward.source > forward.target {
            continue;
        }
        let Some(backward) = constraints.between(forward.target.as_str(), forward.source.as_str())
        else {
            continue;
        };
        let (Some(source_step), Some(target_step)) =
            (definition.step(forward.source.as_str()), definition.step(forward.target.as_str()))
        else {
            continue;
        };

        for x in source_step.option_ids() {
            for y in target_step.option_ids() {
                let forward_permits = forward.matrix.permits(x.as_str(), y.as_str());
                if forward_permits != backward.matrix.permits(y.as_str(), x.as_str()) {
                    found.push(Violation::Asymmetric {
                        source: forward.source.clone(),
                        source_option: x.clone(),
                        target: forward.target.clone(),
                        target_option: y.clone(),
                        forward_permits,
                    });
                }
            }
        }
    }

    found
}
