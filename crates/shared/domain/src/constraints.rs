//! Directed per-step-pair compatibility matrices.

use crate::ids::{ModelId, OptionId, StepId};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Maps a source option to the options of one fixed target step that stay legal.
///
/// A missing row means the source option does not restrict the target.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintMatrix {
    rows: FxHashMap<OptionId, Vec<OptionId>>,
}

impl ConstraintMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matrix from `(source, [targets])` rows.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
        let rows = rows
            .into_iter()
            .map(|(source, targets)| {
                (OptionId::from(source), targets.iter().map(|target| OptionId::from(*target)).collect())
            })
            .collect();
        Self { rows }
    }

    /// Legal targets for `source`, if the matrix has a row for it.
    #[must_use]
    pub fn row(&self, source: &str) -> Option<&[OptionId]> {
        self.rows.get(source).map(Vec::as_slice)
    }

    /// Whether `target` is legal alongside `source`. Missing rows permit everything.
    #[must_use]
    pub fn permits(&self, source: &str, target: &str) -> bool {
        self.row(source).is_none_or(|row| row.iter().any(|option| option == target))
    }

    pub fn insert_row(&mut self, source: OptionId, targets: Vec<OptionId>) -> Option<Vec<OptionId>> {
        self.rows.insert(source, targets)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&OptionId, &[OptionId])> {
        self.rows.iter().map(|(source, targets)| (source, targets.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One directed dependency: a selection on `source` narrows `target` through `matrix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepConstraint {
    pub source: StepId,
    pub target: StepId,
    pub matrix: ConstraintMatrix,
}

impl StepConstraint {
    pub fn new(source: impl Into<StepId>, target: impl Into<StepId>, matrix: ConstraintMatrix) -> Self {
        Self { source: source.into(), target: target.into(), matrix }
    }
}

/// Every directed constraint of one model. Independent step pairs have no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConstraints {
    pub model: ModelId,
    #[serde(default)]
    pub constraints: Vec<StepConstraint>,
}

impl ModelConstraints {
    pub fn new(model: impl Into<ModelId>) -> Self {
        Self { model: model.into(), constraints: Vec::new() }
    }

    /// Adds a directed constraint.
    #[must_use]
    pub fn with(mut self, source: &str, target: &str, matrix: ConstraintMatrix) -> Self {
        self.constraints.push(StepConstraint::new(source, target, matrix));
        self
    }

    pub fn push(&mut self, constraint: StepConstraint) {
        self.constraints.push(constraint);
    }

    /// The constraint for the directed pair, if any.
    #[must_use]
    pub fn between(&self, source: &str, target: &str) -> Option<&StepConstraint> {
        self.constraints.iter().find(|c| c.source == source && c.target == target)
    }

    pub fn targeting<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a StepConstraint> + 'a {
        self.constraints.iter().filter(move |c| c.target == target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepConstraint> {
        self.constraints.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}
