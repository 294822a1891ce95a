use crate::ids::{OptionId, StepId};
use crate::model::ModelDefinition;
use serde::{Deserialize, Serialize};

/// One entry of a [`Configuration`]: a step and its selected option, if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub step: StepId,
    pub option: Option<OptionId>,
}

/// The in-progress step -> option choices of one session.
///
/// Keys are fixed at creation (a model's `step_order`) and kept in that order; only values
/// change. Lookups are linear, which is the right trade for the handful of steps a model has.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Configuration {
    entries: Vec<Selection>,
}

impl Configuration {
    /// An all-empty configuration over `steps`.
    pub fn new(steps: impl IntoIterator<Item = StepId>) -> Self {
        Self { entries: steps.into_iter().map(|step| Selection { step, option: None }).collect() }
    }

    /// An all-empty configuration over the model's `step_order`.
    #[must_use]
    pub fn for_model(definition: &ModelDefinition) -> Self {
        Self::new(definition.step_order.iter().cloned())
    }

    /// Convenience for fixtures: `step_order` keys with the given pairs selected.
    ///
    /// Pairs naming a step outside the key set are ignored.
    #[must_use]
    pub fn with_selections<'a>(
        definition: &ModelDefinition,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut config = Self::for_model(definition);
        for (step, option) in pairs {
            config.set(step, Some(OptionId::from(option)));
        }
        config
    }

    /// Selected option of `step`. `None` when unselected or not a key.
    #[must_use]
    pub fn get(&self, step: &str) -> Option<&OptionId> {
        self.entries.iter().find(|entry| entry.step == step).and_then(|entry| entry.option.as_ref())
    }

    #[must_use]
    pub fn contains_step(&self, step: &str) -> bool {
        self.entries.iter().any(|entry| entry.step == step)
    }

    #[must_use]
    pub fn is_selected(&self, step: &str) -> bool {
        self.get(step).is_some()
    }

    /// Writes a value. Returns `false` (and changes nothing) when `step` is not a key.
    pub fn set(&mut self, step: &str, option: Option<OptionId>) -> bool {
        match self.entries.iter_mut().find(|entry| entry.step == step) {
            Some(entry) => {
                entry.option = option;
                true
            },
            None => false,
        }
    }

    /// Clears `step`. Returns whether a value was removed.
    pub fn clear(&mut self, step: &str) -> bool {
        self.entries
            .iter_mut()
            .find(|entry| entry.step == step)
            .is_some_and(|entry| entry.option.take().is_some())
    }

    pub fn clear_all(&mut self) {
        for entry in &mut self.entries {
            entry.option = None;
        }
    }

    /// Every key in order.
    pub fn steps(&self) -> impl Iterator<Item = &StepId> {
        self.entries.iter().map(|entry| &entry.step)
    }

    /// Non-empty entries in key order.
    pub fn selected(&self) -> impl Iterator<Item = (&StepId, &OptionId)> {
        self.entries.iter().filter_map(|entry| entry.option.as_ref().map(|option| (&entry.step, option)))
    }

    pub fn entries(&self) -> &[Selection] {
        &self.entries
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_count() == 0
    }

    /// True when every key has a value.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.iter().all(|entry| entry.option.is_some())
    }
}
