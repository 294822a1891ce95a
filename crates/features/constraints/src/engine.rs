use fxhash::FxHashMap;
use pcfg_domain::{
    BlockReason, Configuration, ModelConstraints, ModelId, OptionAvailability, OptionDef, OptionId,
    Step, StepAvailability, StepConstraint, StepId,
};
use tracing::trace;

/// Availability queries over one model's directed matrices.
///
/// Built once per model at registry construction and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct ConstraintEngine {
    constraints: ModelConstraints,
    /// Target step -> indices into `constraints.constraints`.
    by_target: FxHashMap<StepId, Vec<usize>>,
}

impl ConstraintEngine {
    #[must_use]
    pub fn new(constraints: ModelConstraints) -> Self {
        let mut by_target: FxHashMap<StepId, Vec<usize>> = FxHashMap::default();
        for (index, constraint) in constraints.constraints.iter().enumerate() {
            by_target.entry(constraint.target.clone()).or_default().push(index);
        }
        Self { constraints, by_target }
    }

    #[must_use]
    pub const fn model(&self) -> &ModelId {
        &self.constraints.model
    }

    #[must_use]
    pub const fn constraints(&self) -> &ModelConstraints {
        &self.constraints
    }

    /// Directed constraints whose target is `step`.
    pub fn targeting<'a>(&'a self, step: &str) -> impl Iterator<Item = &'a StepConstraint> + 'a {
        self.by_target
            .get(step)
            .into_iter()
            .flatten()
            .map(|&index| &self.constraints.constraints[index])
    }

    /// Whether `option` of `step` is legal next to every current selection.
    ///
    /// Each selected source step whose matrix row excludes `option` contributes one
    /// [`BlockReason::Matrix`].
    #[must_use]
    pub fn check_option_availability(
        &self,
        step: &str,
        option: &str,
        config: &Configuration,
    ) -> OptionAvailability {
        let reasons: Vec<BlockReason> = self
            .targeting(step)
            .filter(|constraint| constraint.source != step)
            .filter_map(|constraint| {
                let selected = config.get(constraint.source.as_str())?;
                let permitted = constraint.matrix.permits(selected.as_str(), option);
                trace!(
                    source = %constraint.source,
                    %selected,
                    target = step,
                    option,
                    permitted,
                    "Evaluated constraint"
                );
                (!permitted).then(|| BlockReason::Matrix {
                    step: constraint.source.clone(),
                    option: selected.clone(),
                })
            })
            .collect();

        if reasons.is_empty() {
            OptionAvailability::available(option)
        } else {
            OptionAvailability::blocked(option, reasons)
        }
    }

    /// `options` filtered to the ones currently available at `step`, in their given order.
    #[must_use]
    pub fn available_options<'a>(
        &self,
        step: &str,
        options: &'a [OptionDef],
        config: &Configuration,
    ) -> Vec<&'a OptionDef> {
        options
            .iter()
            .filter(|option| self.check_option_availability(step, option.id.as_str(), config).available)
            .collect()
    }

    /// Availability of every option of `step`.
    #[must_use]
    pub fn step_availability(&self, step: &Step, config: &Configuration) -> StepAvailability {
        StepAvailability {
            step: step.id.clone(),
            options: step
                .options
                .iter()
                .map(|option| self.check_option_availability(step.id.as_str(), option.id.as_str(), config))
                .collect(),
        }
    }

    /// Selected steps whose current value would now be blocked, in configuration order.
    #[must_use]
    pub fn validate_configuration(&self, config: &Configuration) -> Vec<StepId> {
        config
            .selected()
            .filter(|(step, option)| {
                !self.check_option_availability(step.as_str(), option.as_str(), config).available
            })
            .map(|(step, _)| step.clone())
            .collect()
    }

    /// `true` when no selection blocks another.
    #[must_use]
    pub fn is_consistent(&self, config: &Configuration) -> bool {
        self.validate_configuration(config).is_empty()
    }

    /// Options of `target` excluded by `blocking`'s current selection alone.
    ///
    /// Empty when `blocking` is unselected or has no matrix toward `target`.
    #[must_use]
    pub fn blocked_by_step(
        &self,
        target: &Step,
        blocking: &str,
        config: &Configuration,
    ) -> Vec<OptionId> {
        let Some(selected) = config.get(blocking) else {
            return Vec::new();
        };
        let Some(constraint) = self.constraints.between(blocking, target.id.as_str()) else {
            return Vec::new();
        };

        target
            .option_ids()
            .filter(|option| !constraint.matrix.permits(selected.as_str(), option.as_str()))
            .cloned()
            .collect()
    }

    /// Whether the two selections tolerate each other in both directions.
    #[must_use]
    pub fn pair_permits(&self, a_step: &str, a_option: &str, b_step: &str, b_option: &str) -> bool {
        let forward = self
            .constraints
            .between(a_step, b_step)
            .is_none_or(|constraint| constraint.matrix.permits(a_option, b_option));
        let backward = self
            .constraints
            .between(b_step, a_step)
            .is_none_or(|constraint| constraint.matrix.permits(b_option, a_option));
        forward && backward
    }

    /// Other selected steps that conflict with `changed`'s selection in either direction.
    ///
    /// Never includes `changed`. Empty when `changed` has no selection.
    #[must_use]
    pub fn conflicting_steps(&self, changed: &str, config: &Configuration) -> Vec<StepId> {
        let Some(value) = config.get(changed) else {
            return Vec::new();
        };

        config
            .selected()
            .filter(|(step, _)| *step != changed)
            .filter(|(step, option)| !self.pair_permits(changed, value.as_str(), step.as_str(), option.as_str()))
            .map(|(step, _)| step.clone())
            .collect()
    }
}
