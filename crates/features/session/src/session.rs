use crate::error::SessionError;
use crate::reasons::describe_reason;
use pcfg_catalog::{ModelRegistry, RegisteredModel};
use pcfg_domain::{
    BlockReason, CombinationValidity, Configuration, ModelDefinition, OptionAvailability, OptionDef,
    OptionId, ProductModel, Selection, Step, StepAvailability, StepId,
};
use pcfg_kernel::labels::LabelLookup;
use pcfg_product_code::build_product_model;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// One buyer configuring one model.
///
/// The registry is shared; the configuration is owned. Sessions are cheap to create and are
/// never shared between concurrent writers.
#[derive(Debug, Clone)]
pub struct Session {
    registry: Arc<ModelRegistry>,
    model: Arc<RegisteredModel>,
    config: Configuration,
    current_step: Option<StepId>,
    last_changed: Option<StepId>,
}

impl Session {
    /// Starts an empty configuration of `model` (id or slug) positioned on its first step.
    pub fn new(registry: Arc<ModelRegistry>, model: &str) -> Result<Self, SessionError> {
        let model = registry.shared(model)?;
        Ok(Self::fresh(registry, model))
    }

    fn fresh(registry: Arc<ModelRegistry>, model: Arc<RegisteredModel>) -> Self {
        let config = Configuration::for_model(model.definition());
        let current_step = model.definition().first_step().cloned();
        Self { registry, model, config, current_step, last_changed: None }
    }

    #[must_use]
    pub const fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    #[must_use]
    pub fn model(&self) -> &RegisteredModel {
        &self.model
    }

    #[must_use]
    pub fn definition(&self) -> &ModelDefinition {
        self.model.definition()
    }

    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.config
    }

    #[must_use]
    pub const fn current_step(&self) -> Option<&StepId> {
        self.current_step.as_ref()
    }

    /// Step written by the most recent `select` or `clear`.
    #[must_use]
    pub const fn last_changed(&self) -> Option<&StepId> {
        self.last_changed.as_ref()
    }

    fn step(&self, step: &str) -> Result<&Step, SessionError> {
        self.definition().step(step).filter(|_| self.config.contains_step(step)).ok_or_else(|| {
            SessionError::UnknownStep {
                model: self.model.id().to_string(),
                step: step.to_owned(),
                context: None,
            }
        })
    }

    fn option_id(&self, step: &str, option: &str) -> Result<OptionId, SessionError> {
        self.step(step)?.option(option).map(|def| def.id.clone()).ok_or_else(|| {
            SessionError::UnknownOption { step: step.to_owned(), option: option.to_owned(), context: None }
        })
    }

    /// Writes `option` on `step` and reconciles.
    ///
    /// The write always lands, even for an option that was shown as blocked: the latest choice
    /// wins and conflicting earlier selections are cleared. Returns the cleared steps.
    #[instrument(skip(self), fields(model = %self.model.id()))]
    pub fn select(&mut self, step: &str, option: &str) -> Result<Vec<StepId>, SessionError> {
        let option = self.option_id(step, option)?;
        self.config.set(step, Some(option));
        self.last_changed = Some(StepId::from(step));

        let cleared = self.reconcile();
        debug!(selected = self.config.selected_count(), cleared = cleared.len(), "Selection applied");
        Ok(cleared)
    }

    /// Removes the selection on `step` and reconciles. Returns the cleared steps.
    #[instrument(skip(self), fields(model = %self.model.id()))]
    pub fn clear(&mut self, step: &str) -> Result<Vec<StepId>, SessionError> {
        self.step(step)?;
        self.config.clear(step);
        self.last_changed = Some(StepId::from(step));

        let cleared = self.reconcile();
        debug!(selected = self.config.selected_count(), "Selection cleared");
        Ok(cleared)
    }

    /// Clears every selection invalidated by the last change, in the order cleared.
    ///
    /// The last changed step is never cleared. Matrix conflicts go first; allowlist-governed
    /// models then keep, in step order, only selections that still extend to a listed product
    /// together with everything kept before them. Running it again without a write in between
    /// clears nothing.
    pub fn reconcile(&mut self) -> Vec<StepId> {
        let model = Arc::clone(&self.model);
        let protected = self.last_changed.clone();
        let mut cleared = Vec::new();

        if let Some(changed) = protected.as_ref() {
            for step in model.engine().conflicting_steps(changed.as_str(), &self.config) {
                self.config.clear(step.as_str());
                cleared.push(step);
            }
        }

        // Conflicts between two older selections drop the later step first.
        while let Some(step) = model
            .engine()
            .validate_configuration(&self.config)
            .into_iter()
            .rev()
            .find(|step| Some(step) != protected.as_ref())
        {
            self.config.clear(step.as_str());
            cleared.push(step);
        }

        if let Some(allowlist) = model.allowlist() {
            let mut kept = Configuration::for_model(model.definition());
            if let Some(changed) = protected.as_ref() {
                kept.set(changed.as_str(), self.config.get(changed.as_str()).cloned());
            }

            for step in &model.definition().step_order {
                if Some(step) == protected.as_ref() {
                    continue;
                }
                let Some(value) = self.config.get(step.as_str()).cloned() else {
                    continue;
                };
                if allowlist.valid_options_for_step(step.as_str(), &kept).contains(&value) {
                    kept.set(step.as_str(), Some(value));
                } else {
                    self.config.clear(step.as_str());
                    cleared.push(step.clone());
                }
            }
        }

        if !cleared.is_empty() {
            warn!(model = %model.id(), changed = ?protected, ?cleared, "Cascade cleared selections");
        }
        cleared
    }

    /// Availability of every option of `step`.
    ///
    /// For allowlist-governed models an option that is matrix-legal but has no listed product
    /// next to the other selections is blocked with [`BlockReason::Allowlist`].
    pub fn step_availability(&self, step: &str) -> Result<StepAvailability, SessionError> {
        let definition = self.step(step)?;
        let mut availability = self.model.engine().step_availability(definition, &self.config);

        if let Some(allowlist) = self.model.allowlist() {
            let valid = allowlist.valid_options_for_step(step, &self.config);
            let fixed: Vec<Selection> = self
                .config
                .entries()
                .iter()
                .filter(|entry| entry.step != step && entry.option.is_some())
                .cloned()
                .collect();

            for option in &mut availability.options {
                if !valid.contains(&option.option) {
                    option.available = false;
                    option.reasons.push(BlockReason::Allowlist { fixed: fixed.clone() });
                }
            }
        }

        Ok(availability)
    }

    pub fn option_availability(&self, step: &str, option: &str) -> Result<OptionAvailability, SessionError> {
        self.step_availability(step)?.options.into_iter().find(|candidate| candidate.option == option).ok_or_else(
            || SessionError::UnknownOption { step: step.to_owned(), option: option.to_owned(), context: None },
        )
    }

    /// Options of `step` that can be selected right now, in declared order.
    pub fn available_options(&self, step: &str) -> Result<Vec<&OptionDef>, SessionError> {
        let availability = self.step_availability(step)?;
        let definition = self.step(step)?;
        Ok(definition.options.iter().filter(|option| availability.is_available(option.id.as_str())).collect())
    }

    /// [`Session::step_availability`] for every step in `step_order`.
    pub fn availability(&self) -> Result<Vec<StepAvailability>, SessionError> {
        self.definition().step_order.iter().map(|step| self.step_availability(step.as_str())).collect()
    }

    /// Steps where nothing can be selected any more.
    pub fn dead_ends(&self) -> Result<Vec<StepId>, SessionError> {
        Ok(self
            .availability()?
            .into_iter()
            .filter(StepAvailability::is_dead_end)
            .map(|availability| availability.step)
            .collect())
    }

    /// Options of `target` excluded by `blocking`'s current selection alone.
    pub fn blocked_by(&self, target: &str, blocking: &str) -> Result<Vec<OptionId>, SessionError> {
        self.step(blocking)?;
        let target = self.step(target)?;
        Ok(self.model.engine().blocked_by_step(target, blocking, &self.config))
    }

    /// Renders `reason` with this model's labels.
    #[must_use]
    pub fn describe(&self, reason: &BlockReason, labels: &dyn LabelLookup) -> String {
        describe_reason(self.definition(), reason, labels)
    }

    /// The product code and completeness of the current configuration.
    pub fn product_model(&self) -> Result<ProductModel, SessionError> {
        Ok(build_product_model(self.definition(), &self.config)?)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        pcfg_product_code::is_complete(self.definition(), &self.config)
    }

    /// Final verdict on the configuration.
    ///
    /// Allowlist-governed models are checked against the listed codes. Other models are valid
    /// once complete, since the cascade keeps them consistent.
    #[must_use]
    pub fn validate(&self) -> CombinationValidity {
        match self.model.allowlist() {
            Some(allowlist) => allowlist.is_valid_combination(&self.config),
            None if self.is_complete() => CombinationValidity::Valid,
            None => CombinationValidity::Provisional,
        }
    }

    /// Moves the cursor to `step`.
    pub fn go_to(&mut self, step: &str) -> Result<(), SessionError> {
        let id = self.step(step)?.id.clone();
        self.current_step = Some(id);
        Ok(())
    }

    /// Moves the cursor to the next step in `step_order`. `None` when already on the last one.
    pub fn advance(&mut self) -> Option<&StepId> {
        let order = &self.model.definition().step_order;
        let next = match &self.current_step {
            Some(current) => order.iter().position(|step| step == current).and_then(|index| order.get(index + 1)),
            None => order.first(),
        }?;
        self.current_step = Some(next.clone());
        self.current_step.as_ref()
    }

    /// Empties the configuration and returns to the first step.
    #[instrument(skip(self), fields(model = %self.model.id()))]
    pub fn reset(&mut self) {
        self.config.clear_all();
        self.current_step = self.model.definition().first_step().cloned();
        self.last_changed = None;
        debug!("Session reset");
    }

    /// Starts over on another model (id or slug).
    #[instrument(skip(self), fields(from = %self.model.id()))]
    pub fn switch_model(&mut self, model: &str) -> Result<(), SessionError> {
        let model = self.registry.shared(model)?;
        *self = Self::fresh(Arc::clone(&self.registry), model);
        debug!(model = %self.model.id(), "Switched model");
        Ok(())
    }

    /// Replays a saved configuration through the cascade in step order.
    ///
    /// Returns the saved steps that did not survive. Unknown ids fail before anything changes.
    #[instrument(skip(self, snapshot), fields(model = %self.model.id()))]
    pub fn restore(&mut self, snapshot: &Configuration) -> Result<Vec<StepId>, SessionError> {
        for (step, option) in snapshot.selected() {
            self.option_id(step.as_str(), option.as_str())?;
        }

        self.reset();
        let model = Arc::clone(&self.model);
        for step in &model.definition().step_order {
            if let Some(option) = snapshot.get(step.as_str()) {
                self.select(step.as_str(), option.as_str())?;
            }
        }

        let dropped: Vec<StepId> = snapshot
            .selected()
            .filter(|(step, option)| self.config.get(step.as_str()) != Some(*option))
            .map(|(step, _)| step.clone())
            .collect();
        debug!(restored = self.config.selected_count(), dropped = dropped.len(), "Snapshot restored");
        Ok(dropped)
    }
}
