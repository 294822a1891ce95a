use crate::codec::SkuCodec;
use crate::error::AllowlistError;
use fxhash::{FxHashMap, FxHashSet};
use pcfg_constraints::ConstraintEngine;
use pcfg_domain::{CombinationValidity, Configuration, ModelDefinition, ModelId, OptionId, StepId};
use tracing::{debug, trace};

/// One manufactured product: its code and the selections it decodes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowlistEntry {
    pub code: String,
    pub selections: Configuration,
}

/// The literal enumeration of every manufacturable code of one model.
#[derive(Debug)]
pub struct Allowlist {
    model: ModelId,
    codec: Box<dyn SkuCodec>,
    entries: Vec<AllowlistEntry>,
    index: FxHashMap<String, usize>,
    /// Declared options of each step in `step_order`, used to order filter results.
    options: Vec<(StepId, Vec<OptionId>)>,
}

impl Allowlist {
    /// Decodes every code through `codec` and checks the round-trip law.
    ///
    /// # Errors
    /// * [`AllowlistError::Unparseable`] for a code outside the codec grammar.
    /// * [`AllowlistError::RoundTrip`] when a decoded entry does not rebuild to the same code.
    /// * [`AllowlistError::Duplicate`] for a code listed twice.
    pub fn new<I, S>(
        definition: &ModelDefinition,
        codec: Box<dyn SkuCodec>,
        codes: I,
    ) -> Result<Self, AllowlistError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let context = format!("model {}", definition.id);
        let mut entries = Vec::new();
        let mut index = FxHashMap::default();

        for code in codes {
            let code = code.into();
            let Some(selections) = codec.parse(&code) else {
                return Err(AllowlistError::Unparseable { code, context: Some(context.into()) });
            };
            let rebuilt = codec.build(&selections).unwrap_or_default();
            if rebuilt != code {
                return Err(AllowlistError::RoundTrip { code, rebuilt, context: Some(context.into()) });
            }
            if index.insert(code.clone(), entries.len()).is_some() {
                return Err(AllowlistError::Duplicate { code, context: Some(context.into()) });
            }
            entries.push(AllowlistEntry { code, selections });
        }

        let options = definition
            .ordered_steps()
            .map(|step| (step.id.clone(), step.option_ids().cloned().collect()))
            .collect();

        debug!(model = %definition.id, entries = entries.len(), "Allowlist loaded");
        Ok(Self { model: definition.id.clone(), codec, entries, index, options })
    }

    #[must_use]
    pub const fn model(&self) -> &ModelId {
        &self.model
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AllowlistEntry] {
        &self.entries
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Code for `config`, or `None` while a required field is unselected.
    #[must_use]
    pub fn build(&self, config: &Configuration) -> Option<String> {
        self.codec.build(config)
    }

    /// Selections encoded by `code`, or `None` when it is not in the code grammar.
    ///
    /// Grammar membership only; use [`Allowlist::contains`] for manufacturability.
    #[must_use]
    pub fn parse(&self, code: &str) -> Option<Configuration> {
        self.codec.parse(code)
    }

    /// Final gate on a configuration.
    ///
    /// Incomplete configurations are provisional. A complete one is valid only when its code
    /// is listed.
    #[must_use]
    pub fn is_valid_combination(&self, config: &Configuration) -> CombinationValidity {
        let Some(code) = self.codec.build(config) else {
            return CombinationValidity::Provisional;
        };
        if self.contains(&code) {
            CombinationValidity::Valid
        } else {
            let reason = format!("No manufactured product matches code {code}");
            CombinationValidity::Invalid { code, reason }
        }
    }

    /// Entries that agree with every selection in `config` except the one on `skip`.
    fn compatible<'a>(
        &'a self,
        config: &'a Configuration,
        skip: Option<&'a str>,
    ) -> impl Iterator<Item = &'a AllowlistEntry> + 'a {
        self.entries.iter().filter(move |entry| {
            config
                .selected()
                .filter(|(step, _)| skip.is_none_or(|skip| *step != skip))
                .all(|(step, option)| entry.selections.get(step.as_str()) == Some(option))
        })
    }

    /// Options of `step` that appear in at least one entry consistent with the other
    /// selections of `config`, in the step's declared order.
    #[must_use]
    pub fn valid_options_for_step(&self, step: &str, config: &Configuration) -> Vec<OptionId> {
        let seen: FxHashSet<&OptionId> =
            self.compatible(config, Some(step)).filter_map(|entry| entry.selections.get(step)).collect();
        trace!(model = %self.model, step, candidates = seen.len(), "Scanned allowlist");

        self.options
            .iter()
            .find(|(id, _)| id == step)
            .map(|(_, options)| options.iter().filter(|option| seen.contains(option)).cloned().collect())
            .unwrap_or_default()
    }

    /// Whether some listed product extends `config`.
    #[must_use]
    pub fn has_completion(&self, config: &Configuration) -> bool {
        self.compatible(config, None).next().is_some()
    }

    /// Listed entries the matrices would block. Non-empty means the matrices are stricter than
    /// the product list.
    #[must_use]
    pub fn coverage_gaps(&self, engine: &ConstraintEngine) -> Vec<&AllowlistEntry> {
        self.entries.iter().filter(|entry| !engine.is_consistent(&entry.selections)).collect()
    }

    /// Complete, pairwise-consistent tuples whose code is not listed.
    ///
    /// These are the combinations the matrices alone would wrongly offer. Optional steps are
    /// enumerated as both unselected and each option.
    #[must_use]
    pub fn false_positives(&self, engine: &ConstraintEngine, definition: &ModelDefinition) -> Vec<String> {
        let mut found = Vec::new();
        let mut config = Configuration::for_model(definition);
        let axes: Vec<(&StepId, bool, Vec<&OptionId>)> = definition
            .ordered_steps()
            .map(|step| (&step.id, step.required, step.option_ids().collect()))
            .collect();

        enumerate(&axes, &mut config, &mut |candidate: &Configuration| {
            if !engine.is_consistent(candidate) {
                return;
            }
            if let Some(code) = self.codec.build(candidate)
                && !self.contains(&code)
            {
                found.push(code);
            }
        });

        found.sort();
        found.dedup();
        found
    }
}

fn enumerate(
    axes: &[(&StepId, bool, Vec<&OptionId>)],
    config: &mut Configuration,
    visit: &mut dyn FnMut(&Configuration),
) {
    let Some(((step, required, options), rest)) = axes.split_first() else {
        visit(config);
        return;
    };

    for option in options {
        config.set(step.as_str(), Some((*option).clone()));
        enumerate(rest, config, visit);
    }
    config.set(step.as_str(), None);
    if !required {
        enumerate(rest, config, visit);
    }
}
