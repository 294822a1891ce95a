use crate::error::{CatalogError, CatalogErrorExt};
use crate::models::{self, CatalogEntry, Codec};
use fxhash::FxHashMap;
use pcfg_allowlist::{Allowlist, SchemaCodec, SkuCodec};
use pcfg_constraints::{ConstraintEngine, ConstraintError, check, migrate_legacy};
use pcfg_domain::ModelId;
use pcfg_domain::ModelDefinition;
use pcfg_domain::config::RegistryConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// One verified model with everything needed to configure it.
#[derive(Debug)]
pub struct RegisteredModel {
    definition: ModelDefinition,
    engine: ConstraintEngine,
    allowlist: Option<Allowlist>,
    false_positives: Vec<String>,
    migrated_legacy: usize,
}

impl RegisteredModel {
    #[must_use]
    pub const fn id(&self) -> &ModelId {
        &self.definition.id
    }

    #[must_use]
    pub const fn definition(&self) -> &ModelDefinition {
        &self.definition
    }

    #[must_use]
    pub const fn engine(&self) -> &ConstraintEngine {
        &self.engine
    }

    #[must_use]
    pub const fn allowlist(&self) -> Option<&Allowlist> {
        self.allowlist.as_ref()
    }

    /// Whether the allowlist, not the matrices, is the authoritative gate.
    #[must_use]
    pub const fn is_allowlist_governed(&self) -> bool {
        self.allowlist.is_some()
    }

    /// Pairwise-consistent codes missing from the allowlist, computed at registration.
    pub fn false_positives(&self) -> &[String] {
        &self.false_positives
    }

    /// Options migrated from legacy single-parent dependencies.
    #[must_use]
    pub const fn migrated_legacy(&self) -> usize {
        self.migrated_legacy
    }
}

/// Process-wide, read-only set of models keyed by id and slug.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: Vec<Arc<RegisteredModel>>,
    by_id: FxHashMap<ModelId, usize>,
    by_slug: FxHashMap<String, usize>,
}

impl ModelRegistry {
    /// Registers the built-in catalog.
    pub fn builtin(config: &RegistryConfig) -> Result<Self, CatalogError> {
        Self::build(models::builtin(), config)
    }

    /// Verifies and registers `entries` in order.
    ///
    /// Per model: legacy dependencies are migrated, matrices verified, the engine built, the
    /// allowlist decoded and checked against the matrices, and `pairwise_exact = false` models
    /// without an allowlist flagged. With `config.strict` unset, matrix and coverage findings
    /// are logged instead of failing; legacy and allowlist authoring errors always fail.
    ///
    /// # Errors
    /// See [`CatalogError`]; every variant except `Io`, `Json` and `UnknownModel` can occur.
    pub fn build(
        entries: impl IntoIterator<Item = CatalogEntry>,
        config: &RegistryConfig,
    ) -> Result<Self, CatalogError> {
        let mut registry = Self::default();
        for entry in entries {
            let model = register(entry, config)?;
            registry.insert(model)?;
        }

        info!(
            models = registry.len(),
            allowlisted = registry.iter().filter(|m| m.is_allowlist_governed()).count(),
            "Model registry ready"
        );
        Ok(registry)
    }

    fn insert(&mut self, model: RegisteredModel) -> Result<(), CatalogError> {
        let index = self.models.len();
        let id = model.id().as_str();
        let slug = model.definition.slug.as_str();
        // Ids and slugs share one lookup namespace.
        if self.by_id.contains_key(id)
            || self.by_slug.contains_key(slug)
            || self.by_slug.contains_key(id)
            || self.by_id.contains_key(slug)
        {
            return Err(CatalogError::DuplicateModel { id: model.id().to_string(), context: None });
        }
        self.by_id.insert(model.id().clone(), index);
        self.by_slug.insert(model.definition.slug.clone(), index);
        self.models.push(Arc::new(model));
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RegisteredModel> {
        self.by_id.get(id).map(|&index| self.models[index].as_ref())
    }

    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&RegisteredModel> {
        self.by_slug.get(slug).map(|&index| self.models[index].as_ref())
    }

    /// Looks a model up by id, then by slug.
    pub fn model(&self, key: &str) -> Result<&RegisteredModel, CatalogError> {
        self.get(key)
            .or_else(|| self.by_slug(key))
            .ok_or_else(|| CatalogError::UnknownModel { id: key.to_owned(), context: None })
    }

    /// Like [`ModelRegistry::model`], but hands out a shared handle that outlives the borrow.
    pub fn shared(&self, key: &str) -> Result<Arc<RegisteredModel>, CatalogError> {
        self.by_id
            .get(key)
            .or_else(|| self.by_slug.get(key))
            .map(|&index| Arc::clone(&self.models[index]))
            .ok_or_else(|| CatalogError::UnknownModel { id: key.to_owned(), context: None })
    }

    /// Models in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredModel> {
        self.models.iter().map(Arc::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

fn register(entry: CatalogEntry, config: &RegistryConfig) -> Result<RegisteredModel, CatalogError> {
    let CatalogEntry { mut definition, mut constraints, allowlist } = entry;
    let context = format!("model {}", definition.id);

    if constraints.model != definition.id {
        return Err(CatalogError::Internal {
            message: format!("constraints for '{}' attached to '{}'", constraints.model, definition.id)
                .into(),
            context: None,
        });
    }

    let migrated_legacy = migrate_legacy(&mut definition, &mut constraints).context(context.clone())?;

    let violations = check(&definition, &constraints, config.verify_symmetry);
    if !violations.is_empty() {
        let error = ConstraintError::Inconsistent {
            model: definition.id.to_string(),
            violations,
            context: None,
        };
        if config.strict {
            return Err(error.into());
        }
        warn!(model = %definition.id, %error, "Constraint findings ignored (non-strict)");
    }

    let engine = ConstraintEngine::new(constraints);

    let (allowlist, false_positives) = match allowlist {
        Some(source) => {
            let codec: Box<dyn SkuCodec> = match source.codec {
                Codec::Schema => Box::new(SchemaCodec::new(&definition)),
                Codec::Custom(codec) => codec,
            };
            let allowlist = Allowlist::new(&definition, codec, source.codes).context(context.clone())?;

            let gaps: Vec<String> =
                allowlist.coverage_gaps(&engine).into_iter().map(|entry| entry.code.clone()).collect();
            if !gaps.is_empty() {
                if config.strict {
                    return Err(CatalogError::CoverageGap {
                        model: definition.id.to_string(),
                        codes: gaps,
                        context: None,
                    });
                }
                warn!(model = %definition.id, gaps = gaps.len(), "Allowlist entries blocked by matrices");
            }

            let false_positives = allowlist.false_positives(&engine, &definition);
            (Some(allowlist), false_positives)
        },
        None => (None, Vec::new()),
    };

    if !definition.pairwise_exact && allowlist.is_none() {
        if config.strict && config.require_allowlist_for_false_positives {
            return Err(CatalogError::MissingAllowlist { model: definition.id.to_string(), context: None });
        }
        warn!(model = %definition.id, "Matrices admit unmanufactured combinations and no allowlist gates them");
    }
    if definition.pairwise_exact && !false_positives.is_empty() {
        warn!(
            model = %definition.id,
            count = false_positives.len(),
            "Model is declared pairwise exact but its matrices admit unlisted codes"
        );
    }

    info!(
        model = %definition.id,
        steps = definition.step_order.len(),
        constraints = engine.constraints().len(),
        allowlist = allowlist.as_ref().map_or(0, Allowlist::len),
        false_positives = false_positives.len(),
        migrated_legacy,
        "Registered model"
    );

    Ok(RegisteredModel { definition, engine, allowlist, false_positives, migrated_legacy })
}
