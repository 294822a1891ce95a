//! Migration of single-parent `dependsOn`/`availableFor` option fields into matrices.

use crate::error::ConstraintError;
use pcfg_domain::{ConstraintMatrix, ModelConstraints, ModelDefinition, OptionId, StepConstraint, StepId};
use tracing::debug;

/// Rewrites every legacy option dependency of `definition` as a pair of directed matrices
/// (parent -> dependent and dependent -> parent) appended to `constraints`, then strips the
/// legacy fields.
///
/// Returns the number of options migrated. Nothing changes on error.
///
/// # Errors
/// [`ConstraintError::LegacyConflict`] when a legacy parent step does not exist, or when a
/// matrix for the same step pair is already authored.
pub fn migrate_legacy(
    definition: &mut ModelDefinition,
    constraints: &mut ModelConstraints,
) -> Result<usize, ConstraintError> {
    let mut migrated = Vec::new();
    let mut count = 0;

    for step in &definition.steps {
        let mut parents: Vec<&StepId> = step
            .options
            .iter()
            .filter_map(|option| option.legacy.as_ref().map(|legacy| &legacy.depends_on))
            .collect();
        parents.sort();
        parents.dedup();

        for parent_id in parents {
            let Some(parent) = definition.step(parent_id.as_str()) else {
                return Err(ConstraintError::LegacyConflict {
                    message: format!("{} depends on unknown step '{parent_id}'", step.id).into(),
                    context: Some(definition.id.to_string().into()),
                });
            };
            if constraints.between(parent_id.as_str(), step.id.as_str()).is_some()
                || constraints.between(step.id.as_str(), parent_id.as_str()).is_some()
            {
                return Err(ConstraintError::LegacyConflict {
                    message: format!(
                        "{} depends on {parent_id} but matrices for that pair already exist",
                        step.id
                    )
                    .into(),
                    context: Some(definition.id.to_string().into()),
                });
            }

            let gated: Vec<(&OptionId, &[OptionId])> = step
                .options
                .iter()
                .filter_map(|option| {
                    let legacy = option.legacy.as_ref()?;
                    (legacy.depends_on == *parent_id)
                        .then_some((&option.id, legacy.available_for.as_slice()))
                })
                .collect();
            count += gated.len();

            let mut forward = ConstraintMatrix::new();
            for parent_option in parent.option_ids() {
                let allowed = step
                    .option_ids()
                    .filter(|option| {
                        gated
                            .iter()
                            .find(|(gated_option, _)| gated_option == option)
                            .is_none_or(|(_, available_for)| available_for.contains(parent_option))
                    })
                    .cloned()
                    .collect();
                forward.insert_row(parent_option.clone(), allowed);
            }

            let mut backward = ConstraintMatrix::new();
            for (option, available_for) in &gated {
                backward.insert_row((*option).clone(), available_for.to_vec());
            }

            debug!(
                model = %definition.id,
                parent = %parent_id,
                dependent = %step.id,
                options = gated.len(),
                "Migrated legacy dependency"
            );
            migrated.push(StepConstraint { source: parent_id.clone(), target: step.id.clone(), matrix: forward });
            migrated.push(StepConstraint { source: step.id.clone(), target: parent_id.clone(), matrix: backward });
        }
    }

    for constraint in migrated {
        constraints.push(constraint);
    }
    for option in definition.steps.iter_mut().flat_map(|step| step.options.iter_mut()) {
        option.legacy = None;
    }

    Ok(count)
}
