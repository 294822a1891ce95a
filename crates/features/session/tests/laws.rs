use pcfg_catalog::ModelRegistry;
use pcfg_domain::config::RegistryConfig;
use pcfg_domain::{Configuration, OptionId, StepId};
use pcfg_product_code::build_product_model;
use pcfg_session::Session;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

const MODELS: &[&str] =
    &["global-reset", "reset-call-point", "waterproof-call-point", "stopper-station", "universal-stopper"];

#[derive(Debug, Clone)]
enum Op {
    Select { step: usize, option: usize },
    Clear { step: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<usize>(), any::<usize>()).prop_map(|(step, option)| Op::Select { step, option }),
        1 => any::<usize>().prop_map(|step| Op::Clear { step }),
    ]
}

fn registry() -> Arc<ModelRegistry> {
    static REGISTRY: OnceLock<Arc<ModelRegistry>> = OnceLock::new();
    Arc::clone(REGISTRY.get_or_init(|| Arc::new(ModelRegistry::builtin(&RegistryConfig::default()).unwrap())))
}

/// Resolves `op`'s indices against the model and applies it.
fn apply(session: &mut Session, op: &Op) {
    let steps: Vec<_> = session.definition().ordered_steps().cloned().collect();
    match *op {
        Op::Select { step, option } => {
            let step = &steps[step % steps.len()];
            let option = &step.options[option % step.options.len()];
            session.select(step.id.as_str(), option.id.as_str()).unwrap();
        },
        Op::Clear { step } => {
            let step = &steps[step % steps.len()];
            session.clear(step.id.as_str()).unwrap();
        },
    }
}

fn available(session: &Session) -> Vec<(StepId, BTreeSet<OptionId>)> {
    session
        .availability()
        .unwrap()
        .into_iter()
        .map(|step| {
            let ids = step.available_ids().cloned().collect();
            (step.step, ids)
        })
        .collect()
}

fn assert_consistent(session: &Session) {
    let model = session.model();
    let config = session.configuration();
    assert!(model.engine().is_consistent(config), "inconsistent: {config:?}");

    let Some(allowlist) = model.allowlist() else {
        return;
    };
    // Only an option that no listed product uses can leave the rest without a completion.
    let alone = session.last_changed().and_then(|step| {
        let option = config.get(step.as_str())?;
        let mut alone = Configuration::for_model(session.definition());
        alone.set(step.as_str(), Some(option.clone()));
        Some(alone)
    });
    let reachable = alone.as_ref().is_none_or(|alone| allowlist.has_completion(alone));
    if reachable {
        assert!(allowlist.has_completion(config), "no listed product extends {config:?}");
        if session.is_complete() {
            assert!(session.validate().is_valid(), "complete but unlisted: {config:?}");
        }
    }
}

proptest! {
    #[test]
    fn cascades_keep_every_reachable_configuration_consistent(
        model in 0..MODELS.len(),
        ops in prop::collection::vec(op(), 1..16),
    ) {
        let mut session = Session::new(registry(), MODELS[model]).unwrap();
        for op in &ops {
            apply(&mut session, op);
            assert_consistent(&session);
        }
    }

    #[test]
    fn reconcile_is_idempotent(
        model in 0..MODELS.len(),
        ops in prop::collection::vec(op(), 1..16),
    ) {
        let mut session = Session::new(registry(), MODELS[model]).unwrap();
        for op in &ops {
            apply(&mut session, op);
            let settled = session.configuration().clone();
            prop_assert!(session.reconcile().is_empty());
            prop_assert_eq!(session.configuration(), &settled);
        }
    }

    #[test]
    fn clearing_never_narrows_availability(
        model in 0..MODELS.len(),
        ops in prop::collection::vec(op(), 1..12),
        clear in any::<usize>(),
    ) {
        let mut session = Session::new(registry(), MODELS[model]).unwrap();
        for op in &ops {
            apply(&mut session, op);
        }

        for (step, ids) in available(&session) {
            let declared: BTreeSet<_> =
                session.definition().step(step.as_str()).unwrap().option_ids().cloned().collect();
            prop_assert!(ids.is_subset(&declared));
        }

        let before = available(&session);
        apply(&mut session, &Op::Clear { step: clear });
        let after = available(&session);
        for ((step, narrow), (_, wide)) in before.iter().zip(&after) {
            prop_assert!(narrow.is_subset(wide), "{} narrowed after a clear", step);
        }
    }

    #[test]
    fn completeness_tracks_required_steps(
        model in 0..MODELS.len(),
        ops in prop::collection::vec(op(), 1..24),
    ) {
        let mut session = Session::new(registry(), MODELS[model]).unwrap();
        for op in &ops {
            apply(&mut session, op);
        }

        let definition = session.definition().clone();
        let config = session.configuration().clone();
        let product = build_product_model(&definition, &config).unwrap();
        let missing: Vec<_> =
            definition.required_steps().filter(|step| !config.is_selected(step.as_str())).cloned().collect();
        prop_assert_eq!(product.is_complete, missing.is_empty());
        prop_assert_eq!(&product.missing_steps, &missing);
        prop_assert_eq!(session.is_complete(), product.is_complete);

        if product.is_complete {
            for step in definition.ordered_steps() {
                let mut more = config.clone();
                more.set(step.id.as_str(), Some(step.options[0].id.clone()));
                prop_assert!(build_product_model(&definition, &more).unwrap().is_complete);

                if step.required {
                    let mut less = config.clone();
                    less.clear(step.id.as_str());
                    prop_assert!(!build_product_model(&definition, &less).unwrap().is_complete);
                }
            }
        }
    }
}
