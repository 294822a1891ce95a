use anyhow::Result;
use pcfg::domain::config::RegistryConfig;
use pcfg::features::catalog::ModelRegistry;
use pcfg::features::constraints::check;
use std::process::ExitCode;

/// Prints one line per registered model.
pub(crate) fn list_models(registry: &ModelRegistry) {
    if registry.is_empty() {
        println!("No models registered.");
        return;
    }

    for model in registry.iter() {
        let definition = model.definition();
        let gate = model.allowlist().map_or_else(
            || "matrices".to_owned(),
            |allowlist| {
                format!(
                    "allowlist ({} codes, {} false positives)",
                    allowlist.len(),
                    model.false_positives().len()
                )
            },
        );
        println!(
            "{:<24} {:<30} {} steps, gated by {gate}",
            definition.id.as_str(),
            definition.name,
            definition.step_order.len()
        );
    }
}

/// Prints the steps of a model in `step_order`, with each option's code fragment.
pub(crate) fn show_steps(registry: &ModelRegistry, key: &str) -> Result<()> {
    let definition = registry.model(key)?.definition();
    println!("{} ({}), base code {}", definition.name, definition.id, definition.schema.base_code);

    for step in definition.ordered_steps() {
        let required = if step.required { "required" } else { "optional" };
        println!("{}: {} ({required})", step.id, step.title);
        for option in &step.options {
            let code = if option.code.is_empty() { "(no code)" } else { option.code.as_str() };
            println!("    {:<8} {:<44} {code}", option.id.as_str(), option.label);
            if let Some(note) = &option.note {
                println!("             {note}");
            }
        }
    }
    Ok(())
}

pub(crate) fn list_false_positives(registry: &ModelRegistry, key: &str) -> Result<()> {
    let model = registry.model(key)?;
    if !model.is_allowlist_governed() {
        println!("{} has no allowlist; its matrices are the only gate.", model.id());
        return Ok(());
    }

    if model.false_positives().is_empty() {
        println!("No false positives.");
    }
    for code in model.false_positives() {
        println!("{code}");
    }
    Ok(())
}

/// Re-runs the startup checks and prints every finding. Fails when any model has one.
///
/// Only meaningful with `registry.strict = false`; a strict registry refuses to start with
/// findings in the first place.
pub(crate) fn check_models(registry: &ModelRegistry, config: &RegistryConfig) -> ExitCode {
    let mut failing = 0_usize;

    for model in registry.iter() {
        let mut findings: Vec<String> =
            check(model.definition(), model.engine().constraints(), config.verify_symmetry)
                .iter()
                .map(ToString::to_string)
                .collect();

        match model.allowlist() {
            Some(allowlist) => findings.extend(
                allowlist
                    .coverage_gaps(model.engine())
                    .into_iter()
                    .map(|entry| format!("listed code {} is blocked by the matrices", entry.code)),
            ),
            None if !model.definition().pairwise_exact => {
                findings.push("matrices admit unmanufactured combinations and no allowlist gates them".to_owned());
            },
            None => {},
        }

        if findings.is_empty() {
            println!("ok    {}", model.id());
        } else {
            failing += 1;
            println!("FAIL  {}", model.id());
            for finding in &findings {
                println!("      {finding}");
            }
        }
    }

    if failing == 0 {
        ExitCode::SUCCESS
    } else {
        eprintln!("{failing} model(s) with findings");
        ExitCode::FAILURE
    }
}
