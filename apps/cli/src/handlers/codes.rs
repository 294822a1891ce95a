use anyhow::{Context, Result};
use pcfg::domain::{CombinationValidity, Configuration, StepId};
use pcfg::features::allowlist::{SchemaCodec, SkuCodec};
use pcfg::features::catalog::{ModelRegistry, RegisteredModel};
use std::process::ExitCode;

/// Decodes with the allowlist's codec when the model has one, else with its schema.
fn decode(model: &RegisteredModel, code: &str) -> Result<Configuration> {
    let decoded = match model.allowlist() {
        Some(allowlist) => allowlist.parse(code),
        None => SchemaCodec::new(model.definition()).parse(code),
    };
    decoded.with_context(|| format!("'{code}' is not a {} product code", model.definition().name))
}

pub(crate) fn parse_code(registry: &ModelRegistry, key: &str, code: &str) -> Result<()> {
    let model = registry.model(key)?;
    let config = decode(model, code)?;

    for selection in config.entries() {
        match &selection.option {
            Some(option) => println!("{}={option}", selection.step),
            None => println!("{}=", selection.step),
        }
    }
    Ok(())
}

pub(crate) fn validate_code(registry: &ModelRegistry, key: &str, code: &str) -> Result<ExitCode> {
    let model = registry.model(key)?;
    let config = decode(model, code)?;

    let verdict = match model.allowlist() {
        Some(allowlist) => allowlist.is_valid_combination(&config),
        None => {
            let conflicts = model.engine().validate_configuration(&config);
            if conflicts.is_empty() {
                CombinationValidity::Valid
            } else {
                let steps: Vec<&str> = conflicts.iter().map(StepId::as_str).collect();
                CombinationValidity::Invalid {
                    code: code.to_owned(),
                    reason: format!("Conflicting selections on {}", steps.join(", ")),
                }
            }
        },
    };

    Ok(match verdict {
        CombinationValidity::Valid => {
            println!("valid: {code}");
            ExitCode::SUCCESS
        },
        CombinationValidity::Provisional => {
            println!("incomplete: {code}");
            ExitCode::FAILURE
        },
        CombinationValidity::Invalid { reason, .. } => {
            println!("invalid: {reason}");
            ExitCode::FAILURE
        },
    })
}
