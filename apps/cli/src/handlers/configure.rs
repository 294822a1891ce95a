use anyhow::{Context, Result};
use pcfg::domain::{CombinationValidity, Configuration, ProductModel, StepId};
use pcfg::features::catalog::ModelRegistry;
use pcfg::features::session::Session;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Cascade {
    selected: String,
    cleared: Vec<StepId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    model: &'a str,
    configuration: &'a Configuration,
    product: &'a ProductModel,
    validity: &'a CombinationValidity,
    cascades: &'a [Cascade],
}

/// Runs `selections` through a session and prints the outcome.
pub(crate) fn configure(
    registry: Arc<ModelRegistry>,
    key: &str,
    selections: &[(String, String)],
    json: bool,
) -> Result<()> {
    let mut session = Session::new(registry, key)?;
    let mut cascades = Vec::new();

    for (step, option) in selections {
        let cleared = session.select(step, option).with_context(|| format!("Selecting {step}={option}"))?;
        if !cleared.is_empty() {
            cascades.push(Cascade { selected: format!("{step}={option}"), cleared });
        }
    }

    let product = session.product_model()?;
    let validity = session.validate();

    if json {
        let report = Report {
            model: session.model().id().as_str(),
            configuration: session.configuration(),
            product: &product,
            validity: &validity,
            cascades: &cascades,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for cascade in &cascades {
        let cleared: Vec<&str> = cascade.cleared.iter().map(StepId::as_str).collect();
        println!("{} cleared {}", cascade.selected, cleared.join(", "));
    }

    println!("code:     {}", product.code);
    if product.is_complete {
        println!("complete: yes");
    } else {
        let missing: Vec<&str> = product.missing_steps.iter().map(StepId::as_str).collect();
        println!("complete: no (missing {})", missing.join(", "));
    }
    match &validity {
        CombinationValidity::Valid => println!("status:   valid"),
        CombinationValidity::Provisional => println!("status:   provisional"),
        CombinationValidity::Invalid { reason, .. } => println!("status:   invalid ({reason})"),
    }

    for step in session.definition().ordered_steps() {
        if session.configuration().is_selected(step.id.as_str()) {
            continue;
        }
        let available: Vec<&str> =
            session.available_options(step.id.as_str())?.into_iter().map(|option| option.id.as_str()).collect();
        if available.is_empty() {
            println!("  {}: nothing available", step.id);
        } else {
            println!("  {}: {}", step.id, available.join(" "));
        }
    }
    Ok(())
}
