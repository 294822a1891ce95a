//! Human-readable block reasons.

use pcfg_domain::{BlockReason, ModelDefinition};
use pcfg_kernel::labels::{LabelLookup, option_label, step_title};

/// Renders `reason` through `labels`, falling back to catalog titles and labels.
///
/// ```text
/// Not available with Colour: Red
/// No manufactured product combines this option with Colour: Green, Mounting: Flush
/// ```
#[must_use]
pub fn describe_reason(model: &ModelDefinition, reason: &BlockReason, labels: &dyn LabelLookup) -> String {
    match reason {
        BlockReason::Matrix { step, option } => format!(
            "Not available with {}: {}",
            step_title(labels, model, step.as_str()),
            option_label(labels, model, step.as_str(), option.as_str())
        ),
        BlockReason::Allowlist { fixed } => {
            let fixed: Vec<String> = fixed
                .iter()
                .filter_map(|selection| {
                    let option = selection.option.as_ref()?;
                    let step = selection.step.as_str();
                    Some(format!(
                        "{}: {}",
                        step_title(labels, model, step),
                        option_label(labels, model, step, option.as_str())
                    ))
                })
                .collect();

            if fixed.is_empty() {
                "No manufactured product offers this option".to_owned()
            } else {
                format!("No manufactured product combines this option with {}", fixed.join(", "))
            }
        },
    }
}
