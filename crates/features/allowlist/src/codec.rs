use pcfg_domain::{Configuration, ModelDefinition, OptionId, StepId};
use pcfg_product_code::build_product_model;
use std::fmt;

/// Translates between a configuration and a product code.
///
/// `build` returns `None` while any required field is unselected; a field rendered as nothing
/// (a no-suffix option) must still be selected explicitly. `parse` returns `None` for any string
/// outside the model's code grammar, and for every code it accepts `build(parse(code)) == code`.
pub trait SkuCodec: fmt::Debug + Send + Sync {
    fn build(&self, config: &Configuration) -> Option<String>;
    fn parse(&self, code: &str) -> Option<Configuration>;
}

/// Codec driven by a model's [`pcfg_domain::ProductModelSchema`] and option code fragments.
///
/// Parsing walks `parts_order` and tries every option of each step against the remaining
/// input, backtracking on dead ends, so fragments that are prefixes of each other (`S` and
/// `S2`) resolve correctly.
#[derive(Debug, Clone)]
pub struct SchemaCodec {
    definition: ModelDefinition,
}

#[derive(Debug)]
struct PartGrammar<'a> {
    step: &'a StepId,
    separator: &'a str,
    required: bool,
    options: Vec<(&'a OptionId, &'a str)>,
}

impl SchemaCodec {
    #[must_use]
    pub fn new(definition: &ModelDefinition) -> Self {
        Self { definition: definition.clone() }
    }

    fn grammar(&self) -> Vec<PartGrammar<'_>> {
        let schema = &self.definition.schema;
        schema
            .parts_order
            .iter()
            .filter(|step_id| self.definition.uses_step(step_id.as_str()))
            .filter_map(|step_id| {
                let step = self.definition.step(step_id.as_str())?;
                Some(PartGrammar {
                    step: step_id,
                    separator: schema.separator.before(step_id),
                    required: step.required,
                    options: step.options.iter().map(|o| (&o.id, o.code.as_str())).collect(),
                })
            })
            .collect()
    }
}

impl SkuCodec for SchemaCodec {
    fn build(&self, config: &Configuration) -> Option<String> {
        let product = build_product_model(&self.definition, config).ok()?;
        product.is_complete.then_some(product.code)
    }

    fn parse(&self, code: &str) -> Option<Configuration> {
        let base = self.definition.schema.base_code.as_str();
        if !code.starts_with(base) {
            return None;
        }
        let grammar = self.grammar();
        let mut config = Configuration::for_model(&self.definition);

        if !descend(&grammar, code, base.len(), &mut config) {
            return None;
        }
        (self.build(&config).as_deref() == Some(code)).then_some(config)
    }
}

/// Depth-first match of `parts` against `code[position..]`, writing choices into `config`.
fn descend(parts: &[PartGrammar<'_>], code: &str, position: usize, config: &mut Configuration) -> bool {
    let Some((part, remaining_parts)) = parts.split_first() else {
        return position == code.len();
    };
    let rest = &code[position..];

    for &(option, fragment) in &part.options {
        let consumed = if fragment.is_empty() {
            Some(0)
        } else {
            let separator = if position == 0 { "" } else { part.separator };
            rest.strip_prefix(separator)
                .and_then(|after| after.strip_prefix(fragment))
                .map(|after| rest.len() - after.len())
        };

        if let Some(consumed) = consumed {
            config.set(part.step.as_str(), Some(option.clone()));
            if descend(remaining_parts, code, position + consumed, config) {
                return true;
            }
        }
    }

    config.set(part.step.as_str(), None);
    !part.required && descend(remaining_parts, code, position, config)
}
