use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pcfg_allowlist::{Allowlist, SchemaCodec};
use pcfg_domain::{Configuration, ModelDefinition, OptionDef, ProductModelSchema, Separator, Step, StepId};

const STEPS: [(&str, usize); 4] = [("colour", 6), ("mounting", 3), ("arrangement", 4), ("label", 7)];

fn model() -> ModelDefinition {
    let steps = STEPS
        .iter()
        .map(|(id, count)| {
            let options = (0..*count)
                .map(|n| {
                    let code = format!("{}{n}", &id[..1].to_uppercase());
                    OptionDef::builder().id(code.as_str()).label(code.as_str()).code(code.as_str()).build()
                })
                .collect();
            Step::builder().id(*id).title(*id).options(options).build()
        })
        .collect();
    let order: Vec<StepId> = STEPS.iter().map(|(id, _)| StepId::from(*id)).collect();

    ModelDefinition::builder()
        .id("bench")
        .name("Bench")
        .slug("bench")
        .steps(steps)
        .step_order(order.clone())
        .schema(ProductModelSchema::builder().base_code("B").parts_order(order).separator(Separator::Dash).build())
        .build()
}

fn every_code(definition: &ModelDefinition) -> Vec<String> {
    let mut codes = vec![definition.schema.base_code.clone()];
    for step in &definition.steps {
        codes = codes
            .iter()
            .flat_map(|prefix| step.options.iter().map(move |option| format!("{prefix}-{}", option.code)))
            .collect();
    }
    codes
}

fn bench_valid_options(c: &mut Criterion) {
    let definition = model();
    let codes = every_code(&definition);
    let allowlist = Allowlist::new(&definition, Box::new(SchemaCodec::new(&definition)), codes).unwrap();

    let mut group = c.benchmark_group("valid_options_for_step");
    let empty = Configuration::for_model(&definition);
    let fixed = Configuration::with_selections(&definition, [("colour", "C1"), ("arrangement", "A2")]);

    for (label, config) in [("empty", &empty), ("two_fixed", &fixed)] {
        group.bench_with_input(BenchmarkId::new("label", label), config, |b, config| {
            b.iter(|| allowlist.valid_options_for_step("label", config));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_valid_options);
criterion_main!(benches);
