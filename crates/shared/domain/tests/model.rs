use pcfg_domain::{ModelDefinition, OptionDef, ProductModelSchema, Separator, Step, StepId};
use serde_json::json;

fn demo() -> ModelDefinition {
    let option = |id: &str, code: &str| OptionDef::builder().id(id).label(id).code(code).build();
    ModelDefinition::builder()
        .id("demo")
        .name("Demo")
        .slug("demo")
        .steps(vec![
            Step::builder().id("colour").title("Colour").options(vec![option("R", "R")]).build(),
            Step::builder()
                .id("accessory")
                .title("Accessory")
                .required(false)
                .options(vec![option("none", "")])
                .build(),
            Step::builder().id("unused").title("Unused").options(vec![option("x", "X")]).build(),
        ])
        .step_order(vec![StepId::from("colour"), StepId::from("accessory")])
        .schema(
            ProductModelSchema::builder()
                .base_code("D")
                .parts_order(vec![StepId::from("colour"), StepId::from("accessory")])
                .separator(Separator::Dash)
                .build(),
        )
        .build()
}

#[test]
fn required_steps_ignore_steps_outside_step_order() {
    let model = demo();
    let required: Vec<_> = model.required_steps().map(StepId::as_str).collect();
    assert_eq!(required, ["colour"]);
    assert!(model.step("unused").is_some());
    assert!(!model.uses_step("unused"));
    assert_eq!(model.position("accessory"), Some(1));
}

#[test]
fn separators_resolve_per_step() {
    let map = Separator::per_step([("language", "-"), ("colour", "")]);
    assert_eq!(map.before(&StepId::from("language")), "-");
    assert_eq!(map.before(&StepId::from("colour")), "");
    assert_eq!(map.before(&StepId::from("cover")), "");
    assert_eq!(Separator::Custom("/".into()).before(&StepId::from("cover")), "/");
}

#[test]
fn definitions_read_from_camel_case_documents() {
    let raw = json!({
        "id": "doc",
        "name": "Document model",
        "slug": "doc-model",
        "steps": [{
            "id": "colour",
            "title": "Colour",
            "options": [
                { "id": "R", "label": "Red", "code": "R" },
                { "id": "G", "label": "Green", "code": "G",
                  "legacy": { "dependsOn": "cover", "availableFor": ["01"] } }
            ]
        }],
        "stepOrder": ["colour"],
        "schema": {
            "baseCode": "DOC",
            "partsOrder": ["colour"],
            "separator": { "kind": "custom", "value": "/" }
        },
        "pairwiseExact": false
    });

    let model: ModelDefinition = serde_json::from_value(raw).expect("definition");
    assert!(!model.pairwise_exact);
    assert!(model.steps[0].required);
    assert_eq!(model.schema.separator, Separator::Custom("/".into()));
    let legacy = model.option("colour", "G").and_then(|o| o.legacy.as_ref()).expect("legacy");
    assert_eq!(legacy.depends_on, "cover");
}
