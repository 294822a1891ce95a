use pcfg_allowlist::{Allowlist, AllowlistError, SchemaCodec, SkuCodec};
use pcfg_constraints::ConstraintEngine;
use pcfg_domain::{
    CombinationValidity, Configuration, ConstraintMatrix, ModelConstraints, ModelDefinition, OptionDef,
    OptionId, ProductModelSchema, Separator, Step, StepId,
};

const CODES: &[&str] = &[
    "WRP2-R-01", "WRP2-R-02", "WRP2-R-11",
    "WRP2-G-01-EM", "WRP2-G-01-EX", "WRP2-G-02-EM", "WRP2-G-02-EX", "WRP2-G-11-EM",
    "WRP2-Y-01-EM", "WRP2-Y-01-EV", "WRP2-Y-02-EM", "WRP2-Y-02-EV", "WRP2-Y-11-EM", "WRP2-Y-11-EV",
];

fn option(id: &str, code: &str) -> OptionDef {
    OptionDef::builder().id(id).label(id).code(code).build()
}

fn step(id: &str, options: Vec<OptionDef>) -> Step {
    Step::builder().id(id).title(id).options(options).build()
}

fn waterproof() -> ModelDefinition {
    ModelDefinition::builder()
        .id("waterproof")
        .name("Waterproof call point")
        .slug("waterproof")
        .steps(vec![
            step("colour", vec![option("R", "R"), option("G", "G"), option("Y", "Y")]),
            step("electricalArrangement", vec![option("01", "01"), option("02", "02"), option("11", "11")]),
            step("label", vec![option("HF", ""), option("EM", "EM"), option("EX", "EX"), option("EV", "EV")]),
        ])
        .step_order(["colour", "electricalArrangement", "label"].map(StepId::from).to_vec())
        .schema(
            ProductModelSchema::builder()
                .base_code("WRP2")
                .parts_order(["colour", "electricalArrangement", "label"].map(StepId::from).to_vec())
                .separator(Separator::Dash)
                .build(),
        )
        .pairwise_exact(false)
        .build()
}

fn engine() -> ConstraintEngine {
    ConstraintEngine::new(
        ModelConstraints::new("waterproof")
            .with(
                "colour",
                "label",
                ConstraintMatrix::from_rows([
                    ("R", &["HF"][..]),
                    ("G", &["EM", "EX"][..]),
                    ("Y", &["EM", "EV"][..]),
                ]),
            )
            .with(
                "label",
                "colour",
                ConstraintMatrix::from_rows([
                    ("HF", &["R"][..]),
                    ("EM", &["G", "Y"][..]),
                    ("EX", &["G"][..]),
                    ("EV", &["Y"][..]),
                ]),
            ),
    )
}

fn allowlist() -> Allowlist {
    let definition = waterproof();
    Allowlist::new(&definition, Box::new(SchemaCodec::new(&definition)), CODES.iter().copied()).unwrap()
}

fn configured(pairs: &[(&str, &str)]) -> Configuration {
    Configuration::with_selections(&waterproof(), pairs.iter().copied())
}

#[test]
fn incomplete_selections_are_provisional() {
    let allowlist = allowlist();
    assert_eq!(allowlist.is_valid_combination(&configured(&[("colour", "G")])), CombinationValidity::Provisional);
}

#[test]
fn complete_selections_must_be_listed() {
    let allowlist = allowlist();
    let listed = configured(&[("colour", "R"), ("electricalArrangement", "02"), ("label", "HF")]);
    assert!(allowlist.is_valid_combination(&listed).is_valid());

    let unlisted = configured(&[("colour", "G"), ("electricalArrangement", "11"), ("label", "EX")]);
    assert_eq!(
        allowlist.is_valid_combination(&unlisted),
        CombinationValidity::Invalid {
            code: "WRP2-G-11-EX".into(),
            reason: "No manufactured product matches code WRP2-G-11-EX".into(),
        }
    );
}

#[test]
fn valid_options_ignore_the_queried_step() {
    let allowlist = allowlist();
    let config = configured(&[("colour", "G"), ("electricalArrangement", "11"), ("label", "EM")]);

    assert_eq!(allowlist.valid_options_for_step("label", &config), [OptionId::from("EM")]);
    assert_eq!(
        allowlist.valid_options_for_step("colour", &config),
        ["G", "Y"].map(OptionId::from)
    );
    assert!(allowlist.has_completion(&configured(&[("colour", "Y"), ("label", "EV")])));
    assert!(!allowlist.has_completion(&configured(&[("colour", "R"), ("label", "EV")])));
}

#[test]
fn false_positives_are_the_pairwise_gaps() {
    let allowlist = allowlist();
    let engine = engine();

    assert!(allowlist.coverage_gaps(&engine).is_empty());
    assert_eq!(allowlist.false_positives(&engine, &waterproof()), ["WRP2-G-11-EX"]);
}

#[test]
fn authoring_errors_are_rejected() {
    let definition = waterproof();
    let codec = || Box::new(SchemaCodec::new(&definition));

    let err = Allowlist::new(&definition, codec(), ["WRP2-R-01", "WRP2-R-01"]).unwrap_err();
    assert!(matches!(err, AllowlistError::Duplicate { ref code, .. } if code == "WRP2-R-01"));

    let err = Allowlist::new(&definition, codec(), ["WRP2-Q-01"]).unwrap_err();
    assert!(matches!(err, AllowlistError::Unparseable { .. }));
    assert_eq!(err.to_string(), "Allowlist entry does not parse (model waterproof): WRP2-Q-01");
}

#[test]
fn round_trip_law_is_enforced_for_custom_codecs() {
    #[derive(Debug)]
    struct Lossy(SchemaCodec);

    impl SkuCodec for Lossy {
        fn build(&self, config: &Configuration) -> Option<String> {
            self.0.build(config).map(|code| code.to_lowercase())
        }

        fn parse(&self, code: &str) -> Option<Configuration> {
            self.0.parse(code)
        }
    }

    let definition = waterproof();
    let err = Allowlist::new(&definition, Box::new(Lossy(SchemaCodec::new(&definition))), ["WRP2-R-01"])
        .unwrap_err();
    assert!(matches!(err, AllowlistError::RoundTrip { ref rebuilt, .. } if rebuilt == "wrp2-r-01"));
}
