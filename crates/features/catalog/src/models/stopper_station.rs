//! Stopper Station. An older catalog entry: the turn-to-reset activation still carries its
//! single-parent cover dependency, which the registry migrates into matrices at startup.

use super::{CatalogEntry, Rows, matrix, option, order, step};
use pcfg_domain::{
    LegacyDependency, ModelConstraints, ModelDefinition, OptionDef, ProductModelSchema, Separator,
};

pub const ID: &str = "stopper-station";

const COLOUR_TO_TEXT: Rows = &[
    ("0", &["FI", "EV", "NT"]),
    ("1", &["EM", "NT"]),
    ("2", &["EM", "EV", "NT"]),
    ("3", &["FI", "EM", "EV", "NT"]),
    ("4", &["EM", "NT"]),
];

const TEXT_TO_COLOUR: Rows = &[
    ("FI", &["0", "3"]),
    ("EM", &["1", "2", "3", "4"]),
    ("EV", &["0", "2", "3"]),
    ("NT", &["0", "1", "2", "3", "4"]),
];

#[must_use]
pub fn definition() -> ModelDefinition {
    let steps = ["colour", "cover", "activation", "text", "language"];
    let turn_to_reset = OptionDef::builder()
        .id("5")
        .label("Turn-to-reset")
        .code("5")
        .note("Only supplied with the shield cover")
        .legacy(LegacyDependency { depends_on: "cover".into(), available_for: vec!["2".into()] })
        .build();

    ModelDefinition::builder()
        .id(ID)
        .name("Stopper Station")
        .slug("stopper-station")
        .steps(vec![
            step(
                "colour",
                "Colour",
                vec![
                    option("0", "Red", "0"),
                    option("1", "Green", "1"),
                    option("2", "Yellow", "2"),
                    option("3", "White", "3"),
                    option("4", "Blue", "4"),
                ],
            ),
            step(
                "cover",
                "Cover",
                vec![
                    option("0", "No cover", "0"),
                    option("1", "Low-profile cover", "1"),
                    option("2", "Shield cover", "2"),
                ],
            ),
            step(
                "activation",
                "Activation",
                vec![
                    option("0", "Key reset", "0"),
                    option("4", "Momentary push", "4"),
                    turn_to_reset,
                ],
            ),
            step(
                "text",
                "Text",
                vec![
                    option("FI", "Fire", "FI"),
                    option("EM", "Emergency", "EM"),
                    option("EV", "Evacuate", "EV"),
                    option("NT", "No text", ""),
                ],
            ),
            step(
                "language",
                "Language",
                vec![option("EN", "English", "EN"), option("ES", "Spanish", "ES"), option("FR", "French", "FR")],
            ),
        ])
        .step_order(order(&steps))
        .schema(
            ProductModelSchema::builder()
                .base_code("SS2")
                .parts_order(order(&steps))
                .separator(Separator::per_step([("language", "-")]))
                .build(),
        )
        .primary_dependency_step("colour")
        .build()
}

#[must_use]
pub fn constraints() -> ModelConstraints {
    ModelConstraints::new(ID)
        .with("colour", "text", matrix(COLOUR_TO_TEXT))
        .with("text", "colour", matrix(TEXT_TO_COLOUR))
}

#[must_use]
pub fn entry() -> CatalogEntry {
    CatalogEntry { definition: definition(), constraints: constraints(), allowlist: None }
}
