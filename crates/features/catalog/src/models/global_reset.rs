//! Global ReSet: resettable call point. Matrix-governed; every pairwise-consistent tuple is
//! manufactured.

use super::{CatalogEntry, Rows, matrix, option, order, step};
use pcfg_domain::{ModelConstraints, ModelDefinition, ProductModelSchema, Separator};

pub const ID: &str = "global-reset";

const COLOUR_TO_TEXT: Rows = &[
    ("0", &["FI", "EM", "EV", "NT"]),
    ("1", &["EM", "RM", "EX", "DR", "NT"]),
    ("2", &["EM", "EV", "NT"]),
    ("3", &["EM", "EX", "LD", "EV", "DR", "NT"]),
    ("4", &["EM", "LD", "NT"]),
    ("5", &["EM", "EV", "NT"]),
];

const TEXT_TO_COLOUR: Rows = &[
    ("FI", &["0"]),
    ("EM", &["0", "1", "2", "3", "4", "5"]),
    ("RM", &["1"]),
    ("EX", &["1", "3"]),
    ("LD", &["3", "4"]),
    ("EV", &["0", "2", "3", "5"]),
    ("DR", &["1", "3"]),
    ("NT", &["0", "1", "2", "3", "4", "5"]),
];

const TEXT_TO_LANGUAGE: Rows = &[
    ("FI", &["EN", "ES", "FR", "DE", "NL", "IT"]),
    ("EM", &["EN", "ES", "FR", "DE", "NL", "IT"]),
    ("RM", &["EN", "ES", "FR", "DE", "NL", "IT"]),
    ("EX", &["EN", "ES", "FR"]),
    ("LD", &["EN", "ES"]),
    ("EV", &["EN", "ES", "FR", "DE", "NL", "IT"]),
    ("DR", &["EN", "FR", "DE"]),
    ("NT", &["EN", "ES", "FR", "DE", "NL", "IT"]),
];

const LANGUAGE_TO_TEXT: Rows = &[
    ("EN", &["FI", "EM", "RM", "EX", "LD", "EV", "DR", "NT"]),
    ("ES", &["FI", "EM", "RM", "EX", "LD", "EV", "NT"]),
    ("FR", &["FI", "EM", "RM", "EX", "EV", "DR", "NT"]),
    ("DE", &["FI", "EM", "RM", "EV", "DR", "NT"]),
    ("NL", &["FI", "EM", "RM", "EV", "NT"]),
    ("IT", &["FI", "EM", "RM", "EV", "NT"]),
];

#[must_use]
pub fn definition() -> ModelDefinition {
    let steps = ["colour", "cover", "text", "language"];
    ModelDefinition::builder()
        .id(ID)
        .name("Global ReSet")
        .slug("global-reset")
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
                    option("5", "Orange", "5"),
                ],
            ),
            step(
                "cover",
                "Cover",
                vec![
                    option("00", "No cover", "00"),
                    option("01", "Hinged cover", "01"),
                    option("02", "Sealed hinged cover", "02"),
                ],
            ),
            step(
                "text",
                "Text",
                vec![
                    option("FI", "Fire", "FI"),
                    option("EM", "Emergency", "EM"),
                    option("RM", "Running man symbol", "RM"),
                    option("EX", "Emergency exit", "EX"),
                    option("LD", "Lockdown", "LD"),
                    option("EV", "Evacuate", "EV"),
                    option("DR", "Emergency door release", "DR"),
                    option("NT", "No text", ""),
                ],
            ),
            step(
                "language",
                "Language",
                vec![
                    option("EN", "English", "EN"),
                    option("ES", "Spanish", "ES"),
                    option("FR", "French", "FR"),
                    option("DE", "German", "DE"),
                    option("NL", "Dutch", "NL"),
                    option("IT", "Italian", "IT"),
                ],
            ),
        ])
        .step_order(order(&steps))
        .schema(
            ProductModelSchema::builder()
                .base_code("GLR")
                .parts_order(order(&steps))
                .separator(Separator::per_step([
                    ("colour", ""),
                    ("cover", ""),
                    ("text", ""),
                    ("language", "-"),
                ]))
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
        .with("text", "language", matrix(TEXT_TO_LANGUAGE))
        .with("language", "text", matrix(LANGUAGE_TO_TEXT))
}

#[must_use]
pub fn entry() -> CatalogEntry {
    CatalogEntry { definition: definition(), constraints: constraints(), allowlist: None }
}
