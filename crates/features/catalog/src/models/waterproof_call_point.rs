//! ReSet Waterproof Call Point. Two pairwise-consistent tuples are not manufactured
//! (`WRP2-G-11-EX`, `WRP2-W-11-CU`), so the allowlist gates completion. The schema codec
//! decodes its codes.

use super::{AllowlistSource, CatalogEntry, Rows, matrix, option, order, step};
use pcfg_domain::{ModelConstraints, ModelDefinition, ProductModelSchema, Separator};

pub const ID: &str = "waterproof-call-point";

const COLOUR_TO_LABEL: Rows = &[
    ("R", &["HF"]),
    ("G", &["EM", "EX"]),
    ("Y", &["EM", "EV", "CU"]),
    ("W", &["EM", "EX", "CU"]),
    ("B", &["EM", "CU"]),
];

const LABEL_TO_COLOUR: Rows = &[
    ("HF", &["R"]),
    ("EM", &["G", "Y", "W", "B"]),
    ("EX", &["G", "W"]),
    ("EV", &["Y"]),
    ("CU", &["Y", "W", "B"]),
];

const ALLOWLIST: &[&str] = &[
    "WRP2-R-01", "WRP2-R-02", "WRP2-R-11", "WRP2-G-01-EM", "WRP2-G-01-EX", "WRP2-G-02-EM",
    "WRP2-G-02-EX", "WRP2-G-11-EM", "WRP2-Y-01-EM", "WRP2-Y-01-EV", "WRP2-Y-01-CU", "WRP2-Y-02-EM",
    "WRP2-Y-02-EV", "WRP2-Y-02-CU", "WRP2-Y-11-EM", "WRP2-Y-11-EV", "WRP2-Y-11-CU", "WRP2-W-01-EM",
    "WRP2-W-01-EX", "WRP2-W-01-CU", "WRP2-W-02-EM", "WRP2-W-02-EX", "WRP2-W-02-CU", "WRP2-W-11-EM",
    "WRP2-W-11-EX", "WRP2-B-01-EM", "WRP2-B-01-CU", "WRP2-B-02-EM", "WRP2-B-02-CU", "WRP2-B-11-EM",
    "WRP2-B-11-CU",
];

#[must_use]
pub fn definition() -> ModelDefinition {
    let steps = ["colour", "electricalArrangement", "label"];
    ModelDefinition::builder()
        .id(ID)
        .name("ReSet Waterproof Call Point")
        .slug("waterproof-call-point")
        .steps(vec![
            step(
                "colour",
                "Colour",
                vec![
                    option("R", "Red", "R"),
                    option("G", "Green", "G"),
                    option("Y", "Yellow", "Y"),
                    option("W", "White", "W"),
                    option("B", "Blue", "B"),
                ],
            ),
            step(
                "electricalArrangement",
                "Electrical arrangement",
                vec![
                    option("01", "Single pole changeover", "01"),
                    option("02", "Double pole changeover", "02"),
                    option("11", "Single pole with 680 ohm resistor and LED", "11"),
                ],
            ),
            step(
                "label",
                "Label",
                vec![
                    option("HF", "Heart and flame", ""),
                    option("EM", "Emergency", "EM"),
                    option("EX", "Emergency exit", "EX"),
                    option("EV", "Evacuate", "EV"),
                    option("CU", "Custom text", "CU"),
                ],
            ),
        ])
        .step_order(order(&steps))
        .schema(
            ProductModelSchema::builder()
                .base_code("WRP2")
                .parts_order(order(&steps))
                .separator(Separator::Dash)
                .build(),
        )
        .primary_dependency_step("colour")
        .pairwise_exact(false)
        .build()
}

#[must_use]
pub fn constraints() -> ModelConstraints {
    ModelConstraints::new(ID)
        .with("colour", "label", matrix(COLOUR_TO_LABEL))
        .with("label", "colour", matrix(LABEL_TO_COLOUR))
}

#[must_use]
pub fn entry() -> CatalogEntry {
    CatalogEntry {
        definition: definition(),
        constraints: constraints(),
        allowlist: Some(AllowlistSource::schema(ALLOWLIST.iter().copied())),
    }
}
