//! Universal Stopper. No dependencies between steps; the accessory is optional.

use super::{CatalogEntry, option, order, step};
use pcfg_domain::{ModelConstraints, ModelDefinition, ProductModelSchema, Separator, Step};

pub const ID: &str = "universal-stopper";

#[must_use]
pub fn definition() -> ModelDefinition {
    let steps = ["cover", "mounting", "accessory"];
    ModelDefinition::builder()
        .id(ID)
        .name("Universal Stopper")
        .slug("universal-stopper")
        .steps(vec![
            step(
                "cover",
                "Cover",
                vec![
                    option("000", "Low-profile cover", "000"),
                    option("010", "Dome cover", "010"),
                    option("020", "Shield cover", "020"),
                ],
            ),
            step(
                "mounting",
                "Mounting",
                vec![option("surface", "Surface mount", ""), option("flush", "Flush mount", "FR")],
            ),
            Step::builder()
                .id("accessory")
                .title("Accessory")
                .required(false)
                .options(vec![
                    option("none", "None", ""),
                    option("horn", "Integral horn", "E"),
                    option("label-kit", "Label kit", "LK"),
                ])
                .build(),
        ])
        .step_order(order(&steps))
        .schema(
            ProductModelSchema::builder()
                .base_code("STI-13")
                .parts_order(order(&steps))
                .separator(Separator::per_step([("accessory", "-")]))
                .build(),
        )
        .build()
}

#[must_use]
pub fn entry() -> CatalogEntry {
    CatalogEntry { definition: definition(), constraints: ModelConstraints::new(ID), allowlist: None }
}
