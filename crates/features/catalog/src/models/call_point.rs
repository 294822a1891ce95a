//! ReSet Call Point. The pairwise matrices admit combinations that are not manufactured
//! (e.g. green flush with a `11` arrangement), so the allowlist is the final gate.
//!
//! Code grammar: `RP-{colour}{mounting}-{arrangement}[-{label}]`, where the standard
//! heart-and-flame label (`HF`) is the empty suffix.

use super::{AllowlistSource, CatalogEntry, Rows, matrix, option, order, step};
use pcfg_allowlist::SkuCodec;
use pcfg_domain::{
    Configuration, ModelConstraints, ModelDefinition, OptionId, ProductModelSchema, Separator, StepId,
};

pub const ID: &str = "reset-call-point";

const COLOURS: &[&str] = &["R", "G", "Y", "W", "B", "O"];
const MOUNTINGS: &[&str] = &["F", "S", "S2"];
const ARRANGEMENTS: &[&str] = &["01", "02", "05", "11"];
const LABELS: &[&str] = &["HF", "EM", "DR", "EX", "EV", "LD", "CU"];
const STANDARD_LABEL: &str = "HF";

const COLOUR_TO_MOUNTING: Rows = &[
    ("R", &["F", "S", "S2"]),
    ("G", &["F", "S", "S2"]),
    ("Y", &["F", "S", "S2"]),
    ("W", &["F", "S", "S2"]),
    ("B", &["F", "S", "S2"]),
    ("O", &["S", "S2"]),
];

const COLOUR_TO_ARRANGEMENT: Rows = &[
    ("R", &["01", "02", "05", "11"]),
    ("G", &["01", "02", "11"]),
    ("Y", &["01", "02", "11"]),
    ("W", &["01", "02", "11"]),
    ("B", &["01", "02", "11"]),
    ("O", &["01", "02", "11"]),
];

const COLOUR_TO_LABEL: Rows = &[
    ("R", &["HF"]),
    ("G", &["EM", "DR", "EX"]),
    ("Y", &["EM", "EV", "CU"]),
    ("W", &["EM", "EX", "LD", "CU"]),
    ("B", &["EM", "LD", "CU"]),
    ("O", &["EM", "EV", "CU"]),
];

const MOUNTING_TO_COLOUR: Rows = &[
    ("F", &["R", "G", "Y", "W", "B"]),
    ("S", &["R", "G", "Y", "W", "B", "O"]),
    ("S2", &["R", "G", "Y", "W", "B", "O"]),
];

const ARRANGEMENT_TO_COLOUR: Rows = &[
    ("01", &["R", "G", "Y", "W", "B", "O"]),
    ("02", &["R", "G", "Y", "W", "B", "O"]),
    ("05", &["R"]),
    ("11", &["R", "G", "Y", "W", "B", "O"]),
];

const ARRANGEMENT_TO_LABEL: Rows = &[
    ("01", &["HF", "EM", "EX", "EV", "LD", "CU"]),
    ("02", &["HF", "EM", "DR", "EX", "EV", "LD", "CU"]),
    ("05", &["HF"]),
    ("11", &["HF", "EM", "EX", "EV", "CU"]),
];

const LABEL_TO_COLOUR: Rows = &[
    ("HF", &["R"]),
    ("EM", &["G", "Y", "W", "B", "O"]),
    ("DR", &["G"]),
    ("EX", &["G", "W"]),
    ("EV", &["Y", "O"]),
    ("LD", &["W", "B"]),
    ("CU", &["Y", "W", "B", "O"]),
];

const LABEL_TO_ARRANGEMENT: Rows = &[
    ("HF", &["01", "02", "05", "11"]),
    ("EM", &["01", "02", "11"]),
    ("DR", &["02"]),
    ("EX", &["01", "02", "11"]),
    ("EV", &["01", "02", "11"]),
    ("LD", &["01", "02"]),
    ("CU", &["01", "02", "11"]),
];

const ALLOWLIST: &[&str] = &[
    "RP-RF-01", "RP-RF-02", "RP-RF-05", "RP-RF-11", "RP-RS-01", "RP-RS-02",
    "RP-RS-05", "RP-RS-11", "RP-RS2-01", "RP-RS2-02", "RP-RS2-05", "RP-RS2-11",
    "RP-GF-01-EM", "RP-GF-01-EX", "RP-GF-02-EM", "RP-GF-02-DR", "RP-GF-02-EX", "RP-GS-01-EM",
    "RP-GS-01-EX", "RP-GS-02-EM", "RP-GS-02-DR", "RP-GS-02-EX", "RP-GS-11-EM", "RP-GS-11-EX",
    "RP-GS2-02-EM", "RP-GS2-02-DR", "RP-GS2-02-EX", "RP-GS2-11-EM", "RP-GS2-11-EX", "RP-YF-01-EM",
    "RP-YF-01-EV", "RP-YF-01-CU", "RP-YF-02-EM", "RP-YF-02-EV", "RP-YF-02-CU", "RP-YS-01-EM",
    "RP-YS-01-EV", "RP-YS-01-CU", "RP-YS-02-EM", "RP-YS-02-EV", "RP-YS-02-CU", "RP-YS-11-EM",
    "RP-YS-11-EV", "RP-YS-11-CU", "RP-YS2-01-EM", "RP-YS2-01-EV", "RP-YS2-01-CU", "RP-YS2-02-EM",
    "RP-YS2-02-EV", "RP-YS2-02-CU", "RP-YS2-11-EM", "RP-YS2-11-EV", "RP-YS2-11-CU", "RP-WF-01-EM",
    "RP-WF-01-EX", "RP-WF-01-LD", "RP-WF-01-CU", "RP-WF-02-EM", "RP-WF-02-EX", "RP-WF-02-LD",
    "RP-WF-02-CU", "RP-WS-01-EM", "RP-WS-01-EX", "RP-WS-01-LD", "RP-WS-01-CU", "RP-WS-02-EM",
    "RP-WS-02-EX", "RP-WS-02-LD", "RP-WS-02-CU", "RP-WS-11-EM", "RP-WS-11-EX", "RP-WS-11-CU",
    "RP-WS2-01-EM", "RP-WS2-01-EX", "RP-WS2-01-LD", "RP-WS2-01-CU", "RP-WS2-02-EM", "RP-WS2-02-EX",
    "RP-WS2-02-LD", "RP-WS2-02-CU", "RP-WS2-11-EM", "RP-WS2-11-EX", "RP-WS2-11-CU", "RP-BF-01-EM",
    "RP-BF-01-LD", "RP-BF-01-CU", "RP-BF-02-EM", "RP-BF-02-LD", "RP-BF-02-CU", "RP-BS-01-EM",
    "RP-BS-01-LD", "RP-BS-01-CU", "RP-BS-02-EM", "RP-BS-02-LD", "RP-BS-02-CU", "RP-BS-11-EM",
    "RP-BS-11-CU", "RP-BS2-01-EM", "RP-BS2-01-LD", "RP-BS2-02-EM", "RP-BS2-02-LD", "RP-BS2-11-EM",
    "RP-OS-01-EM", "RP-OS-01-EV", "RP-OS-01-CU", "RP-OS-02-EM", "RP-OS-02-EV", "RP-OS-02-CU",
    "RP-OS-11-EM", "RP-OS-11-EV", "RP-OS-11-CU", "RP-OS2-01-EM", "RP-OS2-01-EV", "RP-OS2-02-EM",
    "RP-OS2-02-EV", "RP-OS2-11-EM", "RP-OS2-11-EV",
];

#[must_use]
pub fn definition() -> ModelDefinition {
    let steps = ["colour", "mounting", "electricalArrangement", "label"];
    ModelDefinition::builder()
        .id(ID)
        .name("ReSet Call Point")
        .slug("reset-call-point")
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
                    option("O", "Orange", "O"),
                ],
            ),
            step(
                "mounting",
                "Mounting",
                vec![
                    option("F", "Flush mount", "F"),
                    option("S", "Surface mount", "S"),
                    option("S2", "Surface mount, deep back box", "S2"),
                ],
            ),
            step(
                "electricalArrangement",
                "Electrical arrangement",
                vec![
                    option("01", "Single pole changeover", "01"),
                    option("02", "Double pole changeover", "02"),
                    option("05", "Single pole with 470 ohm resistor", "05"),
                    option("11", "Single pole with 680 ohm resistor and LED", "11"),
                ],
            ),
            step(
                "label",
                "Label",
                vec![
                    option(STANDARD_LABEL, "Heart and flame", ""),
                    option("EM", "Emergency", "EM"),
                    option("DR", "Emergency door release", "DR"),
                    option("EX", "Emergency exit", "EX"),
                    option("EV", "Evacuate", "EV"),
                    option("LD", "Lockdown", "LD"),
                    option("CU", "Custom text", "CU"),
                ],
            ),
        ])
        .step_order(order(&steps))
        .schema(
            ProductModelSchema::builder()
                .base_code("RP")
                .parts_order(order(&steps))
                .separator(Separator::per_step([
                    ("colour", "-"),
                    ("mounting", ""),
                    ("electricalArrangement", "-"),
                    ("label", "-"),
                ]))
                .build(),
        )
        .primary_dependency_step("colour")
        .pairwise_exact(false)
        .build()
}

#[must_use]
pub fn constraints() -> ModelConstraints {
    ModelConstraints::new(ID)
        .with("colour", "mounting", matrix(COLOUR_TO_MOUNTING))
        .with("mounting", "colour", matrix(MOUNTING_TO_COLOUR))
        .with("colour", "electricalArrangement", matrix(COLOUR_TO_ARRANGEMENT))
        .with("electricalArrangement", "colour", matrix(ARRANGEMENT_TO_COLOUR))
        .with("colour", "label", matrix(COLOUR_TO_LABEL))
        .with("label", "colour", matrix(LABEL_TO_COLOUR))
        .with("electricalArrangement", "label", matrix(ARRANGEMENT_TO_LABEL))
        .with("label", "electricalArrangement", matrix(LABEL_TO_ARRANGEMENT))
}

#[must_use]
pub fn entry() -> CatalogEntry {
    CatalogEntry {
        definition: definition(),
        constraints: constraints(),
        allowlist: Some(AllowlistSource::custom(ALLOWLIST.iter().copied(), Box::new(CallPointCodec::new()))),
    }
}

/// Hand-written codec for the `RP-` grammar.
#[derive(Debug, Clone)]
pub struct CallPointCodec {
    step_order: Vec<StepId>,
}

impl CallPointCodec {
    #[must_use]
    pub fn new() -> Self {
        Self { step_order: order(&["colour", "mounting", "electricalArrangement", "label"]) }
    }
}

impl Default for CallPointCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl SkuCodec for CallPointCodec {
    fn build(&self, config: &Configuration) -> Option<String> {
        let colour = known(COLOURS, config.get("colour")?.as_str())?;
        let mounting = known(MOUNTINGS, config.get("mounting")?.as_str())?;
        let arrangement = known(ARRANGEMENTS, config.get("electricalArrangement")?.as_str())?;
        let label = known(LABELS, config.get("label")?.as_str())?;

        let mut code = format!("RP-{colour}{mounting}-{arrangement}");
        if label != STANDARD_LABEL {
            code.push('-');
            code.push_str(label);
        }
        Some(code)
    }

    fn parse(&self, code: &str) -> Option<Configuration> {
        let body = code.strip_prefix("RP-")?;
        let mut fields = body.split('-');
        let head = fields.next()?;
        let arrangement = fields.next()?;
        // The standard label is only ever encoded as a missing suffix.
        let label = match fields.next() {
            None => STANDARD_LABEL,
            Some(STANDARD_LABEL) => return None,
            Some(label) => label,
        };
        if fields.next().is_some() {
            return None;
        }

        let colour = COLOURS.iter().find(|colour| head.starts_with(**colour))?;
        let mounting = known(MOUNTINGS, &head[colour.len()..])?;
        let arrangement = known(ARRANGEMENTS, arrangement)?;
        let label = known(LABELS, label)?;

        let mut config = Configuration::new(self.step_order.iter().cloned());
        for (step, value) in [
            ("colour", *colour),
            ("mounting", mounting),
            ("electricalArrangement", arrangement),
            ("label", label),
        ] {
            config.set(step, Some(OptionId::from(value)));
        }
        Some(config)
    }
}

fn known<'a>(options: &[&'a str], value: &str) -> Option<&'a str> {
    options.iter().copied().find(|option| *option == value)
}
