use pcfg_catalog::models::{call_point, global_reset, universal_stopper};
use pcfg_catalog::{CatalogEntry, CatalogError, ModelRegistry, load_document, parse_document};
use pcfg_domain::config::RegistryConfig;
use pcfg_domain::{ConstraintMatrix, OptionId, StepConstraint};
use std::fs;

fn lenient() -> RegistryConfig {
    RegistryConfig { strict: false, ..RegistryConfig::default() }
}

#[test]
fn duplicate_models_are_rejected() {
    let err = ModelRegistry::build([global_reset::entry(), global_reset::entry()], &RegistryConfig::default())
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateModel { ref id, .. } if id == "global-reset"));
}

#[test]
fn slugs_cannot_shadow_other_ids() {
    let mut stopper = universal_stopper::entry();
    stopper.definition.slug = "global-reset".to_owned();
    let err =
        ModelRegistry::build([global_reset::entry(), stopper], &RegistryConfig::default()).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateModel { ref id, .. } if id == universal_stopper::ID));

    let mut reset = global_reset::entry();
    reset.definition.slug = "universal-stopper".to_owned();
    let err =
        ModelRegistry::build([universal_stopper::entry(), reset], &RegistryConfig::default()).unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateModel { ref id, .. } if id == "global-reset"));
}

fn asymmetric_global_reset() -> CatalogEntry {
    let mut entry = global_reset::entry();
    entry.constraints.push(StepConstraint::new(
        "colour",
        "cover",
        ConstraintMatrix::from_rows([("0", &["00"][..])]),
    ));
    entry.constraints.push(StepConstraint::new("cover", "colour", ConstraintMatrix::new()));
    entry
}

#[test]
fn asymmetric_matrices_fail_strict_builds_only() {
    let err = ModelRegistry::build([asymmetric_global_reset()], &RegistryConfig::default()).unwrap_err();
    assert!(matches!(err, CatalogError::Constraint { .. }));
    assert!(err.to_string().contains("colour=0 excludes cover=01, but cover=01 permits colour=0"));

    let registry = ModelRegistry::build([asymmetric_global_reset()], &lenient()).unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn inexact_models_need_an_allowlist() {
    let mut entry = call_point::entry();
    entry.allowlist = None;
    let err = ModelRegistry::build([entry], &RegistryConfig::default()).unwrap_err();
    assert!(matches!(err, CatalogError::MissingAllowlist { .. }));

    let mut entry = call_point::entry();
    entry.allowlist = None;
    let config = RegistryConfig { require_allowlist_for_false_positives: false, ..RegistryConfig::default() };
    let registry = ModelRegistry::build([entry], &config).unwrap();
    assert!(!registry.model(call_point::ID).unwrap().is_allowlist_governed());
}

#[test]
fn matrices_must_not_block_listed_products() {
    let mut entry = call_point::entry();
    // Green double pole units are listed; forbid them symmetrically in the matrices.
    for constraint in &mut entry.constraints.constraints {
        if constraint.source == "colour" && constraint.target == "electricalArrangement" {
            constraint.matrix.insert_row("G".into(), vec!["01".into(), "11".into()]);
        }
        if constraint.source == "electricalArrangement" && constraint.target == "colour" {
            constraint.matrix.insert_row("02".into(), ["R", "Y", "W", "B", "O"].map(OptionId::from).to_vec());
        }
    }

    let err = ModelRegistry::build([entry], &RegistryConfig::default()).unwrap_err();
    let CatalogError::CoverageGap { codes, .. } = err else {
        panic!("expected a coverage gap, got {err}");
    };
    assert!(codes.contains(&"RP-GS2-02-DR".to_owned()));
    assert!(codes.iter().all(|code| code.starts_with("RP-G") && code.contains("-02")));
}

#[test]
fn malformed_allowlist_entries_always_fail() {
    let mut entry = call_point::entry();
    if let Some(source) = entry.allowlist.as_mut() {
        source.codes.push("RP-RS2-02-HF".to_owned());
    }
    let err = ModelRegistry::build([entry], &lenient()).unwrap_err();
    assert!(matches!(err, CatalogError::Allowlist { .. }));
    assert!(err.to_string().contains("RP-RS2-02-HF"));
}

#[test]
fn json_documents_register_with_the_schema_codec() {
    let raw = r#"{
        "definition": {
            "id": "mini-point",
            "name": "Mini call point",
            "slug": "mini",
            "steps": [
                { "id": "colour", "title": "Colour", "options": [
                    { "id": "R", "label": "Red", "code": "R" },
                    { "id": "G", "label": "Green", "code": "G" } ] },
                { "id": "label", "title": "Label", "options": [
                    { "id": "HF", "label": "Heart and flame", "code": "" },
                    { "id": "EM", "label": "Emergency", "code": "EM" } ] }
            ],
            "stepOrder": ["colour", "label"],
            "schema": { "baseCode": "MCP", "partsOrder": ["colour", "label"], "separator": { "kind": "dash" } },
            "pairwiseExact": false
        },
        "constraints": {
            "model": "mini-point",
            "constraints": [
                { "source": "colour", "target": "label", "matrix": { "R": ["HF"], "G": ["EM"] } },
                { "source": "label", "target": "colour", "matrix": { "HF": ["R"], "EM": ["G"] } }
            ]
        },
        "allowlist": ["MCP-R", "MCP-G-EM"]
    }"#;

    let registry = ModelRegistry::build([parse_document(raw).unwrap()], &RegistryConfig::default()).unwrap();
    let model = registry.model("mini").unwrap();
    assert_eq!(model.allowlist().unwrap().len(), 2);
    assert!(model.false_positives().is_empty());
}

#[test]
fn documents_load_from_disk_and_report_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("stopper.json");
    let definition = serde_json::to_string(&universal_stopper::definition()).unwrap();
    fs::write(&good, format!(r#"{{ "definition": {definition} }}"#)).unwrap();

    let entry = load_document(&good).unwrap();
    assert_eq!(entry.definition.id, universal_stopper::ID);
    assert!(entry.constraints.is_empty());
    assert!(entry.allowlist.is_none());

    let bad = dir.path().join("broken.json");
    fs::write(&bad, "{ \"definition\": ").unwrap();
    let err = load_document(&bad).unwrap_err();
    assert!(matches!(err, CatalogError::Json { .. }));
    assert!(err.to_string().contains("broken.json"));

    let err = load_document(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}
