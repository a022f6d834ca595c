use drugmerger::build_drug_collection;
use drugsource::{load_applications, write_collection, OutputConfig};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn write_fixture(temp: &TempDir) -> std::path::PathBuf {
    let input = temp.path().join("data.json");
    let document = json!({
        "results": [
            {
                "application_number": "NDA018989",
                "sponsor_name": "PFIZER",
                "openfda": {
                    "generic_name": ["IBUPROFEN"],
                    "brand_name": ["ADVIL"],
                    "manufacturer_name": ["Pfizer Laboratories"],
                    "package_ndc": ["0573-0164-30"]
                },
                "products": [
                    { "brand_name": "ADVIL", "route": "ORAL", "dosage_form": "TABLET",
                      "marketing_status": "Over-the-counter",
                      "active_ingredients": [{ "name": "IBUPROFEN", "strength": "200MG" }] },
                    { "brand_name": "ADVIL", "route": "ORAL", "dosage_form": "CAPSULE",
                      "marketing_status": "Discontinued",
                      "active_ingredients": [{ "name": "IBUPROFEN", "strength": "200MG" }] }
                ]
            },
            {
                "application_number": "NDA000001",
                "sponsor_name": "NOBODY",
                "products": [{ "brand_name": "ORPHAN" }]
            },
            {
                "application_number": "ANDA075010",
                "sponsor_name": "PERRIGO",
                "openfda": {
                    "generic_name": ["IBUPROFEN"],
                    "brand_name": ["IBUPROFEN"],
                    "manufacturer_name": ["Perrigo New York Inc"]
                },
                "products": [
                    { "brand_name": "IBUPROFEN", "route": "ORAL", "dosage_form": "TABLET",
                      "marketing_status": "Over-the-counter",
                      "active_ingredients": [{ "name": "IBUPROFEN", "strength": "200MG" }] }
                ]
            },
            {
                "application_number": "NDA022519",
                "sponsor_name": "HORIZON",
                "openfda": { "generic_name": ["IBUPROFEN", "FAMOTIDINE"], "brand_name": ["DUEXIS"] },
                "products": [{ "brand_name": "DUEXIS", "marketing_status": "Prescription" }]
            },
            {
                "application_number": "NDA000123",
                "sponsor_name": "BAYER",
                "openfda": { "generic_name": ["ASPIRIN"], "brand_name": ["BAYER"] },
                "products": [{ "brand_name": "BAYER", "marketing_status": "Over-the-counter" }]
            }
        ]
    });
    fs::write(&input, document.to_string()).unwrap();
    input
}

#[test]
fn merges_and_persists_drugs() {
    let temp = TempDir::new().unwrap();
    let applications = load_applications(&write_fixture(&temp)).unwrap();
    let build = build_drug_collection(&applications);

    let config = OutputConfig::new(temp.path().join("dist"), "merged-drugs.json").unwrap();
    let path = write_collection(&config, &build.drugs).unwrap();
    let written: Vec<Value> = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

    assert_eq!(written.len(), 2);

    let ibuprofen = &written[0];
    assert_eq!(ibuprofen["sponsors"], json!(["PFIZER", "PERRIGO"]));
    assert_eq!(ibuprofen["applications"], json!(["NDA018989", "ANDA075010"]));
    assert_eq!(ibuprofen["brands"], json!(["ADVIL", "IBUPROFEN"]));
    assert_eq!(ibuprofen["generics"], json!(["IBUPROFEN"]));
    assert_eq!(
        ibuprofen["manufacturers"],
        json!(["Pfizer Laboratories", "Perrigo New York Inc"])
    );
    assert_eq!(ibuprofen["ndcCodes"], json!(["0573-0164-30"]));
    assert_eq!(ibuprofen["forms"].as_array().unwrap().len(), 3);
    assert_eq!(ibuprofen["forms"][1]["availability"], "Discontinued");

    assert_eq!(written[1]["generics"], json!(["ASPIRIN"]));

    assert_eq!(build.stats.without_cross_reference, 1);
    assert_eq!(build.stats.conflicts, 1);
    assert_eq!(build.stats.merged, 1);
}

#[test]
fn rerun_replaces_previous_artifact() {
    let temp = TempDir::new().unwrap();
    let config = OutputConfig::new(temp.path().join("dist"), "merged-drugs.json").unwrap();
    fs::create_dir_all(config.output_dir()).unwrap();
    fs::write(config.artifact_path(), "stale content that is not json").unwrap();

    let build = build_drug_collection(&load_applications(&write_fixture(&temp)).unwrap());
    let path = write_collection(&config, &build.drugs).unwrap();

    let written: Vec<Value> = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(written.len(), build.drugs.len());
}
