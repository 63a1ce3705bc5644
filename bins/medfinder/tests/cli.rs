//! End-to-end tests of the medfinder binary. Everything here runs on the
//! bundled catalog, so no backend is needed.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;

fn medfinder() -> Command {
    let mut cmd = Command::cargo_bin("medfinder").unwrap();
    cmd.env_remove("MEDFINDER_CONFIG")
        .env_remove("MEDFINDER_CATALOG")
        .env_remove("RUST_LOG")
        .current_dir(std::env::temp_dir());
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_suggest_finds_brand_name() {
    medfinder()
        .args(["suggest", "crocin", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paracetamol"));
}

#[test]
fn test_suggest_json_is_ranked_and_capped() {
    let value = json_output(medfinder().args(["suggest", "a", "--offline", "--format", "json"]));
    let results = value.as_array().unwrap();

    assert!(!results.is_empty());
    assert!(results.len() <= 8);
    let scores: Vec<f64> = results.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_suggest_limit() {
    let value = json_output(medfinder().args(["suggest", "a", "--limit", "2", "--offline", "-f", "json"]));
    assert!(value.as_array().unwrap().len() <= 2);
}

#[test]
fn test_search_json() {
    let value = json_output(medfinder().args([
        "search", "crocin", "--city", "mumbai", "--range", "20", "--seed", "7", "--offline", "--format", "json",
    ]));
    let results = value.as_array().unwrap();
    let paracetamol = results.iter().find(|r| r["medicine"]["id"] == "m1").unwrap();

    assert_eq!(paracetamol["totalPharmacies"], 12);
    let stocked = paracetamol["availableAt"].as_array().unwrap();
    assert!(stocked.iter().all(|p| p["inStock"] == true));
    assert!(stocked.iter().all(|p| p["id"].as_str().unwrap().starts_with("mumbai-pharmacy-")));
    // mumbai-pharmacy-3 never has m1
    assert!(stocked.iter().all(|p| p["id"] != "mumbai-pharmacy-3"));

    let distances: Vec<f64> = stocked.iter().map(|p| p["distance"].as_f64().unwrap()).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_search_reports_distance_from_user() {
    let value = json_output(medfinder().args([
        "search", "paracetamol", "--near", "19.07,72.87", "--offline", "--format", "json",
    ]));
    let first = &value[0]["availableAt"][0];
    assert!(first["distanceFromUser"].as_f64().unwrap() >= 0.0);
}

#[test]
fn test_search_without_matches() {
    medfinder()
        .args(["search", "zzzzqqq", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No pharmacies"));
}

#[test]
fn test_bad_location_is_validation_error() {
    medfinder()
        .args(["search", "paracetamol", "--near", "Andheri West", "--offline"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid coordinate"));
}

#[test]
fn test_pharmacies_in_five_km() {
    let value = json_output(medfinder().args(["pharmacies", "--city", "mumbai", "--range", "5", "-f", "json"]));
    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();

    assert_eq!(ids.len(), 6);
    assert_eq!(ids[0], "mumbai-pharmacy-1");
    assert_eq!(ids[5], "mumbai-pharmacy-6");
}

#[test]
fn test_quote_is_deterministic() {
    let value = json_output(medfinder().args(["quote", "mumbai-pharmacy-1", "m1", "--format", "json"]));

    assert_eq!(value["inStock"], true);
    assert_eq!(value["quantity"], 34);
    assert_eq!(value["price"].as_f64(), Some(229.0));

    let out_of_stock = json_output(medfinder().args(["quote", "mumbai-pharmacy-3", "m1", "-f", "json"]));
    assert_eq!(out_of_stock["inStock"], false);
    assert_eq!(out_of_stock["quantity"], 0);
}

#[test]
fn test_cities() {
    medfinder()
        .arg("cities")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mumbai").and(predicate::str::contains("Lucknow")));

    let value = json_output(medfinder().args(["cities", "--format", "json"]));
    assert_eq!(value.as_array().unwrap().len(), 10);
}

#[test]
fn test_browse_category() {
    medfinder()
        .args(["browse", "fever", "--offline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paracetamol"));
}

#[test]
fn test_directions_to_coordinate() {
    medfinder()
        .args(["directions", "--to", "19.076,72.8777"])
        .assert()
        .success()
        .stdout("https://www.google.com/maps/dir/?api=1&destination=19.076,72.8777\n");
}

#[test]
fn test_directions_to_unknown_pharmacy() {
    medfinder()
        .args(["directions", "mumbai-pharmacy-99"])
        .assert()
        .code(5);
}

#[test]
fn test_directions_to_pharmacy_is_stable_between_runs() {
    let run = || {
        let output = medfinder()
            .args(["directions", "mumbai-pharmacy-1"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(output).unwrap()
    };

    let first = run();
    assert!(first.starts_with("https://www.google.com/maps/dir/?api=1&destination="));
    assert_eq!(first, run());
}

#[test]
fn test_directions_match_listed_pharmacy() {
    let listed = json_output(medfinder().args(["pharmacies", "--city", "mumbai", "--range", "20", "-f", "json"]));
    let pharmacy = listed
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == "mumbai-pharmacy-4")
        .unwrap()
        .clone();

    let directions = json_output(medfinder().args(["directions", "mumbai-pharmacy-4", "-f", "json"]));
    let url = directions["url"].as_str().unwrap();
    let (lat, lng) = url.rsplit_once('=').unwrap().1.split_once(',').unwrap();

    assert_eq!(directions["destination"], pharmacy["name"]);
    assert_eq!(lat.parse::<f64>().unwrap(), pharmacy["latitude"].as_f64().unwrap());
    assert_eq!(lng.parse::<f64>().unwrap(), pharmacy["longitude"].as_f64().unwrap());
}

#[test]
fn test_catalog_file_with_blank_row_keeps_the_rest() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id":"x1","name":"Testamol","category":"fever","aliases":["Testy"]}},
           {{"id":"x2","name":"","category":"fever"}}]"#
    )
    .unwrap();

    let value = json_output(
        medfinder()
            .arg("--catalog")
            .arg(file.path())
            .args(["suggest", "testy", "-f", "json"]),
    );
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["medicine"]["id"], "x1");
}

#[test]
fn test_missing_config_file() {
    medfinder()
        .args(["--config", "/definitely/not/here/medfinder.toml", "cities"])
        .assert()
        .code(3);
}

#[test]
fn test_config_reject_policy() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[finder]\nunknown_city = \"reject\"").unwrap();

    medfinder()
        .arg("--config")
        .arg(file.path())
        .args(["pharmacies", "--city", "atlantis"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Unknown city"));
}

#[test]
fn test_catalog_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"id":"x1","name":"Testamol","category":"fever","aliases":["Testy"]}}]"#
    )
    .unwrap();

    medfinder()
        .arg("--catalog")
        .arg(file.path())
        .args(["suggest", "testy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Testamol"));
}

#[test]
fn test_negative_quantity_rejected_before_backend() {
    medfinder()
        .args(["inventory", "--pharmacy", "p1", "set-quantity", "row-1", "-5"])
        .assert()
        .code(2);
}
