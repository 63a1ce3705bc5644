//! WASM bindings for the suggestion box.

use crate::catalog::Catalog;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Score one query against a medicine name and alias list.
///
/// `aliases_json` is a JSON array of strings; anything else is treated as
/// no aliases.
#[wasm_bindgen]
pub fn match_score(query: &str, name: &str, aliases_json: &str) -> f64 {
    let aliases: Vec<String> = serde_json::from_str(aliases_json).unwrap_or_default();
    let record = crate::MedicineRecord::new("", name, "", aliases);
    crate::match_medicine(query, &record).score
}

/// Check if text contains a fuzzy match for query.
///
/// Returns true if all characters in query appear in text in order.
#[wasm_bindgen]
pub fn fuzzy_contains(query: &str, text: &str) -> bool {
    crate::fuzzy::fuzzy_match(&text.to_lowercase(), &query.trim().to_lowercase())
}

/// Rank a catalog for a query and return suggestions as JSON.
///
/// # Arguments
/// * `query` - Search box text
/// * `catalog_json` - JSON array of medicine rows
/// * `max_results` - Maximum suggestions (0 for the default of 8)
///
/// # Returns
/// JSON array of `{id, name, score, matchType}`, best first; `[]` when the
/// catalog cannot be parsed.
#[wasm_bindgen]
pub fn suggest_json(query: &str, catalog_json: &str, max_results: usize) -> String {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Suggestion<'a> {
        id: &'a str,
        name: &'a str,
        score: f64,
        match_type: crate::MatchType,
    }

    let Ok(catalog) = Catalog::from_json(catalog_json) else {
        return "[]".to_string();
    };

    let limit = if max_results == 0 {
        crate::DEFAULT_SUGGESTION_LIMIT
    } else {
        max_results
    };

    let results: Vec<Suggestion<'_>> = crate::suggest_scored(query, &catalog, limit)
        .into_iter()
        .map(|m| Suggestion {
            id: &m.medicine.id,
            name: &m.medicine.name,
            score: m.score,
            match_type: m.match_type,
        })
        .collect();

    serde_json::to_string(&results).unwrap_or_else(|_| "[]".to_string())
}
