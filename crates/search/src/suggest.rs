//! Suggestion ranking and the loose submit filter.

use crate::catalog::{Catalog, MedicineRecord};
use crate::matcher::{match_normalized, normalize_query, MatchResult, MatchScore};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of suggestions shown for a query.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// Scored matches for `query`, best first, at most `limit` long.
///
/// Entries with equal scores keep their catalog order.
pub fn suggest_scored<'a>(query: &str, catalog: &'a Catalog, limit: usize) -> Vec<MatchResult<'a>> {
    let term = normalize_query(query);
    if term.is_empty() || limit == 0 {
        return Vec::new();
    }

    let scores = score_all(&term, catalog.medicines());

    let mut matches: Vec<MatchResult<'a>> = catalog
        .iter()
        .zip(scores)
        .filter(|(_, s)| s.is_match())
        .map(|(medicine, s)| MatchResult {
            medicine,
            score: s.score,
            match_type: s.match_type,
        })
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches.truncate(limit);

    tracing::trace!(query = %term, results = matches.len(), "Suggestions ranked");
    matches
}

/// Medicines to suggest for `query`, best first, at most `limit` long.
pub fn suggest<'a>(query: &str, catalog: &'a Catalog, limit: usize) -> Vec<&'a MedicineRecord> {
    suggest_scored(query, catalog, limit)
        .into_iter()
        .map(|m| m.medicine)
        .collect()
}

#[cfg(feature = "parallel")]
fn score_all(term: &str, medicines: &[MedicineRecord]) -> Vec<MatchScore> {
    medicines.par_iter().map(|m| match_normalized(term, m)).collect()
}

#[cfg(not(feature = "parallel"))]
fn score_all(term: &str, medicines: &[MedicineRecord]) -> Vec<MatchScore> {
    medicines.iter().map(|m| match_normalized(term, m)).collect()
}

/// Substring test used when a search is submitted: the query appears in the
/// name, in any alias, or in the category tag or label.
pub fn loose_match(query: &str, medicine: &MedicineRecord) -> bool {
    let term = normalize_query(query);
    !term.is_empty() && loose_match_normalized(&term, medicine)
}

fn loose_match_normalized(term: &str, medicine: &MedicineRecord) -> bool {
    medicine.name.to_lowercase().contains(term)
        || medicine
            .aliases
            .iter()
            .any(|a| a.to_lowercase().contains(term))
        || medicine.category.id().to_lowercase().contains(term)
        || medicine.category.label().to_lowercase().contains(term)
}

/// Catalog entries accepted by [`loose_match`], in catalog order.
pub fn filter_loose<'a>(query: &str, catalog: &'a Catalog) -> Vec<&'a MedicineRecord> {
    let term = normalize_query(query);
    if term.is_empty() {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|m| loose_match_normalized(&term, m))
        .collect()
}

/// Catalog entries with any tiered match, in catalog order.
pub fn filter_tiered<'a>(query: &str, catalog: &'a Catalog) -> Vec<&'a MedicineRecord> {
    let term = normalize_query(query);
    if term.is_empty() {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|m| match_normalized(&term, m).is_match())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::MatchType;
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        Catalog::new([
            MedicineRecord::new("m1", "Paracetamol", "fever", ["Crocin", "Calpol"]),
            MedicineRecord::new("m2", "Metformin", "diabetes", ["Glycomet"]),
            MedicineRecord::new("m3", "Amlodipine", "bp", ["Amlong"]),
            MedicineRecord::new("m4", "Azithromycin", "antibiotics", ["Azee", "Zithromax"]),
            MedicineRecord::new("m5", "Amoxicillin", "antibiotics", ["Mox"]),
            MedicineRecord::new("m6", "Cetirizine", "cough", ["Cetzine"]),
            MedicineRecord::new("m7", "Aspirin", "heart", ["Ecosprin"]),
            MedicineRecord::new("m8", "Atorvastatin", "heart", ["Lipitor"]),
            MedicineRecord::new("m9", "Amlodipine Besylate", "bp", Vec::<String>::new()),
            MedicineRecord::new("m10", "Atenolol", "bp", ["Tenormin"]),
            MedicineRecord::new("m11", "Albendazole", "digestive", Vec::<String>::new()),
            MedicineRecord::new("m12", "Acyclovir", "skincare", Vec::<String>::new()),
        ])
    }

    #[test]
    fn test_alias_exact_suggestion() {
        let catalog = catalog();
        let results = suggest_scored("crocin", &catalog, DEFAULT_SUGGESTION_LIMIT);

        assert_eq!(results[0].medicine.id, "m1");
        assert_eq!(results[0].match_type, MatchType::AliasExact);
    }

    #[test]
    fn test_empty_query_has_no_suggestions() {
        let catalog = catalog();
        assert!(suggest("", &catalog, DEFAULT_SUGGESTION_LIMIT).is_empty());
        assert!(suggest("   ", &catalog, DEFAULT_SUGGESTION_LIMIT).is_empty());
    }

    #[test]
    fn test_limit_applied() {
        let catalog = catalog();
        // ten of the twelve names contain an "a"
        let all = suggest("a", &catalog, 100);
        assert!(all.len() > DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(suggest("a", &catalog, DEFAULT_SUGGESTION_LIMIT).len(), DEFAULT_SUGGESTION_LIMIT);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = catalog();
        let ids: Vec<_> = suggest("aml", &catalog, DEFAULT_SUGGESTION_LIMIT)
            .into_iter()
            .map(|m| m.id.as_str())
            .collect();
        // two prefix hits, then two subsequence hits, each pair in catalog order
        assert_eq!(ids, ["m3", "m9", "m1", "m5"]);
    }

    #[test]
    fn test_tier_precedence_across_candidates() {
        let catalog = Catalog::new([
            MedicineRecord::new("fz", "Xaybzc", "fever", Vec::<String>::new()),
            MedicineRecord::new("ac", "Other", "fever", ["preabc"]),
            MedicineRecord::new("c", "Zabcz", "fever", Vec::<String>::new()),
            MedicineRecord::new("as", "Other2", "fever", ["abcdef"]),
            MedicineRecord::new("s", "Abcdef", "fever", Vec::<String>::new()),
            MedicineRecord::new("ae", "Other3", "fever", ["abc"]),
            MedicineRecord::new("e", "Abc", "fever", Vec::<String>::new()),
        ]);

        let types: Vec<_> = suggest_scored("abc", &catalog, 10)
            .into_iter()
            .map(|m| m.match_type)
            .collect();

        assert_eq!(
            types,
            [
                MatchType::Exact,
                MatchType::AliasExact,
                MatchType::StartsWith,
                MatchType::AliasStartsWith,
                MatchType::Contains,
                MatchType::AliasContains,
                MatchType::Fuzzy,
            ]
        );
    }

    #[test]
    fn test_loose_filter_covers_aliases_and_category() {
        let catalog = catalog();

        let ids = |q: &str| -> Vec<String> {
            filter_loose(q, &catalog).into_iter().map(|m| m.id.clone()).collect()
        };

        assert_eq!(ids("glyco"), ["m2"]);
        assert_eq!(ids("antibiotic"), ["m4", "m5"]);
        assert_eq!(ids("blood pressure"), ["m3", "m9", "m10"]);
        assert!(ids("").is_empty());
    }

    #[test]
    fn test_tiered_filter_includes_fuzzy() {
        let catalog = catalog();
        let ids: Vec<_> = filter_tiered("pctml", &catalog).into_iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["m1"]);
        assert!(filter_loose("pctml", &catalog).is_empty());
    }

    proptest! {
        #[test]
        fn suggestions_bounded_and_sorted(query in "[a-z ]{0,6}") {
            let catalog = catalog();
            let results = suggest_scored(&query, &catalog, DEFAULT_SUGGESTION_LIMIT);

            prop_assert!(results.len() <= DEFAULT_SUGGESTION_LIMIT);
            prop_assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
            prop_assert!(results.iter().all(|r| r.score > 0.0 && r.score <= 100.0));
        }

        #[test]
        fn suggestions_idempotent(query in "[a-zA-Z]{1,8}") {
            let catalog = catalog();
            let first: Vec<_> = suggest(&query, &catalog, DEFAULT_SUGGESTION_LIMIT).into_iter().map(|m| &m.id).collect();
            let second: Vec<_> = suggest(&query, &catalog, DEFAULT_SUGGESTION_LIMIT).into_iter().map(|m| &m.id).collect();
            prop_assert_eq!(first, second);
        }
    }
}
