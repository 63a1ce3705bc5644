//! Tiered query matching against a single catalog entry.

use crate::catalog::MedicineRecord;
use crate::fuzzy::subsequence_score;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which tier produced a match.
///
/// Variants are ordered from weakest to strongest, so `Ord` agrees with
/// tier precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchType {
    /// No match
    #[serde(rename = "")]
    None,
    /// Query characters appear in order in the name
    Fuzzy,
    /// An alias contains the query
    AliasContains,
    /// The name contains the query
    Contains,
    /// An alias starts with the query
    AliasStartsWith,
    /// The name starts with the query
    StartsWith,
    /// An alias equals the query
    AliasExact,
    /// The name equals the query
    Exact,
}

impl MatchType {
    /// Fixed score for the tier. `Fuzzy` has a computed score, so this
    /// gives its ceiling.
    pub fn base_score(self) -> f64 {
        match self {
            MatchType::Exact => 100.0,
            MatchType::AliasExact => 95.0,
            MatchType::StartsWith => 90.0,
            MatchType::AliasStartsWith => 85.0,
            MatchType::Contains => 70.0,
            MatchType::AliasContains => 65.0,
            MatchType::Fuzzy => 50.0,
            MatchType::None => 0.0,
        }
    }

    /// Tag as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::AliasExact => "alias-exact",
            MatchType::StartsWith => "starts-with",
            MatchType::AliasStartsWith => "alias-starts-with",
            MatchType::Contains => "contains",
            MatchType::AliasContains => "alias-contains",
            MatchType::Fuzzy => "fuzzy",
            MatchType::None => "",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score and tier for one query/medicine pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    /// 0 to 100
    pub score: f64,
    /// Tier that produced the score
    pub match_type: MatchType,
}

impl MatchScore {
    /// The no-match value.
    pub const NONE: MatchScore = MatchScore {
        score: 0.0,
        match_type: MatchType::None,
    };

    fn tier(match_type: MatchType) -> Self {
        Self {
            score: match_type.base_score(),
            match_type,
        }
    }

    /// Whether the pair matched at all.
    pub fn is_match(&self) -> bool {
        self.score > 0.0
    }
}

/// A scored catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult<'a> {
    /// The matched record
    pub medicine: &'a MedicineRecord,
    /// Score out of 100
    pub score: f64,
    /// Tier that produced the score
    pub match_type: MatchType,
}

/// Normalize user input for matching.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Score `query` against `medicine`. The first tier that applies wins.
pub fn match_medicine(query: &str, medicine: &MedicineRecord) -> MatchScore {
    let term = normalize_query(query);
    match_normalized(&term, medicine)
}

/// Same as [`match_medicine`] for a query already passed through
/// [`normalize_query`].
pub fn match_normalized(term: &str, medicine: &MedicineRecord) -> MatchScore {
    if term.is_empty() {
        return MatchScore::NONE;
    }

    let name = medicine.name.to_lowercase();
    let aliases: Vec<String> = medicine.aliases.iter().map(|a| a.to_lowercase()).collect();

    if name == term {
        return MatchScore::tier(MatchType::Exact);
    }
    if aliases.iter().any(|a| a == term) {
        return MatchScore::tier(MatchType::AliasExact);
    }
    if name.starts_with(term) {
        return MatchScore::tier(MatchType::StartsWith);
    }
    if aliases.iter().any(|a| a.starts_with(term)) {
        return MatchScore::tier(MatchType::AliasStartsWith);
    }
    if name.contains(term) {
        return MatchScore::tier(MatchType::Contains);
    }
    if aliases.iter().any(|a| a.contains(term)) {
        return MatchScore::tier(MatchType::AliasContains);
    }

    match subsequence_score(&name, term) {
        Some(score) => MatchScore {
            score,
            match_type: MatchType::Fuzzy,
        },
        None => MatchScore::NONE,
    }
}
