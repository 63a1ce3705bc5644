//! Medicine reference catalog.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Therapeutic category tag.
///
/// Known tags get their own variant; anything else the backend sends is
/// kept verbatim in [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// Fever and pain relief
    Fever,
    /// Diabetes
    Diabetes,
    /// Blood pressure
    Bp,
    /// Heart
    Heart,
    /// Cough and cold
    Cough,
    /// Antibiotics
    Antibiotics,
    /// Vitamins and supplements
    Vitamins,
    /// Digestive health
    Digestive,
    /// Skin care
    Skincare,
    /// Unrecognized tag
    Other(String),
}

impl Category {
    /// Every known category, in display order.
    pub const KNOWN: [Category; 9] = [
        Category::Fever,
        Category::Diabetes,
        Category::Bp,
        Category::Heart,
        Category::Cough,
        Category::Antibiotics,
        Category::Vitamins,
        Category::Digestive,
        Category::Skincare,
    ];

    /// Tag as stored in the backend.
    pub fn id(&self) -> &str {
        match self {
            Category::Fever => "fever",
            Category::Diabetes => "diabetes",
            Category::Bp => "bp",
            Category::Heart => "heart",
            Category::Cough => "cough",
            Category::Antibiotics => "antibiotics",
            Category::Vitamins => "vitamins",
            Category::Digestive => "digestive",
            Category::Skincare => "skincare",
            Category::Other(tag) => tag,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            Category::Fever => "Fever & Pain",
            Category::Diabetes => "Diabetes",
            Category::Bp => "Blood Pressure",
            Category::Heart => "Heart",
            Category::Cough => "Cough & Cold",
            Category::Antibiotics => "Antibiotics",
            Category::Vitamins => "Vitamins",
            Category::Digestive => "Digestive",
            Category::Skincare => "Skin Care",
            Category::Other(tag) => tag,
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "fever" => Category::Fever,
            "diabetes" => Category::Diabetes,
            "bp" => Category::Bp,
            "heart" => Category::Heart,
            "cough" => Category::Cough,
            "antibiotics" => Category::Antibiotics,
            "vitamins" => Category::Vitamins,
            "digestive" => Category::Digestive,
            "skincare" => Category::Skincare,
            _ => Category::Other(tag),
        }
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        Category::from(tag.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(tag) => tag,
            known => known.id().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineRecord {
    /// Unique identifier
    pub id: String,
    /// Canonical name
    pub name: String,
    /// Category tag
    pub category: Category,
    /// Alternate names, brand names first as entered
    #[serde(default, deserialize_with = "null_as_empty")]
    pub aliases: Vec<String>,
    /// Backend creation timestamp, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl MedicineRecord {
    /// Build a record without a timestamp.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<Category>,
        aliases: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
            created_at: None,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read-only medicine catalog with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    medicines: Vec<MedicineRecord>,
}

impl Catalog {
    /// An empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog, keeping the first record for each id.
    ///
    /// Rows with a blank id or name are dropped with a warning, so one bad
    /// backend row never hides the rest of the catalog.
    pub fn new(records: impl IntoIterator<Item = MedicineRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut medicines = Vec::new();

        for record in records {
            if let Some(reason) = invalid_reason(&record) {
                tracing::warn!(id = %record.id, reason, "Invalid medicine record dropped from catalog");
                continue;
            }
            if !seen.insert(record.id.clone()) {
                tracing::warn!(id = %record.id, "Duplicate medicine id dropped from catalog");
                continue;
            }
            medicines.push(record);
        }

        tracing::debug!(count = medicines.len(), "Catalog built");
        Self { medicines }
    }

    /// Build a catalog, failing on the first invalid record.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRecord`] when a record has a blank id or name.
    pub fn strict(records: impl IntoIterator<Item = MedicineRecord>) -> Result<Self> {
        let records: Vec<MedicineRecord> = records.into_iter().collect();
        for record in &records {
            if let Some(reason) = invalid_reason(record) {
                return Err(SearchError::InvalidRecord {
                    id: record.id.clone(),
                    reason: reason.to_string(),
                });
            }
        }
        Ok(Self::new(records))
    }

    /// Parse a JSON array of medicine rows, dropping invalid rows.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<MedicineRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Parse a JSON array of medicine rows, rejecting invalid rows.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or an invalid record.
    pub fn from_json_strict(json: &str) -> Result<Self> {
        let records: Vec<MedicineRecord> = serde_json::from_str(json)?;
        Self::strict(records)
    }

    /// All records in catalog order.
    pub fn medicines(&self) -> &[MedicineRecord] {
        &self.medicines
    }

    /// Iterate records in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, MedicineRecord> {
        self.medicines.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.medicines.len()
    }

    /// Whether the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }

    /// Look up a record by id.
    pub fn by_id(&self, id: &str) -> Option<&MedicineRecord> {
        self.medicines.iter().find(|m| m.id == id)
    }

    /// Records in one category, in catalog order.
    pub fn by_category<'a>(&'a self, category: &Category) -> impl Iterator<Item = &'a MedicineRecord> {
        self.medicines.iter().filter(move |m| &m.category == category)
    }
}

fn invalid_reason(record: &MedicineRecord) -> Option<&'static str> {
    if record.id.trim().is_empty() {
        Some("id is empty")
    } else if record.name.trim().is_empty() {
        Some("name is empty")
    } else {
        None
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MedicineRecord;
    type IntoIter = std::slice::Iter<'a, MedicineRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_keeps_unknown_tags() {
        let cats: Vec<Category> = serde_json::from_str(r#"["fever","bp","ayurveda"]"#).unwrap();
        assert_eq!(cats[0], Category::Fever);
        assert_eq!(cats[1], Category::Bp);
        assert_eq!(cats[2], Category::Other("ayurveda".to_string()));

        let json = serde_json::to_string(&cats).unwrap();
        assert_eq!(json, r#"["fever","bp","ayurveda"]"#);
    }

    #[test]
    fn test_null_aliases_become_empty() {
        let catalog = Catalog::from_json(
            r#"[{"id":"m1","name":"Paracetamol","category":"fever","aliases":null,
                 "created_at":"2024-05-01T10:00:00+00:00"},
                {"id":"m2","name":"Metformin","category":"diabetes"}]"#,
        )
        .unwrap();

        assert!(catalog.by_id("m1").unwrap().aliases.is_empty());
        assert!(catalog.by_id("m2").unwrap().aliases.is_empty());
        assert!(catalog.by_id("m1").unwrap().created_at.is_some());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let catalog = Catalog::new([
            MedicineRecord::new("m1", "Paracetamol", "fever", ["Crocin"]),
            MedicineRecord::new("m1", "Other", "fever", Vec::<String>::new()),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.by_id("m1").unwrap().name, "Paracetamol");
    }

    #[test]
    fn test_blank_rows_dropped_rest_kept() {
        let catalog = Catalog::new([
            MedicineRecord::new("m1", "Paracetamol", "fever", ["Crocin"]),
            MedicineRecord::new("m2", "  ", "fever", Vec::<String>::new()),
            MedicineRecord::new("", "Nameless", "fever", Vec::<String>::new()),
            MedicineRecord::new("m3", "Metformin", "diabetes", ["Glycomet"]),
        ]);

        let ids: Vec<_> = catalog.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["m1", "m3"]);
    }

    #[test]
    fn test_backend_rows_with_blank_name_still_load() {
        let catalog = Catalog::from_json(
            r#"[{"id":"m1","name":"Paracetamol","category":"fever","aliases":["Crocin"]},
                {"id":"m2","name":"","category":"fever","aliases":null},
                {"id":"m3","name":"Metformin","category":"diabetes"}]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.by_id("m2").is_none());
        assert_eq!(crate::suggest("crocin", &catalog, 8)[0].id, "m1");
    }

    #[test]
    fn test_strict_rejects_blank_name() {
        let err = Catalog::strict([
            MedicineRecord::new("m1", "Paracetamol", "fever", Vec::<String>::new()),
            MedicineRecord::new("m2", "  ", "fever", Vec::<String>::new()),
        ])
        .unwrap_err();
        assert_eq!(err.code(), 4004);
        assert!(matches!(err, SearchError::InvalidRecord { ref id, .. } if id == "m2"));

        let err = Catalog::from_json_strict(r#"[{"id":"","name":"X","category":"fever"}]"#).unwrap_err();
        assert_eq!(err.code(), 4004);
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = Catalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, SearchError::InvalidCatalog(_)));
    }

    #[test]
    fn test_by_category_preserves_order() {
        let catalog = Catalog::new([
            MedicineRecord::new("a", "Dolo", "fever", Vec::<String>::new()),
            MedicineRecord::new("b", "Amlodipine", "bp", Vec::<String>::new()),
            MedicineRecord::new("c", "Ibuprofen", "fever", Vec::<String>::new()),
        ]);

        let ids: Vec<_> = catalog.by_category(&Category::Fever).map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }
}
