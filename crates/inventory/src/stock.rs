//! A pharmacy's own inventory and the rules for changing it.

use crate::error::{InventoryError, Result};
use medfinder_search::{Catalog, Category, MedicineRecord};
use serde::{Deserialize, Deserializer, Serialize};

/// Stock flag given to a newly added medicine.
pub const DEFAULT_IN_STOCK: bool = true;

/// Quantity given to a newly added medicine.
pub const DEFAULT_QUANTITY: u32 = 10;

/// One inventory row, optionally with its medicine embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Row id
    pub id: String,
    /// Owning pharmacy
    pub pharmacy_id: String,
    /// Stocked medicine
    pub medicine_id: String,
    /// A null flag reads as out of stock
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_stock: bool,
    /// A null quantity reads as zero
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    /// Last change, as sent by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Embedded medicine row
    #[serde(default, rename = "medicines", skip_serializing_if = "Option::is_none")]
    pub medicine: Option<MedicineRecord>,
}

impl InventoryItem {
    /// Medicine name, or the id when the medicine is not embedded.
    pub fn display_name(&self) -> &str {
        self.medicine.as_ref().map_or(&self.medicine_id, |m| &m.name)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Insert payload for a new inventory row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewInventoryItem {
    /// Owning pharmacy
    pub pharmacy_id: String,
    /// Medicine to stock
    pub medicine_id: String,
    /// Initial stock flag
    pub in_stock: bool,
    /// Initial quantity
    pub quantity: u32,
}

/// Category filter used by the dashboard. `All` matches every category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No filtering
    #[default]
    All,
    /// Only this category
    Only(Category),
}

impl CategoryFilter {
    /// Whether `category` passes the filter.
    pub fn accepts(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.is_empty() || tag.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::from(tag.to_lowercase()))
        }
    }
}

fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// Summary counts for a pharmacy's inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    /// Rows
    pub total: usize,
    /// Rows marked in stock
    pub in_stock: usize,
    /// Rows marked out of stock
    pub out_of_stock: usize,
    /// Sum of quantities across in-stock rows
    pub units: u64,
}

/// The inventory rows of a single pharmacy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryBook {
    pharmacy_id: String,
    items: Vec<InventoryItem>,
}

impl InventoryBook {
    /// Book for `pharmacy_id` with existing rows.
    ///
    /// # Errors
    ///
    /// [`InventoryError::ForeignItem`] if a row belongs to another pharmacy.
    pub fn new(pharmacy_id: impl Into<String>, items: Vec<InventoryItem>) -> Result<Self> {
        let pharmacy_id = pharmacy_id.into();
        if let Some(foreign) = items.iter().find(|i| i.pharmacy_id != pharmacy_id) {
            return Err(InventoryError::ForeignItem {
                item: foreign.id.clone(),
                owner: foreign.pharmacy_id.clone(),
            });
        }
        Ok(Self { pharmacy_id, items })
    }

    /// Owning pharmacy.
    pub fn pharmacy_id(&self) -> &str {
        &self.pharmacy_id
    }

    /// All rows, in load order.
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// Row by id.
    pub fn get(&self, item_id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Whether the medicine already has a row.
    pub fn contains_medicine(&self, medicine_id: &str) -> bool {
        self.items.iter().any(|i| i.medicine_id == medicine_id)
    }

    /// Insert payload for adding `medicine_id` with the default stock.
    ///
    /// # Errors
    ///
    /// [`InventoryError::AlreadyInInventory`] if the medicine has a row.
    pub fn prepare_add(&self, medicine_id: &str) -> Result<NewInventoryItem> {
        if self.contains_medicine(medicine_id) {
            return Err(InventoryError::AlreadyInInventory(medicine_id.to_string()));
        }
        Ok(NewInventoryItem {
            pharmacy_id: self.pharmacy_id.clone(),
            medicine_id: medicine_id.to_string(),
            in_stock: DEFAULT_IN_STOCK,
            quantity: DEFAULT_QUANTITY,
        })
    }

    /// Record a row the backend created.
    ///
    /// # Errors
    ///
    /// Fails on a foreign row or a medicine that already has a row.
    pub fn insert(&mut self, item: InventoryItem) -> Result<()> {
        if item.pharmacy_id != self.pharmacy_id {
            return Err(InventoryError::ForeignItem {
                item: item.id,
                owner: item.pharmacy_id,
            });
        }
        if self.contains_medicine(&item.medicine_id) {
            return Err(InventoryError::AlreadyInInventory(item.medicine_id));
        }
        tracing::debug!(item = %item.id, medicine = %item.medicine_id, "Inventory row added");
        self.items.push(item);
        Ok(())
    }

    fn item_mut(&mut self, item_id: &str) -> Result<&mut InventoryItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| InventoryError::ItemNotFound(item_id.to_string()))
    }

    /// Flip a row's stock flag, returning the new value.
    ///
    /// # Errors
    ///
    /// [`InventoryError::ItemNotFound`] for an unknown row.
    pub fn toggle_stock(&mut self, item_id: &str) -> Result<bool> {
        let item = self.item_mut(item_id)?;
        item.in_stock = !item.in_stock;
        tracing::debug!(item = %item_id, in_stock = item.in_stock, "Stock toggled");
        Ok(item.in_stock)
    }

    /// Set a row's quantity.
    ///
    /// # Errors
    ///
    /// [`InventoryError::InvalidQuantity`] below zero, or
    /// [`InventoryError::ItemNotFound`] for an unknown row.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> Result<u32> {
        let quantity = checked_quantity(quantity)?;
        let item = self.item_mut(item_id)?;
        item.quantity = quantity;
        Ok(quantity)
    }

    /// Remove a row.
    ///
    /// # Errors
    ///
    /// [`InventoryError::ItemNotFound`] for an unknown row.
    pub fn remove(&mut self, item_id: &str) -> Result<InventoryItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| InventoryError::ItemNotFound(item_id.to_string()))?;
        Ok(self.items.remove(index))
    }

    /// Rows whose medicine name contains `term` (case-insensitive) and whose
    /// category passes `category`. Rows without an embedded medicine only
    /// pass an empty term with [`CategoryFilter::All`].
    pub fn filter(&self, term: &str, category: &CategoryFilter) -> Vec<&InventoryItem> {
        self.items
            .iter()
            .filter(|item| match &item.medicine {
                Some(m) => name_matches(&m.name, term) && category.accepts(&m.category),
                None => term.is_empty() && *category == CategoryFilter::All,
            })
            .collect()
    }

    /// Catalog medicines without a row yet, narrowed by name and category,
    /// in catalog order.
    pub fn addable<'a>(
        &self,
        catalog: &'a Catalog,
        term: &str,
        category: &CategoryFilter,
    ) -> Vec<&'a MedicineRecord> {
        catalog
            .iter()
            .filter(|m| !self.contains_medicine(&m.id))
            .filter(|m| name_matches(&m.name, term) && category.accepts(&m.category))
            .collect()
    }

    /// Summary counts.
    pub fn stats(&self) -> InventoryStats {
        self.items.iter().fold(InventoryStats::default(), |mut s, item| {
            s.total += 1;
            if item.in_stock {
                s.in_stock += 1;
                s.units += u64::from(item.quantity);
            } else {
                s.out_of_stock += 1;
            }
            s
        })
    }
}

/// Validate a quantity entered by a user.
///
/// # Errors
///
/// [`InventoryError::InvalidQuantity`] below zero or above `u32::MAX`.
pub fn checked_quantity(quantity: i64) -> Result<u32> {
    u32::try_from(quantity).map_err(|_| InventoryError::InvalidQuantity(quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(id: &str, name: &str, category: &str) -> MedicineRecord {
        MedicineRecord::new(id, name, category, Vec::<String>::new())
    }

    fn item(id: &str, medicine: MedicineRecord, in_stock: bool, quantity: u32) -> InventoryItem {
        InventoryItem {
            id: id.to_string(),
            pharmacy_id: "ph1".to_string(),
            medicine_id: medicine.id.clone(),
            in_stock,
            quantity,
            updated_at: None,
            medicine: Some(medicine),
        }
    }

    fn book() -> InventoryBook {
        InventoryBook::new(
            "ph1",
            vec![
                item("i1", medicine("m1", "Paracetamol", "fever"), true, 20),
                item("i2", medicine("m2", "Metformin", "diabetes"), false, 0),
                item("i3", medicine("m3", "Ibuprofen", "fever"), true, 5),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_prepare_add_defaults() {
        let new = book().prepare_add("m9").unwrap();
        assert_eq!(new.pharmacy_id, "ph1");
        assert!(new.in_stock);
        assert_eq!(new.quantity, 10);
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let book = book();
        assert_eq!(
            book.prepare_add("m1"),
            Err(InventoryError::AlreadyInInventory("m1".to_string()))
        );
    }

    #[test]
    fn test_insert_rejects_foreign_and_duplicate() {
        let mut book = book();
        let mut foreign = item("i9", medicine("m9", "Aspirin", "heart"), true, 10);
        foreign.pharmacy_id = "ph2".to_string();
        assert!(matches!(book.insert(foreign), Err(InventoryError::ForeignItem { .. })));

        let dup = item("i8", medicine("m1", "Paracetamol", "fever"), true, 10);
        assert!(book.insert(dup).is_err());

        book.insert(item("i9", medicine("m9", "Aspirin", "heart"), true, 10)).unwrap();
        assert_eq!(book.items().len(), 4);
    }

    #[test]
    fn test_toggle_stock() {
        let mut book = book();
        assert!(!book.toggle_stock("i1").unwrap());
        assert!(book.toggle_stock("i1").unwrap());
        assert_eq!(book.toggle_stock("nope"), Err(InventoryError::ItemNotFound("nope".to_string())));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut book = book();
        assert_eq!(book.set_quantity("i1", -1), Err(InventoryError::InvalidQuantity(-1)));
        assert_eq!(book.get("i1").unwrap().quantity, 20);

        assert_eq!(book.set_quantity("i1", 0), Ok(0));
        assert_eq!(book.get("i1").unwrap().quantity, 0);
    }

    #[test]
    fn test_filter_by_term_and_category() {
        let book = book();
        let ids = |term: &str, cat: &str| -> Vec<String> {
            book.filter(term, &CategoryFilter::from(cat))
                .into_iter()
                .map(|i| i.id.clone())
                .collect()
        };

        assert_eq!(ids("", "all"), ["i1", "i2", "i3"]);
        assert_eq!(ids("", "fever"), ["i1", "i3"]);
        assert_eq!(ids("PROF", "all"), ["i3"]);
        assert_eq!(ids("met", "fever"), Vec::<String>::new());
    }

    #[test]
    fn test_addable_excludes_stocked() {
        let book = book();
        let catalog = Catalog::new([
            medicine("m1", "Paracetamol", "fever"),
            medicine("m4", "Dolo", "fever"),
            medicine("m5", "Amlodipine", "bp"),
        ]);

        let ids: Vec<_> = book
            .addable(&catalog, "", &CategoryFilter::All)
            .into_iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, ["m4", "m5"]);

        let fever: Vec<_> = book
            .addable(&catalog, "", &CategoryFilter::from("fever"))
            .into_iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(fever, ["m4"]);
    }

    #[test]
    fn test_remove_and_stats() {
        let mut book = book();
        assert_eq!(
            book.stats(),
            InventoryStats { total: 3, in_stock: 2, out_of_stock: 1, units: 25 }
        );

        let removed = book.remove("i2").unwrap();
        assert_eq!(removed.medicine_id, "m2");
        assert!(book.remove("i2").is_err());
        assert_eq!(book.stats().out_of_stock, 0);
    }

    #[test]
    fn test_backend_row_with_nulls() {
        let row: InventoryItem = serde_json::from_str(
            r#"{"id":"i1","pharmacy_id":"ph1","medicine_id":"m1","in_stock":null,
                "quantity":null,"updated_at":null,
                "medicines":{"id":"m1","name":"Paracetamol","category":"fever"}}"#,
        )
        .unwrap();

        assert!(!row.in_stock);
        assert_eq!(row.quantity, 0);
        assert_eq!(row.display_name(), "Paracetamol");
    }

    #[test]
    fn test_foreign_rows_rejected_on_load() {
        let mut foreign = item("i1", medicine("m1", "Paracetamol", "fever"), true, 1);
        foreign.pharmacy_id = "other".to_string();
        assert!(InventoryBook::new("ph1", vec![foreign]).is_err());
    }
}
