//! Pharmacy inventory endpoint
//!
//! Rows live in `pharmacy_inventory`; reads embed the medicine's id, name
//! and category.

use super::eq_filter;
use crate::client::MedfinderClient;
use crate::error::{ApiError, ApiResult};
use medfinder_inventory::{InventoryBook, InventoryItem, NewInventoryItem};
use serde_json::json;

const TABLE: &str = "pharmacy_inventory";
const SELECT_WITH_MEDICINE: &str = "select=*,medicines(id,name,category)";

/// Inventory API interface
#[derive(Clone)]
pub struct InventoryApi {
    client: MedfinderClient,
}

impl InventoryApi {
    pub(crate) fn new(client: MedfinderClient) -> Self {
        Self { client }
    }

    /// Rows of one pharmacy with their medicines embedded
    ///
    /// GET /rest/v1/pharmacy_inventory?select=*,medicines(id,name,category)&pharmacy_id=eq.<id>
    pub async fn list(&self, pharmacy_id: &str) -> ApiResult<Vec<InventoryItem>> {
        let path = format!("{TABLE}?{SELECT_WITH_MEDICINE}&{}", eq_filter("pharmacy_id", pharmacy_id));
        self.client.get(&path).await
    }

    /// The pharmacy's inventory as a book the stock rules can run on
    pub async fn book(&self, pharmacy_id: &str) -> ApiResult<InventoryBook> {
        let rows = self.list(pharmacy_id).await?;
        Ok(InventoryBook::new(pharmacy_id, rows)?)
    }

    /// Insert a row
    ///
    /// POST /rest/v1/pharmacy_inventory
    pub async fn add(&self, item: &NewInventoryItem) -> ApiResult<InventoryItem> {
        let path = format!("{TABLE}?{SELECT_WITH_MEDICINE}");
        let rows: Vec<InventoryItem> = self.client.post(&path, item).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("inserted row for medicine {}", item.medicine_id)))
    }

    /// Set a row's stock flag
    ///
    /// PATCH /rest/v1/pharmacy_inventory?id=eq.<id>
    pub async fn set_in_stock(&self, item_id: &str, in_stock: bool) -> ApiResult<()> {
        self.client
            .patch(&row_path(item_id), &json!({ "in_stock": in_stock }))
            .await
    }

    /// Set a row's quantity
    ///
    /// PATCH /rest/v1/pharmacy_inventory?id=eq.<id>
    pub async fn set_quantity(&self, item_id: &str, quantity: u32) -> ApiResult<()> {
        self.client
            .patch(&row_path(item_id), &json!({ "quantity": quantity }))
            .await
    }

    /// Delete a row
    ///
    /// DELETE /rest/v1/pharmacy_inventory?id=eq.<id>
    pub async fn remove(&self, item_id: &str) -> ApiResult<()> {
        self.client.delete(&row_path(item_id)).await
    }
}

fn row_path(item_id: &str) -> String {
    format!("{TABLE}?{}", eq_filter("id", item_id))
}
