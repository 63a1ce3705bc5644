//! Pharmacy endpoint
//!
//! Every pharmacy belongs to one signed-in user.

use super::eq_filter;
use crate::client::MedfinderClient;
use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// A registered pharmacy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pharmacy {
    pub id: String,
    /// Owning auth user
    pub user_id: String,
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub license_number: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Insert payload for registering a pharmacy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPharmacy {
    pub user_id: String,
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub license_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Pharmacies API interface
#[derive(Clone)]
pub struct PharmaciesApi {
    client: MedfinderClient,
}

impl PharmaciesApi {
    pub(crate) fn new(client: MedfinderClient) -> Self {
        Self { client }
    }

    /// The pharmacy owned by `user_id`
    ///
    /// GET /rest/v1/pharmacies?select=*&user_id=eq.<id>
    pub async fn by_owner(&self, user_id: &str) -> ApiResult<Pharmacy> {
        let path = format!("pharmacies?select=*&{}&limit=1", eq_filter("user_id", user_id));
        let rows: Vec<Pharmacy> = self.client.get(&path).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("pharmacy for user {user_id}")))
    }

    /// Every registered pharmacy, ordered by name
    ///
    /// GET /rest/v1/pharmacies?select=*&order=name.asc
    pub async fn list(&self) -> ApiResult<Vec<Pharmacy>> {
        self.client.get("pharmacies?select=*&order=name.asc").await
    }

    /// Register a pharmacy
    ///
    /// POST /rest/v1/pharmacies
    pub async fn register(&self, pharmacy: &NewPharmacy) -> ApiResult<Pharmacy> {
        let rows: Vec<Pharmacy> = self.client.post("pharmacies", pharmacy).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound("registered pharmacy row".to_string()))
    }
}
