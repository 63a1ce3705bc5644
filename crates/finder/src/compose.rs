//! Joining matched medicines with the pharmacies that stock them.

use medfinder_geo::{Coordinate, PharmacyLocation};
use medfinder_inventory::{quote, StockQuote};
use medfinder_search::MedicineRecord;
use serde::Serialize;

/// A pharmacy together with its stock of one medicine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockedPharmacy {
    /// The pharmacy, as generated for its city
    #[serde(flatten)]
    pub pharmacy: PharmacyLocation,
    /// Its quote for the medicine
    #[serde(flatten)]
    pub stock: StockQuote,
    /// Great-circle km from the user, when their position is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_user: Option<f64>,
}

/// Where one medicine can be bought.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineAvailability {
    /// The matched catalog record
    pub medicine: MedicineRecord,
    /// In-stock pharmacies, nearest first
    pub available_at: Vec<StockedPharmacy>,
    /// In-range pharmacies looked at, stocked or not
    pub total_pharmacies: usize,
}

/// Quote `medicine` at every pharmacy and keep the ones that have it,
/// nearest first. Pharmacies at equal distance keep their input order.
pub fn stock_for(
    medicine: &MedicineRecord,
    pharmacies: &[PharmacyLocation],
    user: Option<&Coordinate>,
) -> Vec<StockedPharmacy> {
    let mut stocked: Vec<StockedPharmacy> = pharmacies
        .iter()
        .filter_map(|pharmacy| {
            let stock = quote(&pharmacy.id, &medicine.id);
            stock.in_stock.then(|| StockedPharmacy {
                pharmacy: pharmacy.clone(),
                stock,
                distance_from_user: user.map(|u| pharmacy.distance_from(u)),
            })
        })
        .collect();

    stocked.sort_by(|a, b| a.pharmacy.distance.total_cmp(&b.pharmacy.distance));
    stocked
}

/// Availability for each medicine, in the given order. Medicines no
/// pharmacy stocks are left out.
pub fn compose<'a>(
    medicines: impl IntoIterator<Item = &'a MedicineRecord>,
    pharmacies: &[PharmacyLocation],
    user: Option<&Coordinate>,
) -> Vec<MedicineAvailability> {
    medicines
        .into_iter()
        .filter_map(|medicine| {
            let available_at = stock_for(medicine, pharmacies, user);
            if available_at.is_empty() {
                tracing::trace!(medicine = %medicine.id, "Not stocked in range");
                return None;
            }
            Some(MedicineAvailability {
                medicine: medicine.clone(),
                available_at,
                total_pharmacies: pharmacies.len(),
            })
        })
        .collect()
}
