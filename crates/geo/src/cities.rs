//! Supported cities and their pharmacy templates.

use crate::error::{GeoError, Result};
use crate::Coordinate;
use medfinder_core::config::UnknownCityPolicy;
use serde::Serialize;

/// City used when none is configured.
pub const DEFAULT_CITY_ID: &str = "mumbai";

/// Fixed part of a generated pharmacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PharmacyTemplate {
    /// Pharmacy name
    pub name: &'static str,
    /// Neighbourhood, used in the address
    pub area: &'static str,
    /// Contact number
    pub phone: &'static str,
}

impl PharmacyTemplate {
    const fn new(name: &'static str, area: &'static str, phone: &'static str) -> Self {
        Self { name, area, phone }
    }
}

/// A supported city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct City {
    /// Lower-case id, e.g. `mumbai`
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// State or union territory
    pub state: &'static str,
    /// City center
    pub center: Coordinate,
    /// Pharmacy templates, in generation order
    #[serde(skip)]
    pub templates: &'static [PharmacyTemplate],
}

/// All supported cities.
pub static CITIES: [City; 10] = [
    city("mumbai", "Mumbai", "Maharashtra", 19.0760, 72.8777, &MUMBAI_TEMPLATES),
    city("delhi", "Delhi", "Delhi", 28.7041, 77.1025, &DELHI_TEMPLATES),
    city("bangalore", "Bangalore", "Karnataka", 12.9716, 77.5946, &BANGALORE_TEMPLATES),
    city("hyderabad", "Hyderabad", "Telangana", 17.3850, 78.4867, &HYDERABAD_TEMPLATES),
    city("chennai", "Chennai", "Tamil Nadu", 13.0827, 80.2707, &CHENNAI_TEMPLATES),
    city("kolkata", "Kolkata", "West Bengal", 22.5726, 88.3639, &KOLKATA_TEMPLATES),
    city("pune", "Pune", "Maharashtra", 18.5204, 73.8567, &PUNE_TEMPLATES),
    city("ahmedabad", "Ahmedabad", "Gujarat", 23.0225, 72.5714, &AHMEDABAD_TEMPLATES),
    city("jaipur", "Jaipur", "Rajasthan", 26.9124, 75.7873, &JAIPUR_TEMPLATES),
    city("lucknow", "Lucknow", "Uttar Pradesh", 26.8467, 80.9462, &LUCKNOW_TEMPLATES),
];

const fn city(
    id: &'static str,
    name: &'static str,
    state: &'static str,
    lat: f64,
    lng: f64,
    templates: &'static [PharmacyTemplate],
) -> City {
    City {
        id,
        name,
        state,
        center: Coordinate::new(lat, lng),
        templates,
    }
}

/// Look up a supported city. Matching ignores case and surrounding spaces.
pub fn find_city(id: &str) -> Option<&'static City> {
    let id = id.trim();
    CITIES.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}

/// Resolve a requested city id under an unknown-city policy.
///
/// Returns `Ok(None)` only for [`UnknownCityPolicy::Empty`]. With
/// [`UnknownCityPolicy::Fallback`], an unknown `default_id` falls back
/// further to [`DEFAULT_CITY_ID`].
///
/// # Errors
///
/// [`GeoError::UnknownCity`] under [`UnknownCityPolicy::Reject`].
pub fn resolve_city(
    id: &str,
    policy: UnknownCityPolicy,
    default_id: &str,
) -> Result<Option<&'static City>> {
    if let Some(city) = find_city(id) {
        return Ok(Some(city));
    }

    match policy {
        UnknownCityPolicy::Fallback => {
            let fallback = find_city(default_id).unwrap_or(&CITIES[0]);
            tracing::warn!(requested = %id, fallback = fallback.id, "Unknown city, using fallback");
            Ok(Some(fallback))
        }
        UnknownCityPolicy::Empty => {
            tracing::debug!(requested = %id, "Unknown city, no pharmacies");
            Ok(None)
        }
        UnknownCityPolicy::Reject => Err(GeoError::UnknownCity(id.to_string())),
    }
}

const MUMBAI_TEMPLATES: [PharmacyTemplate; 12] = [
    PharmacyTemplate::new("Apollo Pharmacy", "Andheri West", "+91-22-2673-4567"),
    PharmacyTemplate::new("MedPlus", "Bandra", "+91-22-2640-8901"),
    PharmacyTemplate::new("Wellness Forever", "Powai", "+91-22-2571-2345"),
    PharmacyTemplate::new("1mg", "Goregaon", "+91-22-2875-6789"),
    PharmacyTemplate::new("PharmEasy Store", "Malad", "+91-22-2880-1234"),
    PharmacyTemplate::new("Netmeds", "Borivali", "+91-22-2899-5678"),
    PharmacyTemplate::new("HealthKart Pharmacy", "Dadar", "+91-22-2414-9012"),
    PharmacyTemplate::new("Local Care Pharmacy", "Kandivali", "+91-22-2868-3456"),
    PharmacyTemplate::new("City Medical Store", "Kurla", "+91-22-2507-7890"),
    PharmacyTemplate::new("Quick Heal Medicines", "Vikhroli", "+91-22-2577-1234"),
    PharmacyTemplate::new("Health Plus", "Mulund", "+91-22-2563-5678"),
    PharmacyTemplate::new("Care & Cure Pharmacy", "Thane", "+91-22-2537-9012"),
];

const DELHI_TEMPLATES: [PharmacyTemplate; 12] = [
    PharmacyTemplate::new("Apollo Pharmacy", "Connaught Place", "+91-11-2334-5678"),
    PharmacyTemplate::new("MedPlus", "Saket", "+91-11-4165-9012"),
    PharmacyTemplate::new("Wellness Forever", "Dwarka", "+91-11-4507-3456"),
    PharmacyTemplate::new("Netmeds", "Rohini", "+91-11-2756-7890"),
    PharmacyTemplate::new("HealthKart Pharmacy", "Lajpat Nagar", "+91-11-2984-1234"),
    PharmacyTemplate::new("MediCare Center", "Vasant Kunj", "+91-11-4166-5678"),
    PharmacyTemplate::new("Life Care Pharmacy", "Karol Bagh", "+91-11-2575-9012"),
    PharmacyTemplate::new("Health Hub", "Janakpuri", "+91-11-2559-3456"),
    PharmacyTemplate::new("Quick Meds", "Mayur Vihar", "+91-11-2275-7890"),
    PharmacyTemplate::new("City Pharmacy", "Pitampura", "+91-11-2734-1234"),
    PharmacyTemplate::new("Remedy Store", "Rajouri Garden", "+91-11-2510-5678"),
    PharmacyTemplate::new("Medical Corner", "Nehru Place", "+91-11-2643-9012"),
];

const BANGALORE_TEMPLATES: [PharmacyTemplate; 12] = [
    PharmacyTemplate::new("Apollo Pharmacy", "Koramangala", "+91-80-4112-3456"),
    PharmacyTemplate::new("MedPlus", "Indiranagar", "+91-80-2521-7890"),
    PharmacyTemplate::new("Wellness Forever", "Whitefield", "+91-80-2845-1234"),
    PharmacyTemplate::new("Netmeds", "JP Nagar", "+91-80-2659-5678"),
    PharmacyTemplate::new("1mg Store", "HSR Layout", "+91-80-2573-9012"),
    PharmacyTemplate::new("HealthKart Pharmacy", "Marathahalli", "+91-80-2535-3456"),
    PharmacyTemplate::new("Care Plus Pharmacy", "Jayanagar", "+91-80-2663-7890"),
    PharmacyTemplate::new("MediCare Plus", "BTM Layout", "+91-80-2678-1234"),
    PharmacyTemplate::new("Health Station", "Electronic City", "+91-80-2785-5678"),
    PharmacyTemplate::new("Quick Relief Pharmacy", "Yelahanka", "+91-80-2846-9012"),
    PharmacyTemplate::new("Remedy Hub", "Banashankari", "+91-80-2661-3456"),
    PharmacyTemplate::new("Life Care Medical", "Rajajinagar", "+91-80-2331-7890"),
];

const HYDERABAD_TEMPLATES: [PharmacyTemplate; 12] = [
    PharmacyTemplate::new("Apollo Pharmacy", "Banjara Hills", "+91-40-2335-1234"),
    PharmacyTemplate::new("MedPlus", "Kukatpally", "+91-40-2372-5678"),
    PharmacyTemplate::new("Wellness Forever", "Madhapur", "+91-40-2311-9012"),
    PharmacyTemplate::new("Netmeds", "Ameerpet", "+91-40-2373-3456"),
    PharmacyTemplate::new("HealthKart Pharmacy", "Dilsukhnagar", "+91-40-2404-7890"),
    PharmacyTemplate::new("Care Pharmacy", "Secunderabad", "+91-40-2784-1234"),
    PharmacyTemplate::new("Health Plus", "LB Nagar", "+91-40-2424-5678"),
    PharmacyTemplate::new("MediWorld", "Miyapur", "+91-40-2304-9012"),
    PharmacyTemplate::new("Quick Heal", "Gachibowli", "+91-40-2300-3456"),
    PharmacyTemplate::new("Life Care", "Kondapur", "+91-40-2311-7890"),
    PharmacyTemplate::new("City Medical", "Habsiguda", "+91-40-2771-1234"),
    PharmacyTemplate::new("Health Hub", "Nagole", "+91-40-2443-5678"),
];

const CHENNAI_TEMPLATES: [PharmacyTemplate; 12] = [
    PharmacyTemplate::new("Apollo Pharmacy", "T Nagar", "+91-44-2434-9012"),
    PharmacyTemplate::new("MedPlus", "Anna Nagar", "+91-44-2615-3456"),
    PharmacyTemplate::new("Wellness Forever", "Velachery", "+91-44-2246-7890"),
    PharmacyTemplate::new("Netmeds", "Adyar", "+91-44-2441-1234"),
    PharmacyTemplate::new("HealthKart Pharmacy", "Porur", "+91-44-2476-5678"),
    PharmacyTemplate::new("Care Plus", "Tambaram", "+91-44-2226-9012"),
    PharmacyTemplate::new("Health Station", "Chrompet", "+91-44-2247-3456"),
    PharmacyTemplate::new("MediCare", "Mylapore", "+91-44-2466-7890"),
    PharmacyTemplate::new("Quick Meds", "Nungambakkam", "+91-44-2827-1234"),
    PharmacyTemplate::new("Life Care", "OMR", "+91-44-2450-5678"),
    PharmacyTemplate::new("City Pharmacy", "Kodambakkam", "+91-44-2372-9012"),
    PharmacyTemplate::new("Health Plus", "Sholinganallur", "+91-44-2450-3456"),
];

const KOLKATA_TEMPLATES: [PharmacyTemplate; 12] = [
    PharmacyTemplate::new("Apollo Pharmacy", "Park Street", "+91-33-2229-7890"),
    PharmacyTemplate::new("MedPlus", "Salt Lake", "+91-33-2321-1234"),
    PharmacyTemplate::new("Wellness Forever", "New Town", "+91-33-2359-5678"),
    PharmacyTemplate::new("Netmeds", "Howrah", "+91-33-2662-9012"),
    PharmacyTemplate::new("HealthKart Pharmacy", "Ballygunge", "+91-33-2440-3456"),
    PharmacyTemplate::new("Care Pharmacy", "Jadavpur", "+91-33-2413-7890"),
    PharmacyTemplate::new("Health Hub", "Rajarhat", "+91-33-2357-1234"),
    PharmacyTemplate::new("MediWorld", "Dum Dum", "+91-33-2566-5678"),
    PharmacyTemplate::new("Quick Relief", "Behala", "+91-33-2463-9012"),
    PharmacyTemplate::new("Life Care", "Barasat", "+91-33-2562-3456"),
    PharmacyTemplate::new("City Medical", "Alipore", "+91-33-2479-7890"),
    PharmacyTemplate::new("Health Station", "Gariahat", "+91-33-2441-1234"),
];

const PUNE_TEMPLATES: [PharmacyTemplate; 12] = [
    PharmacyTemplate::new("Apollo Pharmacy", "Koregaon Park", "+91-20-2613-5678"),
    PharmacyTemplate::new("MedPlus", "Hinjewadi", "+91-20-2293-9012"),
    PharmacyTemplate::new("Wellness Forever", "Viman Nagar", "+91-20-2668-3456"),
    PharmacyTemplate::new("Netmeds", "Kothrud", "+91-20-2542-7890"),
    PharmacyTemplate::new("HealthKart Pharmacy", "Aundh", "+91-20-2588-1234"),
    PharmacyTemplate::new("Care Plus", "Wakad", "+91-20-2749-5678"),
    PharmacyTemplate::new("Health Station", "Shivajinagar", "+91-20-2553-9012"),
    PharmacyTemplate::new("MediCare", "Hadapsar", "+91-20-2698-3456"),
    PharmacyTemplate::new("Quick Meds", "Baner", "+91-20-2729-7890"),
    PharmacyTemplate::new("Life Care", "Pimpri", "+91-20-2742-1234"),
    PharmacyTemplate::new("City Pharmacy", "Deccan", "+91-20-2553-5678"),
    PharmacyTemplate::new("Health Plus", "Magarpatta", "+91-20-2688-9012"),
];

const AHMEDABAD_TEMPLATES: [PharmacyTemplate; 12] = [
    PharmacyTemplate::new("Apollo Pharmacy", "Satellite", "+91-79-2630-3456"),
    PharmacyTemplate::new("MedPlus", "Vastrapur", "+91-79-2630-7890"),
    PharmacyTemplate::new("Wellness Forever", "Maninagar", "+91-79-2546-1234"),
    PharmacyTemplate::new("Netmeds", "SG Highway", "+91-79-2970-5678"),
    PharmacyTemplate::new("HealthKart Pharmacy", "Bopal", "+91-79-2716-9012"),
    PharmacyTemplate::new("Care Pharmacy", "Chandkheda", "+91-79-2764-3456"),
    PharmacyTemplate::new("Health Hub", "Paldi", "+91-79-2658-7890"),
    PharmacyTemplate::new("MediWorld", "Naranpura", "+91-79-2749-1234"),
    PharmacyTemplate::new("Quick Relief", "Ghatlodia", "+91-79-2758-5678"),
    PharmacyTemplate::new("Life Care", "Bodakdev", "+91-79-2687-9012"),
    PharmacyTemplate::new("City Medical", "Thaltej", "+91-79-2970-3456"),
    PharmacyTemplate::new("Health Station", "Navrangpura", "+91-79-2644-7890"),
];

const JAIPUR_TEMPLATES: [PharmacyTemplate; 12] = [
    PharmacyTemplate::new("Apollo Pharmacy", "Malviya Nagar", "+91-141-401-1234"),
    PharmacyTemplate::new("MedPlus", "Vaishali Nagar", "+91-141-232-5678"),
    PharmacyTemplate::new("Wellness Forever", "Mansarovar", "+91-141-239-9012"),
    PharmacyTemplate::new("Netmeds", "Raja Park", "+91-141-222-3456"),
    PharmacyTemplate::new("HealthKart Pharmacy", "Tonk Road", "+91-141-272-7890"),
    PharmacyTemplate::new("Care Plus", "Jagatpura", "+91-141-277-1234"),
    PharmacyTemplate::new("Health Station", "C-Scheme", "+91-141-237-5678"),
    PharmacyTemplate::new("MediCare", "Bajaj Nagar", "+91-141-265-9012"),
    PharmacyTemplate::new("Quick Meds", "Pratap Nagar", "+91-141-262-3456"),
    PharmacyTemplate::new("Life Care", "Jhotwara", "+91-141-265-7890"),
    PharmacyTemplate::new("City Pharmacy", "MI Road", "+91-141-237-1234"),
    PharmacyTemplate::new("Health Plus", "Sitapura", "+91-141-277-5678"),
];

const LUCKNOW_TEMPLATES: [PharmacyTemplate; 12] = [
    PharmacyTemplate::new("Apollo Pharmacy", "Gomti Nagar", "+91-522-402-9012"),
    PharmacyTemplate::new("MedPlus", "Hazratganj", "+91-522-262-3456"),
    PharmacyTemplate::new("Wellness Forever", "Aliganj", "+91-522-236-7890"),
    PharmacyTemplate::new("Netmeds", "Indira Nagar", "+91-522-234-1234"),
    PharmacyTemplate::new("HealthKart Pharmacy", "Alambagh", "+91-522-265-5678"),
    PharmacyTemplate::new("Care Pharmacy", "Rajajipuram", "+91-522-235-9012"),
    PharmacyTemplate::new("Health Hub", "Mahanagar", "+91-522-238-3456"),
    PharmacyTemplate::new("MediWorld", "Chowk", "+91-522-262-7890"),
    PharmacyTemplate::new("Quick Relief", "Aminabad", "+91-522-262-1234"),
    PharmacyTemplate::new("Life Care", "Jankipuram", "+91-522-405-5678"),
    PharmacyTemplate::new("City Medical", "Kaiserbagh", "+91-522-223-9012"),
    PharmacyTemplate::new("Health Station", "Vikas Nagar", "+91-522-234-3456"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_city_has_twelve_templates() {
        for city in &CITIES {
            assert_eq!(city.templates.len(), 12, "{}", city.id);
            assert!(city.center.is_valid());
        }
    }

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<_> = CITIES.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CITIES.len());
    }

    #[test]
    fn test_find_city_ignores_case() {
        assert_eq!(find_city(" Pune ").map(|c| c.state), Some("Maharashtra"));
        assert!(find_city("atlantis").is_none());
    }

    #[test]
    fn test_fallback_policy() {
        let city = resolve_city("atlantis", UnknownCityPolicy::Fallback, "delhi").unwrap();
        assert_eq!(city.map(|c| c.id), Some("delhi"));

        let city = resolve_city("atlantis", UnknownCityPolicy::Fallback, "nowhere").unwrap();
        assert_eq!(city.map(|c| c.id), Some(DEFAULT_CITY_ID));
    }

    #[test]
    fn test_empty_and_reject_policies() {
        assert!(resolve_city("atlantis", UnknownCityPolicy::Empty, "mumbai").unwrap().is_none());
        assert!(matches!(
            resolve_city("atlantis", UnknownCityPolicy::Reject, "mumbai"),
            Err(GeoError::UnknownCity(_))
        ));
    }

    #[test]
    fn test_known_city_ignores_policy() {
        let city = resolve_city("chennai", UnknownCityPolicy::Reject, "mumbai").unwrap();
        assert_eq!(city.map(|c| c.name), Some("Chennai"));
    }
}
