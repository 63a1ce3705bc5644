//! Command implementations

pub mod browse;
pub mod cities;
pub mod directions;
pub mod inventory;
pub mod pharmacies;
pub mod quote;
pub mod search;
pub mod suggest;
