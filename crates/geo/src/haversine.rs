//! Great-circle distance.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// # Example
/// ```
/// use medfinder_geo::{haversine_distance, Coordinate};
///
/// let mumbai = Coordinate::new(19.0760, 72.8777);
/// let pune = Coordinate::new(18.5204, 73.8567);
///
/// let distance = haversine_distance(&mumbai, &pune);
/// assert!((distance - 120.0).abs() < 5.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let half_d_lat = (lat2 - lat1) / 2.0;
    let half_d_lon = (lon2 - lon1) / 2.0;

    let a = half_d_lat.sin().powi(2) + lat1.cos() * lat2.cos() * half_d_lon.sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}
