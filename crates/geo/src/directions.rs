//! Map hand-off and user location input.

use crate::error::{GeoError, Result};
use crate::Coordinate;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// Directions URL ending at `destination`.
///
/// ```
/// use medfinder_geo::{directions_url, Coordinate};
///
/// let url = directions_url(&Coordinate::new(19.076, 72.8777));
/// assert_eq!(url, "https://www.google.com/maps/dir/?api=1&destination=19.076,72.8777");
/// ```
pub fn directions_url(destination: &Coordinate) -> String {
    format!(
        "{DIRECTIONS_BASE}{},{}",
        destination.latitude, destination.longitude
    )
}

/// Parse a manually entered `latitude,longitude` pair.
///
/// # Errors
///
/// [`GeoError::InvalidCoordinate`] when the text is not two numbers or the
/// numbers are out of range.
pub fn parse_coordinate(text: &str) -> Result<Coordinate> {
    let invalid = || GeoError::InvalidCoordinate(text.trim().to_string());

    let (lat, lng) = text.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

    let coord = Coordinate::new(lat, lng);
    if coord.is_valid() { Ok(coord) } else { Err(invalid()) }
}

/// Label for a detected position, two decimals per axis.
pub fn current_location_label(position: &Coordinate) -> String {
    format!(
        "Current Location ({:.2}, {:.2})",
        position.latitude, position.longitude
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        let c = parse_coordinate(" 19.07 , 72.87 ").unwrap();
        assert_eq!(c, Coordinate::new(19.07, 72.87));
    }

    #[test]
    fn test_parse_coordinate_rejects_garbage() {
        assert!(parse_coordinate("Andheri West").is_err());
        assert!(parse_coordinate("19.07").is_err());
        assert!(parse_coordinate("95.0,72.0").is_err());
        assert!(parse_coordinate("NaN,72.0").is_err());
    }

    #[test]
    fn test_current_location_label() {
        let label = current_location_label(&Coordinate::new(19.07604, 72.87772));
        assert_eq!(label, "Current Location (19.08, 72.88)");
    }
}
