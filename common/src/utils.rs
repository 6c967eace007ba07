use crate::constants::{EARTH_RADIUS_METERS, METERS_PER_MILE};
use crate::types::coordinates::LatLng;
use crate::types::venue::Venue;
use std::collections::HashMap;

/// Great-circle distance between two points, in meters.
pub fn haversine_distance(point1: LatLng, point2: LatLng) -> f64 {
    let lat1 = point1.lat.to_radians();
    let lat2 = point2.lat.to_radians();
    let dlat = (point2.lat - point1.lat).to_radians();
    let dlng = (point2.lng - point1.lng).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
}

/// Formats a distance the way the deal list shows it, e.g. `0.4 mi`.
pub fn format_distance(meters: f64) -> String {
    format!("{:.1} mi", meters / METERS_PER_MILE)
}

/// Collapses venues sharing an id.
///
/// The surviving entry keeps the position of the first occurrence but takes the
/// value of the last one, so later categories overwrite earlier ones.
pub fn dedup_venues(venues: Vec<Venue>) -> Vec<Venue> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Venue> = Vec::with_capacity(venues.len());

    for venue in venues {
        match positions.get(&venue.id) {
            Some(&index) => unique[index] = venue,
            None => {
                positions.insert(venue.id.clone(), unique.len());
                unique.push(venue);
            }
        }
    }
    unique
}
