use crate::types::coordinates::LatLng;
use crate::types::venue::Venue;
use crate::utils::haversine_distance;
use serde::{Deserialize, Serialize};

/// A venue placed on the map, with its distance from the search center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub venue: Venue,
    pub distance_meters: f64,
}

impl Marker {
    pub fn new(venue: Venue, search_center: LatLng) -> Self {
        let distance_meters = haversine_distance(search_center, venue.location);
        Marker {
            venue,
            distance_meters,
        }
    }

    pub fn id(&self) -> &str {
        &self.venue.id
    }
}
