use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic coordinate in degrees.
///
/// Equality is exact: two centers are the same only if both components are
/// bit-for-bit equal floats. Search-area dirtiness relies on this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    /// Whether the coordinate is finite and within latitude/longitude bounds.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_exact() {
        let center = LatLng::new(40.7209, -73.9844);
        assert_eq!(center, LatLng::new(40.7209, -73.9844));
        assert_ne!(center, LatLng::new(40.7209 + 1e-12, -73.9844));
    }

    #[test]
    fn test_bounds_validation() {
        assert!(LatLng::new(90.0, -180.0).is_valid());
        assert!(!LatLng::new(90.5, 0.0).is_valid());
        assert!(!LatLng::new(0.0, 181.0).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
    }
}
