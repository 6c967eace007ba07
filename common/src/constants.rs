use crate::types::category::Category;
use crate::types::coordinates::LatLng;
use std::time::Duration;

/// Place types searched on every run, in merge order.
pub const SEARCH_CATEGORIES: [Category; 4] = [
    Category::Bar,
    Category::Restaurant,
    Category::NightClub,
    Category::Brewery,
];
pub const MAX_RESULTS_PER_CATEGORY: usize = 60;
const PAGE_DELAY_SECONDS: u64 = 2;
/// A pagination token is not accepted by the provider until it has been live for a short while.
pub const PAGE_TOKEN_DELAY: Duration = Duration::from_secs(PAGE_DELAY_SECONDS);

/// Lower East Side, Manhattan.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 40.7209,
    lng: -73.9844,
};
pub const DEFAULT_ZOOM: u8 = 14;
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 22;

pub const PLACES_NEARBY_SEARCH_URL: &str =
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";
pub const LEGACY_API_KEY_ENV: &str = "NEXT_PUBLIC_GOOGLE_MAPS_API_KEY";

pub const OFFLINE_PAGE_SIZE: usize = 20;
pub const OFFLINE_VENUES_PER_CATEGORY: usize = 45;

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
pub const METERS_PER_MILE: f64 = 1_609.344;
