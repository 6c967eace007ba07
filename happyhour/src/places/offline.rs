use crate::error::PlacesError;
use crate::places::{NearbySearchRequest, PlacesFuture, PlacesPage, PlacesProvider};
use common::constants::{OFFLINE_PAGE_SIZE, OFFLINE_VENUES_PER_CATEGORY, SEARCH_CATEGORIES};
use common::types::category::Category;
use common::types::coordinates::LatLng;
use common::types::venue::Venue;
use common::utils::haversine_distance;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NAME_PREFIXES: [&str; 8] = [
    "Rusty", "Neon", "Golden", "Velvet", "Copper", "Lucky", "Blue", "Old",
];
const NAME_SUFFIXES: [&str; 8] = [
    "Anchor", "Lounge", "Tap", "Cellar", "Room", "Tavern", "Garden", "Still",
];

/// Simulated places around the requested center, for running without an API key.
///
/// Every category draws from a shared pool of venues with overlapping ranges, so
/// the same venue id shows up under several categories. Venues are generated
/// from a seed derived from the center, so a given center always yields the same
/// venues.
pub struct OfflinePlaces {
    venues_per_category: usize,
    page_size: usize,
}

impl OfflinePlaces {
    pub fn new() -> Self {
        OfflinePlaces {
            venues_per_category: OFFLINE_VENUES_PER_CATEGORY,
            page_size: OFFLINE_PAGE_SIZE,
        }
    }

    fn pool_start(&self, category: Category) -> usize {
        let position = SEARCH_CATEGORIES
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        position * (self.venues_per_category / 2 + 3)
    }

    fn categories_of(&self, pool_index: usize) -> Vec<String> {
        SEARCH_CATEGORIES
            .iter()
            .filter(|category| {
                let start = self.pool_start(**category);
                (start..start + self.venues_per_category).contains(&pool_index)
            })
            .map(|category| category.as_str().to_string())
            .collect()
    }

    fn venue(&self, center: LatLng, pool_index: usize) -> Venue {
        let seed = center_seed(center) ^ (pool_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = StdRng::seed_from_u64(seed);
        let location = LatLng::new(
            center.lat + rng.gen_range(-0.012..0.012),
            center.lng + rng.gen_range(-0.015..0.015),
        );
        let rating = (rng.gen_range(30..=50) as f64) / 10.0;
        let name = format!(
            "{} {}",
            NAME_PREFIXES[pool_index % NAME_PREFIXES.len()],
            NAME_SUFFIXES[(pool_index / NAME_PREFIXES.len()) % NAME_SUFFIXES.len()]
        );

        Venue::new(format!("offline-{:03}", pool_index), name, location)
            .with_rating(Some(rating))
            .with_categories(self.categories_of(pool_index))
    }

    /// All venues of a category, nearest first.
    fn ranked(&self, center: LatLng, category: Category) -> Vec<Venue> {
        let start = self.pool_start(category);
        let mut venues: Vec<Venue> = (start..start + self.venues_per_category)
            .map(|pool_index| self.venue(center, pool_index))
            .collect();
        venues.sort_by(|a, b| {
            let to_a = haversine_distance(center, a.location);
            to_a.total_cmp(&haversine_distance(center, b.location))
        });
        venues
    }

    fn page(&self, request: &NearbySearchRequest) -> Result<PlacesPage, PlacesError> {
        let offset = match &request.page_token {
            None => 0,
            Some(token) => parse_token(token, request.category)?,
        };

        let venues: Vec<Venue> = self
            .ranked(request.center, request.category)
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .collect();
        let next = offset + venues.len();
        let next_page_token = (!venues.is_empty() && next < self.venues_per_category)
            .then(|| format!("{}:{}", request.category.as_str(), next));

        Ok(PlacesPage {
            venues,
            next_page_token,
            dropped: 0,
        })
    }
}

impl Default for OfflinePlaces {
    fn default() -> Self {
        Self::new()
    }
}

fn center_seed(center: LatLng) -> u64 {
    center.lat.to_bits() ^ center.lng.to_bits().rotate_left(17)
}

fn parse_token(token: &str, category: Category) -> Result<usize, PlacesError> {
    token
        .split_once(':')
        .filter(|(name, _)| *name == category.as_str())
        .and_then(|(_, offset)| offset.parse().ok())
        .ok_or_else(|| PlacesError::InvalidRequest(format!("unknown page token {}", token)))
}

impl PlacesProvider for OfflinePlaces {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn load(&self) -> PlacesFuture<()> {
        Box::pin(async { Ok(()) })
    }

    fn nearby_search(&self, request: NearbySearchRequest) -> PlacesFuture<PlacesPage> {
        let page = self.page(&request);
        Box::pin(async move { page })
    }
}
