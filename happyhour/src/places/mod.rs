pub mod google;
pub mod offline;
#[cfg(test)]
pub mod scripted;

use crate::config::Config;
use crate::error::PlacesResult;
use common::types::category::Category;
use common::types::coordinates::LatLng;
use common::types::venue::Venue;
use google::GooglePlaces;
use offline::OfflinePlaces;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type PlacesFuture<T> = Pin<Box<dyn Future<Output = PlacesResult<T>>>>;

/// One nearby-search request, ranked by distance from `center`.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearchRequest {
    pub center: LatLng,
    pub category: Category,
    /// Continues a previous search when set.
    pub page_token: Option<String>,
}

impl NearbySearchRequest {
    pub fn first_page(center: LatLng, category: Category) -> Self {
        NearbySearchRequest {
            center,
            category,
            page_token: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacesPage {
    pub venues: Vec<Venue>,
    pub next_page_token: Option<String>,
    /// Provider records skipped because they had no id or location.
    pub dropped: usize,
}

/// The places service the map is backed by.
pub trait PlacesProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Loads the provider library; fails when the credentials are missing or rejected.
    fn load(&self) -> PlacesFuture<()>;

    fn nearby_search(&self, request: NearbySearchRequest) -> PlacesFuture<PlacesPage>;
}

pub fn provider_from_config(config: &Config) -> Arc<dyn PlacesProvider> {
    if config.offline {
        Arc::new(OfflinePlaces::new())
    } else {
        Arc::new(GooglePlaces::new(config.api_key.clone()))
    }
}
