use crate::error::{PlacesError, PlacesResult};
use crate::places::{NearbySearchRequest, PlacesFuture, PlacesPage, PlacesProvider};
use common::constants::PLACES_NEARBY_SEARCH_URL;
use common::types::coordinates::LatLng;
use common::types::venue::Venue;
use reqwest::Client;
use serde::Deserialize;

/// Places backed by the Google Places nearby-search web service.
pub struct GooglePlaces {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GooglePlaces {
    pub fn new(api_key: Option<String>) -> Self {
        GooglePlaces {
            client: Client::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: PLACES_NEARBY_SEARCH_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn query(request: &NearbySearchRequest, key: &str) -> Vec<(&'static str, String)> {
        match &request.page_token {
            Some(token) => vec![("pagetoken", token.clone()), ("key", key.to_string())],
            None => vec![
                (
                    "location",
                    format!("{},{}", request.center.lat, request.center.lng),
                ),
                ("rankby", "distance".to_string()),
                ("type", request.category.as_str().to_string()),
                ("key", key.to_string()),
            ],
        }
    }
}

async fn fetch(
    client: Client,
    url: String,
    query: Vec<(&'static str, String)>,
) -> PlacesResult<NearbySearchResponse> {
    let response = client.get(&url).query(&query).send().await?;
    if !response.status().is_success() {
        return Err(PlacesError::HttpStatus(response.status().as_u16()));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

impl PlacesProvider for GooglePlaces {
    fn name(&self) -> &'static str {
        "google places"
    }

    // A keyed request without a location is answered with INVALID_REQUEST when
    // the key is accepted and REQUEST_DENIED when it is not.
    fn load(&self) -> PlacesFuture<()> {
        let Some(key) = self.api_key.clone() else {
            return Box::pin(async { Err(PlacesError::MissingApiKey) });
        };
        let client = self.client.clone();
        let url = self.base_url.clone();

        Box::pin(async move {
            let response = fetch(client, url, vec![("key", key)]).await?;
            match response.status.as_str() {
                "REQUEST_DENIED" => Err(PlacesError::RequestDenied(
                    response.error_message.unwrap_or_default(),
                )),
                _ => Ok(()),
            }
        })
    }

    fn nearby_search(&self, request: NearbySearchRequest) -> PlacesFuture<PlacesPage> {
        let Some(key) = self.api_key.clone() else {
            return Box::pin(async { Err(PlacesError::MissingApiKey) });
        };
        let client = self.client.clone();
        let url = self.base_url.clone();
        let query = Self::query(&request, &key);

        Box::pin(async move { fetch(client, url, query).await?.into_page() })
    }
}

#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    pub next_page_token: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceResult {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub geometry: Option<Geometry>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl NearbySearchResponse {
    /// Maps the service status onto a page or a typed error.
    pub fn into_page(self) -> PlacesResult<PlacesPage> {
        let message = self.error_message.unwrap_or_default();
        match self.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Ok(PlacesPage::default()),
            "REQUEST_DENIED" => return Err(PlacesError::RequestDenied(message)),
            "INVALID_REQUEST" => return Err(PlacesError::InvalidRequest(message)),
            "OVER_QUERY_LIMIT" => return Err(PlacesError::OverQueryLimit),
            other => return Err(PlacesError::UnexpectedStatus(other.to_string())),
        }

        let total = self.results.len();
        let venues: Vec<Venue> = self
            .results
            .into_iter()
            .filter_map(PlaceResult::into_venue)
            .collect();

        Ok(PlacesPage {
            dropped: total - venues.len(),
            venues,
            next_page_token: self.next_page_token.filter(|token| !token.is_empty()),
        })
    }
}

impl PlaceResult {
    fn into_venue(self) -> Option<Venue> {
        let id = self.place_id.filter(|id| !id.is_empty())?;
        let location = self.geometry?.location;
        Some(
            Venue::new(
                id,
                self.name.unwrap_or_else(|| "Unknown".to_string()),
                LatLng::new(location.lat, location.lng),
            )
            .with_rating(self.rating)
            .with_categories(self.types),
        )
    }
}
