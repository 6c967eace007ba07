use crate::error::{PlacesError, PlacesResult};
use crate::places::{NearbySearchRequest, PlacesFuture, PlacesPage, PlacesProvider};
use common::types::category::Category;
use common::types::coordinates::LatLng;
use common::types::venue::Venue;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Script = dyn Fn(&NearbySearchRequest) -> PlacesResult<PlacesPage> + Send + Sync;

/// In-memory provider answering from a closure, recording every request.
pub struct ScriptedPlaces {
    script: Box<Script>,
    latency: HashMap<Category, Duration>,
    load_error: Option<String>,
    pub calls: Arc<Mutex<Vec<NearbySearchRequest>>>,
}

impl ScriptedPlaces {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&NearbySearchRequest) -> PlacesResult<PlacesPage> + Send + Sync + 'static,
    {
        ScriptedPlaces {
            script: Box::new(script),
            latency: HashMap::new(),
            load_error: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_latency(mut self, category: Category, latency: Duration) -> Self {
        self.latency.insert(category, latency);
        self
    }

    pub fn with_uniform_latency(mut self, latency: Duration) -> Self {
        for category in common::constants::SEARCH_CATEGORIES {
            self.latency.insert(category, latency);
        }
        self
    }

    pub fn failing_load(mut self, reason: &str) -> Self {
        self.load_error = Some(reason.to_string());
        self
    }

    pub fn calls_for(&self, category: Category) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.iter().filter(|c| c.category == category).count())
            .unwrap_or(0)
    }
}

impl PlacesProvider for ScriptedPlaces {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn load(&self) -> PlacesFuture<()> {
        let result = match &self.load_error {
            Some(reason) => Err(PlacesError::RequestDenied(reason.clone())),
            None => Ok(()),
        };
        Box::pin(async move { result })
    }

    fn nearby_search(&self, request: NearbySearchRequest) -> PlacesFuture<PlacesPage> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }
        let result = (self.script)(&request);
        let latency = self.latency.get(&request.category).copied();
        Box::pin(async move {
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            result
        })
    }
}

pub fn venue(id: &str) -> Venue {
    Venue::new(id, format!("Venue {}", id), LatLng::new(40.7209, -73.9844))
}

pub fn page(ids: &[&str], next_page_token: Option<&str>) -> PlacesPage {
    PlacesPage {
        venues: ids.iter().map(|id| venue(id)).collect(),
        next_page_token: next_page_token.map(str::to_string),
        dropped: 0,
    }
}
