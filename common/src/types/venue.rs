use crate::types::coordinates::LatLng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A point of interest returned by a places search. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Provider-assigned identifier, used as the dedup key.
    pub id: String,
    pub name: String,
    pub location: LatLng,
    /// Rating on a 0 to 5 scale, if the provider has one.
    pub rating: Option<f32>,
    /// Place types the provider tagged the venue with.
    pub categories: BTreeSet<String>,
}

impl Venue {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: LatLng) -> Self {
        Venue {
            id: id.into(),
            name: name.into(),
            location,
            rating: None,
            categories: BTreeSet::new(),
        }
    }

    /// Sets the rating, discarding values outside 0..=5.
    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating
            .filter(|r| r.is_finite() && (0.0..=5.0).contains(r))
            .map(|r| r as f32);
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}
