use clap::Parser;
use clap::builder::BoolishValueParser;
use colored::Color;
use common::constants::{
    API_KEY_ENV, DEFAULT_CENTER, DEFAULT_ZOOM, LEGACY_API_KEY_ENV, MAX_ZOOM, MIN_ZOOM,
};
use common::logger::Logger;
use common::types::coordinates::LatLng;
use std::env;

#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "happyhour", about = "Happy-hour venues around a map center")]
pub struct Config {
    /// Places API key. Missing or blank keys surface as a map load failure.
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,
    /// Use simulated venues instead of the places web service.
    #[arg(long, env = "HAPPYHOUR_OFFLINE", value_parser = BoolishValueParser::new())]
    pub offline: bool,
    #[arg(
        long,
        env = "HAPPYHOUR_CENTER_LAT",
        default_value_t = DEFAULT_CENTER.lat,
        allow_negative_numbers = true
    )]
    pub center_lat: f64,
    #[arg(
        long,
        env = "HAPPYHOUR_CENTER_LNG",
        default_value_t = DEFAULT_CENTER.lng,
        allow_negative_numbers = true
    )]
    pub center_lng: f64,
    #[arg(long, env = "HAPPYHOUR_ZOOM", default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,
}

impl Config {
    /// Parses the command line and environment, exiting with usage on bad input.
    pub fn load() -> Self {
        Self::parse().validated(|key| env::var(key).ok())
    }

    /// Applies the legacy key fallback, the center bounds check and the zoom clamp.
    pub fn validated<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let logger = Logger::new("Config", Color::Cyan);

        self.api_key = self
            .api_key
            .or_else(|| lookup(LEGACY_API_KEY_ENV))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if !self.center().is_valid() {
            logger.warn(format!(
                "Center {} is out of bounds, using default {}",
                self.center(),
                DEFAULT_CENTER
            ));
            self.center_lat = DEFAULT_CENTER.lat;
            self.center_lng = DEFAULT_CENTER.lng;
        }

        let zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom != self.zoom {
            logger.warn(format!("Zoom {} clamped to {}", self.zoom, zoom));
            self.zoom = zoom;
        }
        self
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(self.center_lat, self.center_lng)
    }
}
