pub mod commands;
pub mod config;
pub mod deal_list;
pub mod error;
pub mod map_actors;
pub mod places;

use crate::config::Config;
use crate::map_actors::map_host::MapHost;
use crate::map_actors::marker_layer::MarkerLayer;
use crate::map_actors::ui_handler::UIHandler;
use crate::map_actors::venue_aggregator::{AggregatorSettings, VenueAggregator};
use crate::map_actors::viewport_tracker::ViewportTracker;
use actix::prelude::*;
use common::types::map::Viewport;

/// Starts every component and wires them together. The map starts loading as
/// soon as the returned UI handler is running.
pub fn launch(config: &Config) -> Addr<UIHandler> {
    let provider = places::provider_from_config(config);
    let viewport = Viewport {
        center: config.center(),
        zoom: config.zoom,
    };

    UIHandler::create(move |ctx| {
        let ui = ctx.address().recipient();
        let marker_layer = MarkerLayer::new(Some(ui.clone())).start();
        let aggregator = VenueAggregator::new(
            provider.clone(),
            AggregatorSettings::default(),
            marker_layer.clone().recipient(),
            Some(ui.clone()),
        )
        .start();
        let tracker = ViewportTracker::new(aggregator.recipient(), Some(ui.clone())).start();
        let map_host = MapHost::new(provider, viewport, tracker.clone(), Some(ui)).start();
        UIHandler::new(map_host, tracker, marker_layer)
    })
}
