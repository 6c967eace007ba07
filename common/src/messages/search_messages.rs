use crate::types::coordinates::LatLng;
use crate::types::map::ViewportState;
use crate::types::search::{AggregatorStatus, CategoryReport};
use crate::types::venue::Venue;
use actix::Message;

/// Message starting a search without going through the dirty check.
///
/// ## Purpose
/// Used by the map host after a successful load; records `center` as the
/// last-searched center and forwards the search to the aggregator.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct BeginSearch {
    pub center: LatLng,
}

/// Center-change notification from the map host.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct CenterChanged {
    pub center: LatLng,
}

/// The "search this area" action. Returns whether a search was issued.
#[derive(Message, Debug, Clone)]
#[rtype(result = "bool")]
pub struct SearchThisArea;

#[derive(Message, Debug, Clone)]
#[rtype(result = "ViewportState")]
pub struct GetViewportState;

/// Message starting an aggregator run around `center`.
///
/// ## Purpose
/// Starts one search per category and invalidates any run still in flight.
/// Returns the id assigned to the new run.
#[derive(Message, Debug, Clone)]
#[rtype(result = "u64")]
pub struct SearchVenues {
    pub center: LatLng,
}

/// Deduplicated result of a completed aggregator run.
///
/// ## Contents
/// - `run_id`: Id of the run that produced the venues.
/// - `center`: Center the run searched around.
/// - `venues`: Venues with unique ids.
/// - `report`: One entry per category, in search order.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct VenuesPublished {
    pub run_id: u64,
    pub center: LatLng,
    pub venues: Vec<Venue>,
    pub report: Vec<CategoryReport>,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "AggregatorStatus")]
pub struct GetAggregatorStatus;
