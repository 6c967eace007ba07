use crate::error::SelectionError;
use crate::types::marker::Marker;
use crate::types::venue::Venue;
use actix::Message;

/// Selects a venue and opens its info panel, replacing any previous selection.
#[derive(Message, Debug, Clone)]
#[rtype(result = "Result<Venue, SelectionError>")]
pub struct SelectVenue {
    pub venue_id: String,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct CloseInfoPanel;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Option<String>")]
pub struct GetSelection;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Vec<Marker>")]
pub struct GetMarkers;
