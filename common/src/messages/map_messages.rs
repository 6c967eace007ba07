use crate::types::coordinates::LatLng;
use crate::types::map::{MapStatus, Viewport};
use actix::Message;

/// Message asking the map host to load the provider library.
///
/// ## Purpose
/// Sent once when the UI starts. On success the map becomes `Ready` and the
/// initial venue search is issued; on failure the map stays in `LoadFailed`.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct LoadMap;

/// Message moving the map viewport to a new center.
///
/// ## Contents
/// - `center`: The new viewport center.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct PanTo {
    pub center: LatLng,
}

#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct Zoom {
    pub level: u8,
}

/// Fired by the map host once the viewport has settled after a change.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct MapIdle;

#[derive(Message, Debug, Clone)]
#[rtype(result = "MapStatus")]
pub struct GetMapStatus;

#[derive(Message, Debug, Clone)]
#[rtype(result = "Viewport")]
pub struct GetViewport;
