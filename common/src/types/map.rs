use crate::constants::{DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::types::coordinates::LatLng;
use serde::{Deserialize, Serialize};

/// Lifecycle of the map surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapStatus {
    Loading,
    Ready,
    /// The provider library could not be loaded. Not retried.
    LoadFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Snapshot of the search-area tracking state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
    /// Center used by the most recent search.
    pub last_searched: Option<LatLng>,
    /// Center most recently reported by the map.
    pub current: Option<LatLng>,
    pub dirty: bool,
}
