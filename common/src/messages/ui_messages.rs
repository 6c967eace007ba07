use crate::types::coordinates::LatLng;
use crate::types::map::Viewport;
use crate::types::marker::Marker;
use crate::types::search::CategoryReport;
use actix::Message;

/// Notifications the UI handler renders.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub enum UIMessage {
    MapLoading,
    MapReady(Viewport),
    MapLoadFailed(String),
    MapIdle(Viewport),
    /// The "search this area" control became visible or hidden.
    SearchAreaButton(bool),
    SearchStarted { run_id: u64, center: LatLng },
    MarkersRendered {
        run_id: u64,
        markers: Vec<Marker>,
        report: Vec<CategoryReport>,
    },
    InfoPanelOpened(Marker),
    InfoPanelClosed,
}
