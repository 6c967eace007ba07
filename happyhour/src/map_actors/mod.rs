pub mod map_host;
pub mod marker_layer;
pub mod ui_handler;
pub mod venue_aggregator;
pub mod viewport_tracker;
