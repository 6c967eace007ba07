pub mod category;
pub mod coordinates;
pub mod deal;
pub mod map;
pub mod marker;
pub mod search;
pub mod venue;
