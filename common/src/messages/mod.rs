pub mod map_messages;
pub mod marker_messages;
pub mod search_messages;
pub mod ui_messages;

pub use map_messages::*;
pub use marker_messages::*;
pub use search_messages::*;
pub use ui_messages::*;
