use actix::prelude::*;
use colored::Color;
use common::logger::Logger;
use common::messages::{
    BeginSearch, CenterChanged, GetViewportState, SearchThisArea, SearchVenues, UIMessage,
};
use common::types::coordinates::LatLng;
use common::types::map::ViewportState;

/// The `ViewportTracker` actor remembers the center of the last search and
/// decides when the map has drifted away from it.
///
/// ## Responsibilities:
/// - Compare every reported center with the last-searched one (exact equality).
/// - Show or hide the "search this area" control when dirtiness flips.
/// - Re-run the venue search when the user asks for it.
pub struct ViewportTracker {
    last_searched: Option<LatLng>,
    current: Option<LatLng>,
    dirty: bool,
    aggregator: Recipient<SearchVenues>,
    ui: Option<Recipient<UIMessage>>,
    logger: Logger,
}

impl ViewportTracker {
    pub fn new(aggregator: Recipient<SearchVenues>, ui: Option<Recipient<UIMessage>>) -> Self {
        ViewportTracker {
            last_searched: None,
            current: None,
            dirty: false,
            aggregator,
            ui,
            logger: Logger::new("Viewport Tracker", Color::Blue),
        }
    }

    fn set_dirty(&mut self, dirty: bool) {
        if self.dirty == dirty {
            return;
        }
        self.dirty = dirty;
        if let Some(ui) = &self.ui {
            ui.do_send(UIMessage::SearchAreaButton(dirty));
        }
    }

    fn search(&mut self, center: LatLng) {
        self.last_searched = Some(center);
        self.current = Some(center);
        self.set_dirty(false);
        self.aggregator.do_send(SearchVenues { center });
    }
}

impl Actor for ViewportTracker {
    type Context = Context<Self>;
}

impl Handler<BeginSearch> for ViewportTracker {
    type Result = ();

    fn handle(&mut self, msg: BeginSearch, _ctx: &mut Self::Context) -> Self::Result {
        self.logger.info(format!("Searching around {}", msg.center));
        self.search(msg.center);
    }
}

impl Handler<CenterChanged> for ViewportTracker {
    type Result = ();

    fn handle(&mut self, msg: CenterChanged, _ctx: &mut Self::Context) -> Self::Result {
        self.current = Some(msg.center);
        // Nothing to compare against before the first search.
        let dirty = self
            .last_searched
            .is_some_and(|last| last != msg.center);
        self.set_dirty(dirty);
    }
}

impl Handler<SearchThisArea> for ViewportTracker {
    type Result = bool;

    fn handle(&mut self, _msg: SearchThisArea, _ctx: &mut Self::Context) -> Self::Result {
        match self.current {
            Some(center) if self.dirty => {
                self.logger.info(format!("Searching this area {}", center));
                self.search(center);
                true
            }
            _ => {
                self.logger.info("Viewport has not moved since the last search");
                false
            }
        }
    }
}

impl Handler<GetViewportState> for ViewportTracker {
    type Result = MessageResult<GetViewportState>;

    fn handle(&mut self, _msg: GetViewportState, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(ViewportState {
            last_searched: self.last_searched,
            current: self.current,
            dirty: self.dirty,
        })
    }
}
