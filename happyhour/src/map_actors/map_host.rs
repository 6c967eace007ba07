use crate::map_actors::viewport_tracker::ViewportTracker;
use crate::places::PlacesProvider;
use actix::fut::wrap_future;
use actix::prelude::*;
use colored::Color;
use common::constants::{MAX_ZOOM, MIN_ZOOM};
use common::logger::Logger;
use common::messages::{
    BeginSearch, CenterChanged, GetMapStatus, GetViewport, LoadMap, MapIdle, PanTo, UIMessage,
    Zoom,
};
use common::types::map::{MapStatus, Viewport};
use std::sync::Arc;

/// The `MapHost` actor owns the map viewport and its load state.
///
/// ## Responsibilities:
/// - Load the provider library and report success or failure.
/// - Issue the first search once the map is ready.
/// - Report center changes to the viewport tracker and idle events to the UI.
pub struct MapHost {
    provider: Arc<dyn PlacesProvider>,
    viewport: Viewport,
    status: MapStatus,
    tracker: Addr<ViewportTracker>,
    ui: Option<Recipient<UIMessage>>,
    logger: Logger,
}

impl MapHost {
    pub fn new(
        provider: Arc<dyn PlacesProvider>,
        viewport: Viewport,
        tracker: Addr<ViewportTracker>,
        ui: Option<Recipient<UIMessage>>,
    ) -> Self {
        MapHost {
            provider,
            viewport,
            status: MapStatus::Loading,
            tracker,
            ui,
            logger: Logger::new("Map Host", Color::Yellow),
        }
    }

    fn notify(&self, msg: UIMessage) {
        if let Some(ui) = &self.ui {
            ui.do_send(msg);
        }
    }

    fn ensure_ready(&self, action: &str) -> bool {
        if self.status == MapStatus::Ready {
            return true;
        }
        self.logger.warn(format!("Ignoring {} while the map is {:?}", action, self.status));
        false
    }
}

impl Actor for MapHost {
    type Context = Context<Self>;
}

impl Handler<LoadMap> for MapHost {
    type Result = ();

    fn handle(&mut self, _msg: LoadMap, ctx: &mut Self::Context) -> Self::Result {
        if self.status != MapStatus::Loading {
            self.logger.warn(format!("Map already loaded ({:?}), not loading again", self.status));
            return;
        }
        self.logger.info(format!("Loading {} map library...", self.provider.name()));
        self.notify(UIMessage::MapLoading);

        // Hold the mailbox until loading settles so no event sees a half-loaded map.
        ctx.wait(
            wrap_future::<_, Self>(self.provider.load()).map(|result, act, _ctx| match result {
                Ok(()) => {
                    act.status = MapStatus::Ready;
                    act.logger.info(format!("Map ready at {}", act.viewport.center));
                    act.notify(UIMessage::MapReady(act.viewport));
                    act.tracker.do_send(BeginSearch {
                        center: act.viewport.center,
                    });
                }
                Err(err) => {
                    act.logger.error(format!("Map failed to load: {}", err));
                    act.status = MapStatus::LoadFailed(err.to_string());
                    act.notify(UIMessage::MapLoadFailed(err.to_string()));
                }
            }),
        );
    }
}

impl Handler<PanTo> for MapHost {
    type Result = ();

    fn handle(&mut self, msg: PanTo, ctx: &mut Self::Context) -> Self::Result {
        if !self.ensure_ready("pan") {
            return;
        }
        if !msg.center.is_valid() {
            self.logger.warn(format!("Ignoring pan to invalid center {}", msg.center));
            return;
        }
        if msg.center == self.viewport.center {
            return;
        }
        self.viewport.center = msg.center;
        self.tracker.do_send(CenterChanged { center: msg.center });
        ctx.notify(MapIdle);
    }
}

impl Handler<Zoom> for MapHost {
    type Result = ();

    fn handle(&mut self, msg: Zoom, ctx: &mut Self::Context) -> Self::Result {
        if !self.ensure_ready("zoom") {
            return;
        }
        self.viewport.zoom = msg.level.clamp(MIN_ZOOM, MAX_ZOOM);
        ctx.notify(MapIdle);
    }
}

impl Handler<MapIdle> for MapHost {
    type Result = ();

    fn handle(&mut self, _msg: MapIdle, _ctx: &mut Self::Context) -> Self::Result {
        self.notify(UIMessage::MapIdle(self.viewport));
    }
}

impl Handler<GetMapStatus> for MapHost {
    type Result = MessageResult<GetMapStatus>;

    fn handle(&mut self, _msg: GetMapStatus, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.status.clone())
    }
}

impl Handler<GetViewport> for MapHost {
    type Result = MessageResult<GetViewport>;

    fn handle(&mut self, _msg: GetViewport, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.viewport)
    }
}
