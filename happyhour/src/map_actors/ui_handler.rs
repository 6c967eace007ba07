use crate::commands::{USAGE, UserCommand, VenueRef};
use crate::deal_list::DealListPanel;
use crate::map_actors::map_host::MapHost;
use crate::map_actors::marker_layer::MarkerLayer;
use crate::map_actors::viewport_tracker::ViewportTracker;
use actix::prelude::*;
use colored::Color;
use common::error::SelectionError;
use common::logger::Logger;
use common::messages::{
    CloseInfoPanel, GetMapStatus, LoadMap, PanTo, SearchThisArea, SelectVenue, UIMessage, Zoom,
};
use common::types::map::MapStatus;
use common::types::marker::Marker;
use common::types::search::CategoryReport;
use common::utils::format_distance;

/// Actor UIHandler: terminal front-end of the map.
///
/// Turns typed commands into map events and renders what the other components
/// report back.
pub struct UIHandler {
    map_host: Addr<MapHost>,
    tracker: Addr<ViewportTracker>,
    marker_layer: Addr<MarkerLayer>,
    deals: DealListPanel,
    /// Markers of the last render, in list order.
    markers: Vec<Marker>,
    logger: Logger,
}

impl UIHandler {
    pub fn new(
        map_host: Addr<MapHost>,
        tracker: Addr<ViewportTracker>,
        marker_layer: Addr<MarkerLayer>,
    ) -> Self {
        UIHandler {
            map_host,
            tracker,
            marker_layer,
            deals: DealListPanel::default(),
            markers: Vec::new(),
            logger: Logger::new("UI", Color::BrightWhite),
        }
    }

    fn show(&self, lines: Vec<String>) {
        for line in lines {
            self.logger.display(line);
        }
    }

    fn resolve(&self, target: VenueRef) -> Result<String, SelectionError> {
        match target {
            VenueRef::Id(id) => Ok(id),
            VenueRef::Position(position) => self
                .markers
                .get(position.wrapping_sub(1))
                .map(|marker| marker.venue.id.clone())
                .ok_or(SelectionError::IndexOutOfRange(position, self.markers.len())),
        }
    }

    fn select(&mut self, target: VenueRef, ctx: &mut Context<Self>) {
        let venue_id = match self.resolve(target) {
            Ok(venue_id) => venue_id,
            Err(err) => {
                self.logger.warn(err.to_string());
                return;
            }
        };
        self.marker_layer
            .send(SelectVenue { venue_id })
            .into_actor(self)
            .map(|res, act, _ctx| match res {
                Ok(Ok(_)) => {}
                Ok(Err(err)) => act.logger.warn(err.to_string()),
                Err(err) => act
                    .logger
                    .error(format!("Marker layer unavailable: {}", err)),
            })
            .spawn(ctx);
    }

    fn search_this_area(&mut self, ctx: &mut Context<Self>) {
        self.tracker
            .send(SearchThisArea)
            .into_actor(self)
            .map(|res, act, _ctx| match res {
                Ok(true) => {}
                Ok(false) => act
                    .logger
                    .display("The map has not moved since the last search."),
                Err(err) => act
                    .logger
                    .error(format!("Viewport tracker unavailable: {}", err)),
            })
            .spawn(ctx);
    }

    fn show_status(&mut self, ctx: &mut Context<Self>) {
        self.map_host
            .send(GetMapStatus)
            .into_actor(self)
            .map(|res, act, _ctx| match res {
                Ok(MapStatus::LoadFailed(_)) => act.show(render_load_error()),
                Ok(status) => act.logger.display(format!(
                    "Map {:?}, {} venues on the map",
                    status,
                    act.markers.len()
                )),
                Err(err) => act.logger.error(format!("Map host unavailable: {}", err)),
            })
            .spawn(ctx);
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info("UIHandler started, type `help` for commands");
        self.show(self.deals.render());
        self.map_host.do_send(LoadMap);
    }
}

impl Handler<UserCommand> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: UserCommand, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            UserCommand::Pan(center) => self.map_host.do_send(PanTo { center }),
            UserCommand::Zoom(level) => self.map_host.do_send(Zoom { level }),
            UserCommand::Search => self.search_this_area(ctx),
            UserCommand::Venues => self.show(render_venue_list(&self.markers)),
            UserCommand::Select(target) => self.select(target, ctx),
            UserCommand::Close => self.marker_layer.do_send(CloseInfoPanel),
            UserCommand::Deals(query) => {
                self.deals.set_query(query);
                self.show(self.deals.render());
            }
            UserCommand::Status => self.show_status(ctx),
            UserCommand::Help => self.logger.display(USAGE),
            UserCommand::Quit => {
                self.logger.info("Bye!");
                System::current().stop();
            }
        }
    }
}

impl Handler<UIMessage> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: UIMessage, _ctx: &mut Self::Context) -> Self::Result {
        match msg {
            UIMessage::MapLoading => self.logger.display("Loading map..."),
            UIMessage::MapReady(viewport) => self.logger.display(format!(
                "Map ready at {} (zoom {})",
                viewport.center, viewport.zoom
            )),
            UIMessage::MapLoadFailed(_) => self.show(render_load_error()),
            UIMessage::MapIdle(viewport) => self.logger.display(format!(
                "Map at {} (zoom {})",
                viewport.center, viewport.zoom
            )),
            UIMessage::SearchAreaButton(true) => {
                self.logger.display("[ ⟳ Search this area ]  (type `search`)")
            }
            UIMessage::SearchAreaButton(false) => {}
            UIMessage::SearchStarted { center, .. } => self
                .logger
                .display(format!("Searching for venues around {}...", center)),
            UIMessage::MarkersRendered {
                markers, report, ..
            } => {
                self.show(render_search_summary(&markers, &report));
                self.markers = markers;
            }
            UIMessage::InfoPanelOpened(marker) => self.show(render_info_panel(&marker)),
            UIMessage::InfoPanelClosed => self.logger.display("Info panel closed."),
        }
    }
}

pub fn render_load_error() -> Vec<String> {
    vec![
        "┌──────────────────────────────────────────┐".to_string(),
        "│  Map failed to load                      │".to_string(),
        "│  Please check your API key configuration │".to_string(),
        "└──────────────────────────────────────────┘".to_string(),
    ]
}

// Failed and empty categories are only logged, never shown.
pub fn render_search_summary(markers: &[Marker], report: &[CategoryReport]) -> Vec<String> {
    let contributing = report
        .iter()
        .filter(|entry| entry.venue_count > 0)
        .count();
    vec![format!(
        "{} venues on the map ({} of {} categories returned results). Type `venues` to list them.",
        markers.len(),
        contributing,
        report.len()
    )]
}

pub fn render_venue_list(markers: &[Marker]) -> Vec<String> {
    if markers.is_empty() {
        return vec!["No venues on the map.".to_string()];
    }
    markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let rating = marker
                .venue
                .rating
                .map(|rating| format!("★ {:.1}", rating))
                .unwrap_or_else(|| "no rating".to_string());
            format!(
                "#{:<3} {}  {}  {}  ({})",
                i + 1,
                marker.venue.name,
                rating,
                format_distance(marker.distance_meters),
                marker.venue.id
            )
        })
        .collect()
}

pub fn render_info_panel(marker: &Marker) -> Vec<String> {
    let mut lines = vec![format!("┌ {}", marker.venue.name)];
    if let Some(rating) = marker.venue.rating {
        lines.push(format!("│ ★ {:.1}", rating));
    }
    lines.push(format!("│ {} away", format_distance(marker.distance_meters)));
    lines.push("└ [ View Happy Hours ]  (type `close` to dismiss)".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::category::Category;
    use common::types::coordinates::LatLng;
    use common::types::search::CategoryOutcome;
    use common::types::venue::Venue;

    fn marker(id: &str, rating: Option<f64>) -> Marker {
        let center = LatLng::new(40.7209, -73.9844);
        Marker::new(
            Venue::new(id, format!("Venue {}", id), LatLng::new(40.7239, -73.9844))
                .with_rating(rating),
            center,
        )
    }

    #[test]
    fn test_info_panel_shows_rating_only_when_present() {
        let with_rating = render_info_panel(&marker("a", Some(4.5)));
        assert_eq!(with_rating[0], "┌ Venue a");
        assert_eq!(with_rating[1], "│ ★ 4.5");
        assert_eq!(with_rating[2], "│ 0.2 mi away");

        let without = render_info_panel(&marker("b", None));
        assert_eq!(without.len(), 3);
    }

    #[test]
    fn test_venue_list_is_numbered_from_one() {
        let lines = render_venue_list(&[marker("a", Some(4.0)), marker("b", None)]);
        assert!(lines[0].starts_with("#1"));
        assert!(lines[0].ends_with("(a)"));
        assert!(lines[1].contains("no rating"));
        assert_eq!(render_venue_list(&[]), vec!["No venues on the map.".to_string()]);
    }

    #[test]
    fn test_summary_counts_contributing_categories() {
        let report = vec![
            CategoryReport {
                category: Category::Bar,
                outcome: CategoryOutcome::Completed { pages: 1 },
                venue_count: 5,
            },
            CategoryReport {
                category: Category::Brewery,
                outcome: CategoryOutcome::Failed("denied".to_string()),
                venue_count: 0,
            },
        ];
        let lines = render_search_summary(&[marker("a", None)], &report);
        assert!(lines[0].starts_with("1 venues on the map (1 of 2 categories"));
    }

    #[test]
    fn test_load_error_panel_text() {
        let lines = render_load_error();
        assert!(lines[1].contains("Map failed to load"));
        assert!(lines[2].contains("Please check your API key configuration"));
    }
}
