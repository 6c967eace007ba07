use actix::prelude::*;
use colored::Color;
use common::error::SelectionError;
use common::logger::Logger;
use common::messages::{
    CloseInfoPanel, GetMarkers, GetSelection, SelectVenue, UIMessage, VenuesPublished,
};
use common::types::marker::Marker;
use common::types::venue::Venue;

/// The `MarkerLayer` actor holds one marker per published venue and the single
/// venue whose info panel is open.
pub struct MarkerLayer {
    markers: Vec<Marker>,
    selected: Option<String>,
    ui: Option<Recipient<UIMessage>>,
    logger: Logger,
}

impl MarkerLayer {
    pub fn new(ui: Option<Recipient<UIMessage>>) -> Self {
        MarkerLayer {
            markers: Vec::new(),
            selected: None,
            ui,
            logger: Logger::new("Marker Layer", Color::Green),
        }
    }

    fn find(&self, venue_id: &str) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id() == venue_id)
    }

    fn notify(&self, msg: UIMessage) {
        if let Some(ui) = &self.ui {
            ui.do_send(msg);
        }
    }
}

impl Actor for MarkerLayer {
    type Context = Context<Self>;
}

impl Handler<VenuesPublished> for MarkerLayer {
    type Result = ();

    fn handle(&mut self, msg: VenuesPublished, _ctx: &mut Self::Context) -> Self::Result {
        let center = msg.center;
        self.markers = msg
            .venues
            .into_iter()
            .map(|venue| Marker::new(venue, center))
            .collect();
        self.logger.info(format!(
            "Rendered {} markers for run {}",
            self.markers.len(),
            msg.run_id
        ));

        // The open panel goes away with its marker.
        if let Some(selected) = self.selected.clone() {
            if self.find(&selected).is_none() {
                self.selected = None;
                self.notify(UIMessage::InfoPanelClosed);
            }
        }

        self.notify(UIMessage::MarkersRendered {
            run_id: msg.run_id,
            markers: self.markers.clone(),
            report: msg.report,
        });
    }
}

impl Handler<SelectVenue> for MarkerLayer {
    type Result = Result<Venue, SelectionError>;

    fn handle(&mut self, msg: SelectVenue, _ctx: &mut Self::Context) -> Self::Result {
        let Some(marker) = self.find(&msg.venue_id).cloned() else {
            self.logger.warn(format!("Cannot select unknown venue {}", msg.venue_id));
            return Err(SelectionError::UnknownVenue(msg.venue_id));
        };

        if let Some(previous) = self.selected.replace(msg.venue_id) {
            if previous != marker.venue.id {
                self.logger.info(format!("Closing info panel of {}", previous));
            }
        }
        self.notify(UIMessage::InfoPanelOpened(marker.clone()));
        Ok(marker.venue)
    }
}

impl Handler<CloseInfoPanel> for MarkerLayer {
    type Result = ();

    fn handle(&mut self, _msg: CloseInfoPanel, _ctx: &mut Self::Context) -> Self::Result {
        if self.selected.take().is_some() {
            self.notify(UIMessage::InfoPanelClosed);
        }
    }
}

impl Handler<GetSelection> for MarkerLayer {
    type Result = Option<String>;

    fn handle(&mut self, _msg: GetSelection, _ctx: &mut Self::Context) -> Self::Result {
        self.selected.clone()
    }
}

impl Handler<GetMarkers> for MarkerLayer {
    type Result = Vec<Marker>;

    fn handle(&mut self, _msg: GetMarkers, _ctx: &mut Self::Context) -> Self::Result {
        self.markers.clone()
    }
}
