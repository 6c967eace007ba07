use crate::error::PlacesResult;
use crate::places::{NearbySearchRequest, PlacesPage, PlacesProvider};
use actix::fut::wrap_future;
use actix::prelude::*;
use colored::Color;
use common::constants::{MAX_RESULTS_PER_CATEGORY, PAGE_TOKEN_DELAY, SEARCH_CATEGORIES};
use common::logger::Logger;
use common::messages::{GetAggregatorStatus, SearchVenues, UIMessage, VenuesPublished};
use common::types::category::Category;
use common::types::coordinates::LatLng;
use common::types::search::{AggregatorStatus, CategoryOutcome, CategoryReport};
use common::types::venue::Venue;
use common::utils::dedup_venues;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    /// Categories searched on every run, in merge order.
    pub categories: Vec<Category>,
    pub max_results_per_category: usize,
    /// Wait between two page requests of the same category.
    pub page_delay: Duration,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        AggregatorSettings {
            categories: SEARCH_CATEGORIES.to_vec(),
            max_results_per_category: MAX_RESULTS_PER_CATEGORY,
            page_delay: PAGE_TOKEN_DELAY,
        }
    }
}

/// Pagination state of one category, moved from each continuation into the next.
#[derive(Debug)]
struct PageCursor {
    category: Category,
    venues: Vec<Venue>,
    pages: u32,
    next_page_token: Option<String>,
}

impl PageCursor {
    fn first(category: Category) -> Self {
        PageCursor {
            category,
            venues: Vec::new(),
            pages: 0,
            next_page_token: None,
        }
    }

    /// Appends a page without growing past `cap`. Returns whether another page
    /// should be requested.
    fn absorb(&mut self, page: PlacesPage, cap: usize) -> bool {
        self.pages += 1;
        let room = cap.saturating_sub(self.venues.len());
        self.venues.extend(page.venues.into_iter().take(room));
        self.next_page_token = if self.venues.len() < cap {
            page.next_page_token
        } else {
            None
        };
        self.next_page_token.is_some()
    }

    fn finish(self, outcome: CategoryOutcome) -> CategoryResult {
        CategoryResult {
            category: self.category,
            outcome,
            venues: self.venues,
        }
    }
}

#[derive(Debug)]
struct CategoryResult {
    category: Category,
    outcome: CategoryOutcome,
    venues: Vec<Venue>,
}

/// Bookkeeping of one run: finished categories and the task each unfinished
/// category is currently waiting on (a provider request or a page timer).
struct SearchRun {
    id: u64,
    center: LatLng,
    finished: HashMap<Category, CategoryResult>,
    tasks: HashMap<Category, SpawnHandle>,
}

impl SearchRun {
    fn new(id: u64, center: LatLng) -> Self {
        SearchRun {
            id,
            center,
            finished: HashMap::new(),
            tasks: HashMap::new(),
        }
    }

    fn cancel_all(&mut self, ctx: &mut Context<VenueAggregator>) -> usize {
        let outstanding = self.tasks.len();
        for (_, handle) in self.tasks.drain() {
            ctx.cancel_future(handle);
        }
        outstanding
    }
}

/// The `VenueAggregator` actor runs the category searches around a center and
/// publishes the merged, deduplicated venue list.
///
/// ## Responsibilities:
/// - Issue one nearby search per category and follow its pagination tokens,
///   pacing page requests and capping the venues kept per category.
/// - Count every category exactly once, whether it completed, returned no
///   results or failed, and publish only once all of them are done.
/// - Tag each run with an increasing id; starting a run cancels the previous
///   one, so only the latest run can publish.
pub struct VenueAggregator {
    provider: Arc<dyn PlacesProvider>,
    settings: AggregatorSettings,
    /// Receives the published venue lists.
    publisher: Recipient<VenuesPublished>,
    ui: Option<Recipient<UIMessage>>,
    next_run_id: u64,
    active: Option<SearchRun>,
    last_published_run: Option<u64>,
    last_report: Vec<CategoryReport>,
    logger: Logger,
}

impl VenueAggregator {
    pub fn new(
        provider: Arc<dyn PlacesProvider>,
        settings: AggregatorSettings,
        publisher: Recipient<VenuesPublished>,
        ui: Option<Recipient<UIMessage>>,
    ) -> Self {
        let mut settings = settings;
        let mut seen = Vec::with_capacity(settings.categories.len());
        settings.categories.retain(|category| {
            let first = !seen.contains(category);
            seen.push(*category);
            first
        });

        VenueAggregator {
            provider,
            settings,
            publisher,
            ui,
            next_run_id: 0,
            active: None,
            last_published_run: None,
            last_report: Vec::new(),
            logger: Logger::new("Venue Aggregator", Color::Magenta),
        }
    }

    fn is_current(&self, run_id: u64) -> bool {
        self.active.as_ref().is_some_and(|run| run.id == run_id)
    }

    fn start_run(&mut self, center: LatLng, ctx: &mut Context<Self>) -> u64 {
        if let Some(mut previous) = self.active.take() {
            let cancelled = previous.cancel_all(ctx);
            self.logger.warn(format!(
                "Run {} superseded before publishing, cancelled {} pending task(s)",
                previous.id, cancelled
            ));
        }

        self.next_run_id += 1;
        let run_id = self.next_run_id;
        self.active = Some(SearchRun::new(run_id, center));
        self.logger.info(format!(
            "Run {}: searching {} categories around {} via {}",
            run_id,
            self.settings.categories.len(),
            center,
            self.provider.name()
        ));
        if let Some(ui) = &self.ui {
            ui.do_send(UIMessage::SearchStarted { run_id, center });
        }

        for category in self.settings.categories.clone() {
            self.fetch_page(run_id, PageCursor::first(category), ctx);
        }
        self.publish_if_complete(run_id);
        run_id
    }

    fn track(&mut self, run_id: u64, category: Category, handle: SpawnHandle) {
        if let Some(run) = self.active.as_mut().filter(|run| run.id == run_id) {
            run.tasks.insert(category, handle);
        }
    }

    fn fetch_page(&mut self, run_id: u64, cursor: PageCursor, ctx: &mut Context<Self>) {
        let Some(center) = self
            .active
            .as_ref()
            .filter(|run| run.id == run_id)
            .map(|run| run.center)
        else {
            self.logger.warn(format!(
                "Dropping {} page request of stale run {}",
                cursor.category, run_id
            ));
            return;
        };

        let category = cursor.category;
        let request = NearbySearchRequest {
            center,
            category,
            page_token: cursor.next_page_token.clone(),
        };
        let fut = wrap_future::<_, Self>(self.provider.nearby_search(request)).map(
            move |result, act, ctx| act.on_page(run_id, cursor, result, ctx),
        );
        let handle = ctx.spawn(fut);
        self.track(run_id, category, handle);
    }

    fn on_page(
        &mut self,
        run_id: u64,
        mut cursor: PageCursor,
        result: PlacesResult<PlacesPage>,
        ctx: &mut Context<Self>,
    ) {
        if !self.is_current(run_id) {
            self.logger.warn(format!(
                "Discarding {} page of stale run {}",
                cursor.category, run_id
            ));
            return;
        }

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                self.logger.warn(format!(
                    "Run {}: {} search failed on page {}: {}",
                    run_id,
                    cursor.category,
                    cursor.pages + 1,
                    err
                ));
                let outcome = CategoryOutcome::Failed(err.to_string());
                self.finish_category(run_id, cursor.finish(outcome));
                return;
            }
        };

        if page.dropped > 0 {
            self.logger.warn(format!(
                "Run {}: skipped {} {} record(s) without id or location",
                run_id, page.dropped, cursor.category
            ));
        }

        if cursor.absorb(page, self.settings.max_results_per_category) {
            let category = cursor.category;
            let handle = ctx.run_later(self.settings.page_delay, move |act, ctx| {
                act.fetch_page(run_id, cursor, ctx)
            });
            self.track(run_id, category, handle);
            return;
        }

        let outcome = if cursor.venues.is_empty() && cursor.pages == 1 {
            self.logger.warn(format!(
                "Run {}: no {} venues found",
                run_id, cursor.category
            ));
            CategoryOutcome::ZeroResults
        } else {
            CategoryOutcome::Completed {
                pages: cursor.pages,
            }
        };
        self.finish_category(run_id, cursor.finish(outcome));
    }

    /// Records the terminal state of a category. Later reports for a category
    /// that already finished are ignored.
    fn finish_category(&mut self, run_id: u64, result: CategoryResult) {
        let Some(run) = self.active.as_mut().filter(|run| run.id == run_id) else {
            return;
        };
        run.tasks.remove(&result.category);
        if run.finished.contains_key(&result.category) {
            self.logger.warn(format!(
                "Run {}: {} already finished, ignoring repeated completion",
                run_id, result.category
            ));
            return;
        }
        run.finished.insert(result.category, result);
        self.publish_if_complete(run_id);
    }

    fn publish_if_complete(&mut self, run_id: u64) {
        let complete = self.active.as_ref().is_some_and(|run| {
            run.id == run_id && run.finished.len() == self.settings.categories.len()
        });
        if !complete {
            return;
        }
        if let Some(run) = self.active.take() {
            self.publish(run);
        }
    }

    fn publish(&mut self, mut run: SearchRun) {
        let mut merged = Vec::new();
        let mut report = Vec::with_capacity(self.settings.categories.len());

        for category in &self.settings.categories {
            if let Some(result) = run.finished.remove(category) {
                report.push(CategoryReport {
                    category: result.category,
                    outcome: result.outcome,
                    venue_count: result.venues.len(),
                });
                merged.extend(result.venues);
            }
        }

        let gathered = merged.len();
        let venues = dedup_venues(merged);
        self.logger.info(format!(
            "Run {}: publishing {} venues ({} before dedup)",
            run.id,
            venues.len(),
            gathered
        ));

        self.last_published_run = Some(run.id);
        self.last_report = report.clone();
        self.publisher.do_send(VenuesPublished {
            run_id: run.id,
            center: run.center,
            venues,
            report,
        });
    }
}

impl Actor for VenueAggregator {
    type Context = Context<Self>;

    fn stopping(&mut self, ctx: &mut Self::Context) -> Running {
        if let Some(mut run) = self.active.take() {
            let cancelled = run.cancel_all(ctx);
            self.logger.info(format!(
                "Stopping with run {} in flight, cancelled {} pending task(s)",
                run.id, cancelled
            ));
        }
        Running::Stop
    }
}

impl Handler<SearchVenues> for VenueAggregator {
    type Result = u64;

    fn handle(&mut self, msg: SearchVenues, ctx: &mut Self::Context) -> Self::Result {
        self.start_run(msg.center, ctx)
    }
}

impl Handler<GetAggregatorStatus> for VenueAggregator {
    type Result = MessageResult<GetAggregatorStatus>;

    fn handle(&mut self, _msg: GetAggregatorStatus, _ctx: &mut Self::Context) -> Self::Result {
        let pending_categories = self
            .active
            .as_ref()
            .map(|run| self.settings.categories.len() - run.finished.len())
            .unwrap_or(0);

        MessageResult(AggregatorStatus {
            latest_run_id: self.next_run_id,
            in_flight: self.active.is_some(),
            pending_categories,
            last_published_run: self.last_published_run,
            last_report: self.last_report.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlacesError;
    use crate::places::scripted::{ScriptedPlaces, page, venue};
    use std::collections::HashSet;
    use std::time::Instant;

    #[derive(Default)]
    struct PublishedLog {
        published: Vec<VenuesPublished>,
    }

    impl Actor for PublishedLog {
        type Context = Context<Self>;
    }

    impl Handler<VenuesPublished> for PublishedLog {
        type Result = ();

        fn handle(&mut self, msg: VenuesPublished, _ctx: &mut Self::Context) -> Self::Result {
            self.published.push(msg);
        }
    }

    #[derive(Message)]
    #[rtype(result = "Vec<VenuesPublished>")]
    struct GetPublished;

    impl Handler<GetPublished> for PublishedLog {
        type Result = MessageResult<GetPublished>;

        fn handle(&mut self, _msg: GetPublished, _ctx: &mut Self::Context) -> Self::Result {
            MessageResult(self.published.clone())
        }
    }

    fn settings(page_delay_ms: u64) -> AggregatorSettings {
        AggregatorSettings {
            page_delay: Duration::from_millis(page_delay_ms),
            ..AggregatorSettings::default()
        }
    }

    fn start(
        provider: Arc<ScriptedPlaces>,
        settings: AggregatorSettings,
    ) -> (Addr<VenueAggregator>, Addr<PublishedLog>) {
        let log = PublishedLog::default().start();
        let aggregator =
            VenueAggregator::new(provider, settings, log.clone().recipient(), None).start();
        (aggregator, log)
    }

    async fn wait_for_publications(log: &Addr<PublishedLog>, count: usize) -> Vec<VenuesPublished> {
        let waiting = async {
            loop {
                let published = log.send(GetPublished).await.unwrap();
                if published.len() >= count {
                    return published;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        };
        tokio::time::timeout(Duration::from_secs(5), waiting)
            .await
            .expect("timed out waiting for a publication")
    }

    fn outcome_of(published: &VenuesPublished, category: Category) -> CategoryOutcome {
        published
            .report
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.outcome.clone())
            .expect("category missing from report")
    }

    fn center() -> LatLng {
        LatLng::new(40.7209, -73.9844)
    }

    #[actix_rt::test]
    async fn test_overlapping_categories_publish_six_venues() {
        let provider = Arc::new(ScriptedPlaces::new(|request| match request.category {
            Category::Bar => Ok(page(&["b1", "b2", "s1", "s2", "s3"], None)),
            Category::Restaurant => Ok(page(&["s1", "s2", "s3", "r1"], None)),
            Category::NightClub => Ok(PlacesPage::default()),
            Category::Brewery => Err(PlacesError::RequestDenied("denied".to_string())),
        }));
        let (aggregator, log) = start(provider, settings(1));

        let run_id = aggregator.send(SearchVenues { center: center() }).await.unwrap();
        let published = wait_for_publications(&log, 1).await;
        let result = &published[0];

        assert_eq!(result.run_id, run_id);
        assert_eq!(result.venues.len(), 6);
        assert_eq!(result.report.len(), 4);
        assert_eq!(
            outcome_of(result, Category::Bar),
            CategoryOutcome::Completed { pages: 1 }
        );
        assert_eq!(
            outcome_of(result, Category::NightClub),
            CategoryOutcome::ZeroResults
        );
        assert!(matches!(
            outcome_of(result, Category::Brewery),
            CategoryOutcome::Failed(_)
        ));

        let ids: HashSet<&str> = result.venues.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids.len(), result.venues.len());

        let status = aggregator.send(GetAggregatorStatus).await.unwrap();
        assert!(!status.in_flight);
        assert_eq!(status.pending_categories, 0);
        assert_eq!(status.last_published_run, Some(run_id));
    }

    #[actix_rt::test]
    async fn test_publishes_only_after_every_category_finished() {
        let provider = Arc::new(
            ScriptedPlaces::new(|request| Ok(page(&[request.category.as_str()], None)))
                .with_latency(Category::Brewery, Duration::from_millis(150)),
        );
        let (aggregator, log) = start(provider, settings(1));

        aggregator.send(SearchVenues { center: center() }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(log.send(GetPublished).await.unwrap().is_empty());
        let status = aggregator.send(GetAggregatorStatus).await.unwrap();
        assert!(status.in_flight);
        assert_eq!(status.pending_categories, 1);

        let published = wait_for_publications(&log, 1).await;
        assert_eq!(published[0].venues.len(), 4);
        assert_eq!(
            outcome_of(&published[0], Category::Brewery),
            CategoryOutcome::Completed { pages: 1 }
        );
    }

    #[actix_rt::test]
    async fn test_pagination_stops_at_cap_despite_next_token() {
        let provider = Arc::new(ScriptedPlaces::new(|request| {
            if request.category != Category::Bar {
                return Ok(PlacesPage::default());
            }
            let index: usize = request
                .page_token
                .as_deref()
                .and_then(|token| token.parse().ok())
                .unwrap_or(0);
            Ok(PlacesPage {
                venues: (0..25)
                    .map(|i| venue(&format!("bar-{}-{}", index, i)))
                    .collect(),
                next_page_token: Some((index + 1).to_string()),
                dropped: 0,
            })
        }));
        let (aggregator, log) = start(provider.clone(), settings(1));

        aggregator.send(SearchVenues { center: center() }).await.unwrap();
        let published = wait_for_publications(&log, 1).await;

        assert_eq!(published[0].venues.len(), MAX_RESULTS_PER_CATEGORY);
        assert_eq!(
            outcome_of(&published[0], Category::Bar),
            CategoryOutcome::Completed { pages: 3 }
        );
        assert_eq!(provider.calls_for(Category::Bar), 3);
    }

    #[actix_rt::test]
    async fn test_pages_are_paced_and_follow_tokens() {
        let provider = Arc::new(ScriptedPlaces::new(|request| {
            match (request.category, request.page_token.as_deref()) {
                (Category::Bar, None) => Ok(page(&["b1"], Some("second"))),
                (Category::Bar, Some("second")) => Ok(page(&["b2"], Some("third"))),
                (Category::Bar, Some("third")) => Ok(page(&["b3"], None)),
                (Category::Bar, Some(other)) => Err(PlacesError::InvalidRequest(other.to_string())),
                _ => Ok(PlacesPage::default()),
            }
        }));
        let (aggregator, log) = start(provider.clone(), settings(60));

        let started = Instant::now();
        aggregator.send(SearchVenues { center: center() }).await.unwrap();
        let published = wait_for_publications(&log, 1).await;

        assert!(started.elapsed() >= Duration::from_millis(120));
        assert_eq!(published[0].venues.len(), 3);

        let tokens: Vec<Option<String>> = provider
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.category == Category::Bar)
            .map(|call| call.page_token.clone())
            .collect();
        assert_eq!(
            tokens,
            vec![None, Some("second".to_string()), Some("third".to_string())]
        );
    }

    #[actix_rt::test]
    async fn test_later_page_failure_keeps_earlier_pages() {
        let provider = Arc::new(ScriptedPlaces::new(|request| {
            match (request.category, request.page_token.as_deref()) {
                (Category::Bar, None) => Ok(page(&["b1", "b2"], Some("next"))),
                (Category::Bar, Some(_)) => Err(PlacesError::InvalidRequest("token".to_string())),
                _ => Ok(PlacesPage::default()),
            }
        }));
        let (aggregator, log) = start(provider, settings(1));

        aggregator.send(SearchVenues { center: center() }).await.unwrap();
        let published = wait_for_publications(&log, 1).await;

        assert!(matches!(
            outcome_of(&published[0], Category::Bar),
            CategoryOutcome::Failed(_)
        ));
        assert_eq!(published[0].venues.len(), 2);
    }

    #[actix_rt::test]
    async fn test_only_the_latest_run_publishes() {
        let provider = Arc::new(
            ScriptedPlaces::new(|request| Ok(page(&[request.category.as_str()], None)))
                .with_uniform_latency(Duration::from_millis(40)),
        );
        let (aggregator, log) = start(provider, settings(1));

        let elsewhere = LatLng::new(40.7300, -73.9900);
        let first = aggregator.send(SearchVenues { center: center() }).await.unwrap();
        let second = aggregator.send(SearchVenues { center: elsewhere }).await.unwrap();
        assert!(second > first);

        let published = wait_for_publications(&log, 1).await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        let published_later = log.send(GetPublished).await.unwrap();

        assert_eq!(published_later.len(), 1);
        assert_eq!(published[0].run_id, second);
        assert_eq!(published[0].center, elsewhere);
    }

    #[derive(Message)]
    #[rtype(result = "()")]
    struct Shutdown;

    impl Handler<Shutdown> for VenueAggregator {
        type Result = ();

        fn handle(&mut self, _msg: Shutdown, ctx: &mut Self::Context) -> Self::Result {
            ctx.stop();
        }
    }

    fn bar_with_second_page() -> Arc<ScriptedPlaces> {
        Arc::new(ScriptedPlaces::new(|request| {
            match (request.category, request.page_token.as_deref()) {
                (Category::Bar, None) => Ok(page(&["b1"], Some("next"))),
                (Category::Bar, Some(_)) => Ok(page(&["b2"], None)),
                _ => Ok(PlacesPage::default()),
            }
        }))
    }

    fn bar_calls(provider: &ScriptedPlaces) -> Vec<(LatLng, Option<String>)> {
        provider
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.category == Category::Bar)
            .map(|call| (call.center, call.page_token.clone()))
            .collect()
    }

    #[actix_rt::test]
    async fn test_new_run_cancels_pending_page_timer() {
        let provider = bar_with_second_page();
        let (aggregator, log) = start(provider.clone(), settings(150));

        let elsewhere = LatLng::new(40.7300, -73.9900);
        aggregator.send(SearchVenues { center: center() }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        let second = aggregator.send(SearchVenues { center: elsewhere }).await.unwrap();

        let published = wait_for_publications(&log, 1).await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(
            bar_calls(&provider),
            vec![
                (center(), None),
                (elsewhere, None),
                (elsewhere, Some("next".to_string())),
            ]
        );
        assert_eq!(log.send(GetPublished).await.unwrap().len(), 1);
        assert_eq!(published[0].run_id, second);
        assert_eq!(published[0].venues.len(), 2);
    }

    #[actix_rt::test]
    async fn test_stopping_cancels_pending_page_timer() {
        let provider = bar_with_second_page();
        let (aggregator, log) = start(provider.clone(), settings(150));

        aggregator.send(SearchVenues { center: center() }).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        aggregator.send(Shutdown).await.unwrap();
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert_eq!(bar_calls(&provider), vec![(center(), None)]);
        assert!(log.send(GetPublished).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_repeated_categories_are_searched_once() {
        let provider = Arc::new(ScriptedPlaces::new(|_| Ok(page(&["only"], None))));
        let settings = AggregatorSettings {
            categories: vec![Category::Bar, Category::Bar],
            ..settings(1)
        };
        let (aggregator, log) = start(provider.clone(), settings);

        aggregator.send(SearchVenues { center: center() }).await.unwrap();
        let published = wait_for_publications(&log, 1).await;

        assert_eq!(published[0].report.len(), 1);
        assert_eq!(provider.calls_for(Category::Bar), 1);
    }
}
