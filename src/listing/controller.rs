// src/listing/controller.rs

use crate::config::ListingSettings;
use crate::listing::codec::{QueryMap, UrlCodec};
use crate::listing::error::{ListingError, Outcome};
use crate::listing::filters::{FilterState, SortKey};
use crate::listing::normalize::{PropertyRecord, ResponseNormalizer};
use crate::listing::request::{OutboundRequest, RequestBuilder};
use crate::listing::transport::{Transport, TransportResponse};
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Records of one successfully loaded page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub records: Vec<PropertyRecord>,
    pub outcome: Outcome,
    pub dropped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready(QueryResult),
    Failed(ListingError),
}

/// What the presentation layer gets to see.
#[derive(Debug, Serialize)]
pub struct ListingView<'a> {
    pub records: Vec<&'a PropertyRecord>,
    /// `None` until the current navigation has finished.
    pub outcome: Option<Outcome>,
    pub page: u32,
    pub loading: bool,
    pub dropped: usize,
}

/// One navigation in flight: the decoded URL snapshot and the request built
/// from it, tagged with the generation it was started under.
#[derive(Debug)]
pub struct Navigation {
    generation: u64,
    latest: Arc<AtomicU64>,
    page: u32,
    request: Result<OutboundRequest, ListingError>,
}

impl Navigation {
    /// Page this navigation was started for.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// A newer navigation has started since this one.
    pub fn is_superseded(&self) -> bool {
        self.latest.load(Ordering::SeqCst) != self.generation
    }
}

#[derive(Debug)]
pub struct Completion {
    generation: u64,
    result: Result<QueryResult, ListingError>,
}

/// Drives URL -> request -> upstream -> records for the listing page.
///
/// The URL is the only source of search state: actions return the URL to
/// navigate to and never touch the current state. Results are applied
/// last-navigation-wins via a generation counter.
pub struct ListingController {
    codec: UrlCodec,
    builder: RequestBuilder,
    normalizer: ResponseNormalizer,
    transport: Arc<dyn Transport>,
    latest: Arc<AtomicU64>,
    disable_next_on_empty: bool,

    query: QueryMap,
    filters: FilterState,
    state: LoadState,
}

impl ListingController {
    pub fn new(settings: &ListingSettings, transport: Arc<dyn Transport>) -> Self {
        Self {
            codec: UrlCodec::new(settings.default_sort),
            builder: RequestBuilder::new(settings.endpoint.clone(), settings.section.clone()),
            normalizer: ResponseNormalizer::new(settings.placeholder_image.clone()),
            transport,
            latest: Arc::new(AtomicU64::new(0)),
            disable_next_on_empty: settings.disable_next_on_empty,
            query: QueryMap::new(),
            filters: FilterState::new(settings.default_sort),
            state: LoadState::Idle,
        }
    }

    pub fn codec(&self) -> &UrlCodec {
        &self.codec
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.filters.page
    }

    /// The URL snapshot the current state was decoded from.
    pub fn query(&self) -> &QueryMap {
        &self.query
    }

    /// Takes `query` as the current URL without loading it, for actions that
    /// only need to compute the next URL. Supersedes any navigation in flight.
    pub fn observe(&mut self, query: QueryMap) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.filters = self.codec.decode(&query);
        self.query = query;
        self.state = LoadState::Idle;
    }

    /// Starts a navigation to `query`. Previous results are discarded right
    /// away; nothing from the old page survives into `Loading`.
    pub fn begin(&mut self, query: QueryMap) -> Navigation {
        let filters = self.codec.decode(&query);
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let request = self.builder.build(&filters);
        let page = filters.page;

        self.query = query;
        self.filters = filters;
        self.state = LoadState::Loading;

        Navigation {
            generation,
            latest: Arc::clone(&self.latest),
            page,
            request,
        }
    }

    /// Runs the upstream call for `navigation`.
    ///
    /// Returns `None` without touching the transport if the navigation was
    /// already superseded.
    pub fn load(&self, navigation: &Navigation) -> Option<Completion> {
        if navigation.is_superseded() {
            log::debug!(
                "skipping superseded navigation #{} before sending",
                navigation.generation
            );
            return None;
        }

        let result = match &navigation.request {
            Ok(request) => self.fetch(request, navigation.page),
            Err(err) => Err(err.clone()),
        };

        Some(Completion {
            generation: navigation.generation,
            result,
        })
    }

    /// Applies a completion if it belongs to the latest navigation. Returns
    /// whether it was applied.
    pub fn finish(&mut self, completion: Completion) -> bool {
        let latest = self.latest.load(Ordering::SeqCst);
        if completion.generation != latest {
            log::debug!(
                "discarding stale response for navigation #{} (latest is #{latest})",
                completion.generation
            );
            return false;
        }

        self.state = match completion.result {
            Ok(result) => LoadState::Ready(result),
            Err(err) => {
                log::warn!("listing page {} failed to load: {err}", self.filters.page);
                LoadState::Failed(err)
            }
        };
        true
    }

    pub fn navigate(&mut self, query: QueryMap) -> &LoadState {
        let navigation = self.begin(query);
        if let Some(completion) = self.load(&navigation) {
            self.finish(completion);
        }
        &self.state
    }

    /// Re-issues the current URL snapshot.
    pub fn retry(&mut self) -> &LoadState {
        let query = self.query.clone();
        self.navigate(query)
    }

    fn fetch(&self, request: &OutboundRequest, page: u32) -> Result<QueryResult, ListingError> {
        let resp = self
            .transport
            .send(request)
            .map_err(|e| ListingError::Network(e.0))?;

        if !resp.is_success() {
            return Err(ListingError::UpstreamStatus {
                status: resp.status,
            });
        }

        let payload: Value = serde_json::from_str(&resp.body)
            .map_err(|e| ListingError::UpstreamBody(e.to_string()))?;

        let normalized = self.normalizer.normalize(&payload);
        log::debug!(
            "page {page}: {} record(s) via {:?} envelope",
            normalized.records.len(),
            normalized.envelope
        );
        if normalized.dropped > 0 {
            log::warn!(
                "{} malformed upstream record(s) dropped on page {page}",
                normalized.dropped
            );
        }

        Ok(QueryResult {
            records: normalized.records,
            outcome: Outcome::Ok,
            dropped: normalized.dropped,
        })
    }

    /// Sends `request` once and hands back the raw answer, whatever its
    /// status. Used by the API request page; does not touch the load state.
    pub fn send_test_request(
        &self,
        request: &OutboundRequest,
    ) -> Result<TransportResponse, ListingError> {
        log::info!("sending test request to {}", request.url);
        self.transport
            .send(request)
            .map_err(|e| ListingError::Network(e.0))
    }

    /// Current page after the client-side name filter.
    pub fn visible_records(&self) -> Vec<&PropertyRecord> {
        match &self.state {
            LoadState::Ready(result) => result
                .records
                .iter()
                .filter(|record| self.filters.matches_name(&record.name))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> ListingView<'_> {
        let (outcome, dropped) = match &self.state {
            LoadState::Ready(result) => (Some(result.outcome), result.dropped),
            LoadState::Failed(err) => (Some(err.outcome()), 0),
            LoadState::Idle | LoadState::Loading => (None, 0),
        };

        ListingView {
            records: self.visible_records(),
            outcome,
            page: self.filters.page,
            loading: matches!(self.state, LoadState::Loading),
            dropped,
        }
    }

    // Actions. Each returns the URL to navigate to.

    /// New criteria always start again from page 1.
    pub fn apply_filters(&self, draft: FilterState) -> QueryMap {
        let mut next = draft;
        next.page = 1;
        self.codec.encode(&next)
    }

    pub fn change_sort(&self, sort: SortKey) -> QueryMap {
        let next = self.filters.clone().with_sort(sort).with_page(1);
        self.codec.encode(&next)
    }

    /// `None` for pages below 1.
    pub fn go_to_page(&self, page: i64) -> Option<QueryMap> {
        let page = u32::try_from(page).ok().filter(|p| *p >= 1)?;
        Some(self.codec.encode(&self.filters.clone().with_page(page)))
    }

    pub fn next_page(&self) -> Option<QueryMap> {
        let exhausted = matches!(&self.state, LoadState::Ready(result) if result.records.is_empty());
        if self.disable_next_on_empty && exhausted {
            return None;
        }
        self.go_to_page(i64::from(self.filters.page) + 1)
    }

    pub fn previous_page(&self) -> Option<QueryMap> {
        self.go_to_page(i64::from(self.filters.page) - 1)
    }

    /// Narrows the loaded page by name. Does not change the page number.
    pub fn search_name(&self, text: &str) -> QueryMap {
        self.codec.encode(&self.filters.clone().with_name_query(text))
    }
}
