use crate::config::ListingSettings;
use crate::errors::ServerError;
use crate::listing::codec::NAME_KEY;
use crate::listing::{ListingController, ListingError, LoadState, QueryMap, Transport};
use crate::responses::{html_fragment_response, html_response, json_response, see_other, ResultResp};
use crate::templates::pages::{
    listings_fragment, request_preview_page, search_page, ListingsVm, PreviewVm,
};
use astra::Request;
use std::sync::Arc;

/// Shared, read-only state handed to every request.
pub struct App {
    pub settings: ListingSettings,
    pub transport: Arc<dyn Transport>,
}

impl App {
    pub fn new(settings: ListingSettings, transport: Arc<dyn Transport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Each request is its own navigation, so each gets its own controller.
    fn controller(&self) -> ListingController {
        ListingController::new(&self.settings, Arc::clone(&self.transport))
    }
}

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let query = QueryMap::parse(req.uri().query().unwrap_or_default());

    log::debug!("{method} {path}");

    match (method, path) {
        ("GET", "/") => search(app, query),
        ("GET", "/listings") => listings(app, query),
        ("GET", "/listings.json") => listings_json(app, query),

        // Form targets: each commits a new URL and redirects to it.
        ("GET", "/search") => apply_filters(app, query),
        ("GET", "/sort") => change_sort(app, query),
        ("GET", "/name") => search_name(app, query),

        ("GET", "/request-preview") => request_preview(app, query, false),
        ("POST", "/request-preview") => request_preview(app, query, true),
        (
            _,
            "/" | "/listings" | "/listings.json" | "/search" | "/sort" | "/name" | "/request-preview",
        ) => Err(
            ServerError::BadRequest(format!("{method} is not supported on {path}")),
        ),
        _ => Err(ServerError::NotFound),
    }
}

/// Renders the search page for the canonical form of `query`, redirecting
/// first when the URL carries defaults or values that do not decode.
fn search(app: &App, query: QueryMap) -> ResultResp {
    let mut controller = app.controller();
    controller.observe(query);

    let canonical = controller.codec().encode(controller.filters());
    if &canonical != controller.query() {
        return see_other(&canonical.to_href("/"));
    }

    html_response(search_page(controller.filters(), controller.query()))
}

/// Loads `query`, retrying once when the request never completed.
fn load(app: &App, query: QueryMap) -> ListingController {
    let mut controller = app.controller();
    if let LoadState::Failed(ListingError::Network(err)) = controller.navigate(query) {
        log::info!("retrying listing request after network error: {err}");
        controller.retry();
    }
    controller
}

fn listings(app: &App, query: QueryMap) -> ResultResp {
    let controller = load(app, query);

    let vm = ListingsVm {
        records: controller.visible_records(),
        page: controller.page(),
        failed: matches!(controller.state(), LoadState::Failed(_)),
        previous_href: controller.previous_page().map(|q| q.to_href("/")),
        next_href: controller.next_page().map(|q| q.to_href("/")),
        page_href: controller.query().to_href("/"),
        fragment_href: controller.query().to_href("/listings"),
    };

    html_fragment_response(listings_fragment(&vm))
}

fn listings_json(app: &App, query: QueryMap) -> ResultResp {
    let controller = load(app, query);
    json_response(&controller.snapshot())
}

fn apply_filters(app: &App, form: QueryMap) -> ResultResp {
    let controller = app.controller();
    let draft = controller.codec().decode(&form);
    see_other(&controller.apply_filters(draft).to_href("/"))
}

fn change_sort(app: &App, form: QueryMap) -> ResultResp {
    let mut controller = app.controller();
    controller.observe(form);
    let sort = controller.filters().sort;
    see_other(&controller.change_sort(sort).to_href("/"))
}

fn search_name(app: &App, form: QueryMap) -> ResultResp {
    let name = form.get(NAME_KEY).unwrap_or_default().to_string();
    let mut controller = app.controller();
    controller.observe(form);
    see_other(&controller.search_name(&name).to_href("/"))
}

/// Shows the request the current URL would send. With `send`, also sends it
/// once, without retrying, and shows the raw answer.
fn request_preview(app: &App, query: QueryMap, send: bool) -> ResultResp {
    let mut controller = app.controller();
    controller.observe(query);

    let request = controller.builder().build(controller.filters());
    let response = match (&request, send) {
        (Ok(request), true) => Some(controller.send_test_request(request)),
        _ => None,
    };

    html_response(request_preview_page(&PreviewVm {
        endpoint: controller.builder().base_endpoint(),
        request: request.as_ref(),
        response: response.as_ref().map(Result::as_ref),
        search_href: controller.query().to_href("/"),
        preview_href: controller.query().to_href("/request-preview"),
    }))
}
