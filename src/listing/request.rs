// src/listing/request.rs

use crate::listing::codec::{PAGE_KEY, SORT_KEY};
use crate::listing::error::ListingError;
use crate::listing::filters::FilterState;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::{json, Map, Value};
use url::{form_urlencoded, Url};

/// A fully built upstream call, ready to hand to a `Transport`.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Value,
}

impl OutboundRequest {
    /// Renders the request as a curl command, for the request preview page.
    pub fn to_curl(&self) -> String {
        let mut lines = vec![format!(
            "curl --location --request {} '{}'",
            self.method, self.url
        )];
        for (name, value) in self.headers.iter() {
            if let Ok(value) = value.to_str() {
                lines.push(format!("  --header '{}: {}'", name.as_str(), value));
            }
        }
        lines.push(format!("  --data '{}'", self.body));
        lines.join(" \\\n")
    }
}

/// Turns a `FilterState` into the upstream listings request.
///
/// Pagination and ordering always travel in the URL; filters travel in the
/// JSON body and are only present when set.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_endpoint: Option<String>,
    section: Option<String>,
}

impl RequestBuilder {
    pub fn new(base_endpoint: Option<String>, section: Option<String>) -> Self {
        Self {
            base_endpoint,
            section,
        }
    }

    pub fn base_endpoint(&self) -> Option<&str> {
        self.base_endpoint.as_deref()
    }

    pub fn build(&self, state: &FilterState) -> Result<OutboundRequest, ListingError> {
        let base = self
            .base_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .ok_or(ListingError::MissingEndpoint)?;

        let page = state.page.max(1).to_string();
        let url = with_paging(base, &page, state.sort.as_ref());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(OutboundRequest {
            url,
            method: Method::POST,
            headers,
            body: self.body(state),
        })
    }

    fn body(&self, state: &FilterState) -> Value {
        let mut body = Map::new();

        if !state.categories.is_empty() {
            let categories: Vec<&str> = state.categories.iter().map(|c| c.as_ref()).collect();
            body.insert("categories".into(), json!(categories));
        }
        if let Some(min) = state.min_price {
            body.insert("minPrice".into(), json!(min));
        }
        if let Some(max) = state.max_price {
            body.insert("maxPrice".into(), json!(max));
        }
        if !state.bathrooms.is_empty() {
            let bathrooms: Vec<u32> = state.bathrooms.iter().copied().collect();
            body.insert("bathRooms".into(), json!(bathrooms));
        }
        if let Some(section) = self.section.as_deref().filter(|s| !s.is_empty()) {
            body.insert("section".into(), json!(section));
        }

        Value::Object(body)
    }
}

/// Sets `page` and `sort` on the base endpoint, keeping any other parameters
/// the base already carries. Falls back to plain concatenation when the base
/// is not an absolute URL.
fn with_paging(base: &str, page: &str, sort: &str) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, _)| key != PAGE_KEY && key != SORT_KEY)
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect();

            url.query_pairs_mut()
                .clear()
                .extend_pairs(kept)
                .append_pair(PAGE_KEY, page)
                .append_pair(SORT_KEY, sort);

            url.into()
        }
        Err(err) => {
            log::debug!("listing endpoint {base:?} is not an absolute URL ({err}); concatenating");
            append_query_fallback(base, &[(PAGE_KEY, page), (SORT_KEY, sort)])
        }
    }
}

/// Appends `pairs` to `base` as query parameters without parsing it.
///
/// Output is a valid query string whenever `base` has no query of its own.
/// When `base` already contains `?` the pairs are joined with `&`; existing
/// parameters of the same name are not removed.
pub fn append_query_fallback(base: &str, pairs: &[(&str, &str)]) -> String {
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish();

    if encoded.is_empty() {
        return base.to_string();
    }

    let separator = match base.find('?') {
        None => "?",
        Some(_) if base.ends_with('?') || base.ends_with('&') => "",
        Some(_) => "&",
    };

    format!("{base}{separator}{encoded}")
}
