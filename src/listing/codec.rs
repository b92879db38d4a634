// src/listing/codec.rs

use crate::listing::filters::{normalize_name_query, parse_price, Category, FilterState, SortKey};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use url::form_urlencoded;

pub const PAGE_KEY: &str = "page";
pub const SORT_KEY: &str = "sort";
pub const MIN_PRICE_KEY: &str = "minPrice";
pub const MAX_PRICE_KEY: &str = "maxPrice";
pub const TYPES_KEY: &str = "types";
pub const BATHS_KEY: &str = "baths";
pub const NAME_KEY: &str = "name";

/// A full snapshot of the browser query string.
///
/// Keys are kept sorted so the serialized form is stable for sharing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap(BTreeMap<String, String>);

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string (without the leading `?`).
    ///
    /// Repeated keys, as sent by checkbox groups, are comma-joined so that
    /// `types=a&types=b` decodes the same as `types=a,b`.
    pub fn parse(query: &str) -> Self {
        let mut map: BTreeMap<String, String> = BTreeMap::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            map.entry(key.into_owned())
                .and_modify(|existing| {
                    existing.push(',');
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.into_owned());
        }
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }

    /// Path plus query, omitting the `?` when there is nothing to encode.
    pub fn to_href(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.to_query_string())
        }
    }
}

/// Maps `FilterState` to and from the URL query.
///
/// Both directions are pure. Values equal to their field default are left out
/// of the encoded form.
#[derive(Debug, Clone, Copy)]
pub struct UrlCodec {
    default_sort: SortKey,
}

impl UrlCodec {
    pub fn new(default_sort: SortKey) -> Self {
        Self { default_sort }
    }

    pub fn encode(&self, state: &FilterState) -> QueryMap {
        let mut query = QueryMap::new();

        if state.page > 1 {
            query.insert(PAGE_KEY, state.page.to_string());
        }
        if state.sort != self.default_sort {
            query.insert(SORT_KEY, state.sort.as_ref());
        }
        if let Some(min) = state.min_price {
            query.insert(MIN_PRICE_KEY, min.to_string());
        }
        if let Some(max) = state.max_price {
            query.insert(MAX_PRICE_KEY, max.to_string());
        }
        if !state.categories.is_empty() {
            let tokens: Vec<&str> = state.categories.iter().map(|c| c.as_ref()).collect();
            query.insert(TYPES_KEY, tokens.join(","));
        }
        if !state.bathrooms.is_empty() {
            let tokens: Vec<String> = state.bathrooms.iter().map(u32::to_string).collect();
            query.insert(BATHS_KEY, tokens.join(","));
        }
        if let Some(name) = state.name_query.as_deref().and_then(normalize_name_query) {
            query.insert(NAME_KEY, name);
        }

        query
    }

    pub fn decode(&self, query: &QueryMap) -> FilterState {
        let page = query
            .get(PAGE_KEY)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .and_then(|page| u32::try_from(page).ok())
            .unwrap_or(1);

        let sort = query
            .get(SORT_KEY)
            .and_then(|raw| SortKey::from_str(raw.trim()).ok())
            .unwrap_or(self.default_sort);

        let categories: BTreeSet<Category> = split_tokens(query.get(TYPES_KEY))
            .filter_map(|token| Category::from_str(&token.to_lowercase()).ok())
            .collect();

        let bathrooms: BTreeSet<u32> = split_tokens(query.get(BATHS_KEY))
            .filter_map(|token| token.parse::<u32>().ok())
            .collect();

        let state = FilterState {
            page,
            sort,
            min_price: query.get(MIN_PRICE_KEY).and_then(parse_price),
            max_price: query.get(MAX_PRICE_KEY).and_then(parse_price),
            categories,
            bathrooms,
            name_query: query.get(NAME_KEY).and_then(normalize_name_query),
        };

        if state.price_range_inverted() {
            log::debug!(
                "minPrice {:?} exceeds maxPrice {:?}; passing through",
                state.min_price,
                state.max_price
            );
        }

        state
    }
}

fn split_tokens(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
