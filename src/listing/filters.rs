// src/listing/filters.rs

use std::collections::BTreeSet;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Sort orders the listings API understands. The string form is exactly what
/// goes on the wire and in the browser URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, AsRefStr, Display, EnumIter)]
pub enum SortKey {
    #[default]
    #[strum(serialize = "-createdAt")]
    NewestFirst,
    #[strum(serialize = "createdAt")]
    OldestFirst,
    #[strum(serialize = "price")]
    PriceLowToHigh,
    #[strum(serialize = "-price")]
    PriceHighToLow,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::NewestFirst => "Newest first",
            SortKey::OldestFirst => "Oldest first",
            SortKey::PriceLowToHigh => "Price: low to high",
            SortKey::PriceHighToLow => "Price: high to low",
        }
    }
}

/// Closed vocabulary of property categories. Anything else coming from a URL
/// is dropped on decode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumString, AsRefStr, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Residential,
    Commercial,
    Agricultural,
    Industrial,
    Others,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Residential => "Residential",
            Category::Commercial => "Commercial",
            Category::Agricultural => "Agricultural",
            Category::Industrial => "Industrial",
            Category::Others => "Others",
        }
    }
}

/// The current search criteria, sort and page.
///
/// Built fresh from the URL on every navigation and never edited in place:
/// every user edit produces a new value that is encoded back into the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub page: u32,
    pub sort: SortKey,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub categories: BTreeSet<Category>,
    pub bathrooms: BTreeSet<u32>,
    pub name_query: Option<String>,
}

impl FilterState {
    /// Empty criteria on page 1 with the given default sort.
    pub fn new(default_sort: SortKey) -> Self {
        Self {
            page: 1,
            sort: default_sort,
            min_price: None,
            max_price: None,
            categories: BTreeSet::new(),
            bathrooms: BTreeSet::new(),
            name_query: None,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_name_query(mut self, query: &str) -> Self {
        self.name_query = normalize_name_query(query);
        self
    }

    /// True when both bounds are set and `min > max`. Not rejected; the
    /// upstream decides what that means.
    pub fn price_range_inverted(&self) -> bool {
        matches!((self.min_price, self.max_price), (Some(min), Some(max)) if min > max)
    }

    /// Case-insensitive substring match of `name` against the name query.
    /// Always true when no query is set.
    pub fn matches_name(&self, name: &str) -> bool {
        match &self.name_query {
            Some(query) => name.to_lowercase().contains(&query.to_lowercase()),
            None => true,
        }
    }
}

pub fn normalize_name_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses a price typed by a user or found in a URL.
///
/// Non-numeric, negative and non-finite input is rejected by returning `None`,
/// never by failing. Fractional values are truncated.
pub fn parse_price(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(value) = raw.parse::<u64>() {
        return Some(value);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value <= u64::MAX as f64 => {
            Some(value.trunc() as u64)
        }
        _ => None,
    }
}
