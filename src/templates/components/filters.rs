use crate::listing::codec::{
    BATHS_KEY, MAX_PRICE_KEY, MIN_PRICE_KEY, NAME_KEY, PAGE_KEY, SORT_KEY, TYPES_KEY,
};
use crate::listing::{Category, FilterState, QueryMap, SortKey};
use maud::{html, Markup};
use strum::IntoEnumIterator;

const BATHROOM_CHOICES: [u32; 5] = [1, 2, 3, 4, 5];

/// Draft copy of the criteria. Nothing changes until "Apply filters"
/// submits it to `/search`, which commits it to the URL.
pub fn filter_form(state: &FilterState) -> Markup {
    html! {
        form class="filters" method="get" action="/search" {
            fieldset {
                legend { "Price" }
                label for=(MIN_PRICE_KEY) { "Min" }
                input type="number" min="0" id=(MIN_PRICE_KEY) name=(MIN_PRICE_KEY)
                    value=[state.min_price];
                label for=(MAX_PRICE_KEY) { "Max" }
                input type="number" min="0" id=(MAX_PRICE_KEY) name=(MAX_PRICE_KEY)
                    value=[state.max_price];
            }

            fieldset {
                legend { "Type" }
                @for category in Category::iter() {
                    label {
                        input type="checkbox" name=(TYPES_KEY) value=(category.as_ref())
                            checked[state.categories.contains(&category)];
                        (category.label())
                    }
                }
            }

            fieldset {
                legend { "Bathrooms" }
                @for baths in BATHROOM_CHOICES {
                    label {
                        input type="checkbox" name=(BATHS_KEY) value=(baths)
                            checked[state.bathrooms.contains(&baths)];
                        (baths)
                    }
                }
            }

            input type="hidden" name=(SORT_KEY) value=(state.sort.as_ref());
            @if let Some(name) = &state.name_query {
                input type="hidden" name=(NAME_KEY) value=(name);
            }

            button type="submit" class="primary" { "Apply filters" }
            a href="/" { "Clear" }
        }
    }
}

pub fn sort_form(current: &QueryMap, sort: SortKey) -> Markup {
    html! {
        form class="sort" method="get" action="/sort" {
            (hidden_inputs(current, &[SORT_KEY, PAGE_KEY]))
            label for="sort-select" { "Sort by" }
            select id="sort-select" name=(SORT_KEY) onchange="this.form.submit()" {
                @for key in SortKey::iter() {
                    option value=(key.as_ref()) selected[key == sort] { (key.label()) }
                }
            }
            noscript { button type="submit" { "Sort" } }
        }
    }
}

/// Narrows the current page by name without fetching again.
pub fn name_form(current: &QueryMap, name_query: Option<&str>) -> Markup {
    html! {
        form class="name-search" method="get" action="/name" {
            (hidden_inputs(current, &[NAME_KEY]))
            label for="name-input" class="sr-only" { "Search by name" }
            input type="search" id="name-input" name=(NAME_KEY) placeholder="Search this page by name"
                value=[name_query];
            button type="submit" { "Search" }
        }
    }
}

pub fn pagination(page: u32, previous: Option<&str>, next: Option<&str>) -> Markup {
    html! {
        nav class="pagination" aria-label="Pagination" {
            @match previous {
                Some(href) => a class="btn" rel="prev" href=(href) { "Previous" },
                None => span class="btn disabled" aria-disabled="true" { "Previous" },
            }
            span class="page-number" { "Page " (page) }
            @match next {
                Some(href) => a class="btn" rel="next" href=(href) { "Next" },
                None => span class="btn disabled" aria-disabled="true" { "Next" },
            }
        }
    }
}

fn hidden_inputs(current: &QueryMap, skip: &[&str]) -> Markup {
    html! {
        @for (key, value) in current.iter().filter(|(key, _)| !skip.contains(key)) {
            input type="hidden" name=(key) value=(value);
        }
    }
}
