// templates/pages/home.rs

use crate::listing::{FilterState, QueryMap};
use crate::templates::{
    components::{filter_form, name_form, skeleton_card, sort_form},
    desktop_layout,
};
use maud::{html, Markup};

const SKELETON_CARDS: usize = 6;

/// The search page. Results are not rendered here: the listings container
/// starts in its loading state and pulls `/listings` with the same query.
pub fn search_page(state: &FilterState, query: &QueryMap) -> Markup {
    let fragment_href = query.to_href("/listings");

    desktop_layout(
        "Property Search",
        html! {
            main class="container" {
                h1 { "Properties" }

                (filter_form(state))

                div class="toolbar" {
                    (sort_form(query, state.sort))
                    (name_form(query, state.name_query.as_deref()))
                }

                div
                    id="listings"
                    class="listings"
                    aria-busy="true"
                    hx-get=(fragment_href)
                    hx-trigger="load"
                    hx-swap="innerHTML"
                    hx-sync="this:replace"
                {
                    div class="grid" {
                        @for _ in 0..SKELETON_CARDS {
                            (skeleton_card())
                        }
                    }
                    noscript {
                        a href=(fragment_href) { "Show results" }
                    }
                }
            }
        },
    )
}
