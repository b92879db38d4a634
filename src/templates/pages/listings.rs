use crate::listing::PropertyRecord;
use crate::templates::components::{error_banner, pagination, property_card, RetryLink};
use maud::{html, Markup};

pub struct ListingsVm<'a> {
    pub records: Vec<&'a PropertyRecord>,
    pub page: u32,
    pub failed: bool,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    /// Full page URL of the current navigation.
    pub page_href: String,
    /// Fragment URL of the current navigation, for htmx retries.
    pub fragment_href: String,
}

/// Body of the `#listings` container: cards, an empty page, or the error
/// banner. Never a blend of the previous page and the new one.
pub fn listings_fragment(vm: &ListingsVm) -> Markup {
    html! {
        @if vm.failed {
            (error_banner(None, Some(RetryLink {
                page_href: &vm.page_href,
                fragment_href: &vm.fragment_href,
            })))
        } @else {
            @if vm.records.is_empty() {
                p class="empty" { "No properties found." }
            } @else {
                div class="grid" {
                    @for record in &vm.records {
                        (property_card(record))
                    }
                }
            }

            (pagination(vm.page, vm.previous_href.as_deref(), vm.next_href.as_deref()))
        }
    }
}
