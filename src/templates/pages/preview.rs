use crate::config::ENDPOINT_VAR;
use crate::listing::request::OutboundRequest;
use crate::listing::transport::TransportResponse;
use crate::listing::ListingError;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct PreviewVm<'a> {
    pub endpoint: Option<&'a str>,
    pub request: Result<&'a OutboundRequest, &'a ListingError>,
    /// `None` until "Send test request" was pressed.
    pub response: Option<Result<&'a TransportResponse, &'a ListingError>>,
    pub search_href: String,
    pub preview_href: String,
}

/// Shows what the listings request for the current URL looks like on the
/// wire, or why it cannot be built, and lets it be sent once.
pub fn request_preview_page(vm: &PreviewVm) -> Markup {
    desktop_layout(
        "API request",
        html! {
            main class="container" {
                h1 { "Listings API request" }

                p {
                    "Endpoint: "
                    @match vm.endpoint {
                        Some(endpoint) => code { (endpoint) },
                        None => em { "not configured" },
                    }
                }

                @match vm.request {
                    Ok(request) => {
                        form method="post" action=(vm.preview_href) {
                            button type="submit" { "Send test request" }
                        }
                        div class="card" {
                            strong { "Sample curl" }
                            pre style="white-space: pre-wrap;" { (request.to_curl()) }
                        }
                    }
                    Err(err) => {
                        div class="error-banner" role="alert" {
                            p { strong { "Error: " } (err) }
                        }
                    }
                }

                @match vm.response {
                    Some(Ok(resp)) => {
                        div class="card" {
                            strong { "Response (status " (resp.status) "):" }
                            pre style="white-space: pre-wrap; max-height: 400px; overflow: auto;" {
                                (resp.pretty_body())
                            }
                        }
                    }
                    Some(Err(err)) => {
                        div class="error-banner" role="alert" {
                            strong { "Error:" }
                            pre style="white-space: pre-wrap;" { (err) }
                        }
                    }
                    None => {}
                }

                p { a href=(vm.search_href) { "← Back to results" } }

                p class="microcopy" {
                    "Tip: set " code { (ENDPOINT_VAR) } " in the environment or a .env file to point at the listings API."
                }
            }
        },
    )
}
