use maud::{html, Markup};

const DEFAULT_MESSAGE: &str = "Something went wrong. Please try again.";

/// Where "Try again" points: the full page URL and the fragment htmx reloads.
pub struct RetryLink<'a> {
    pub page_href: &'a str,
    pub fragment_href: &'a str,
}

/// The single "failed to load" banner shared by every listing failure.
pub fn error_banner(message: Option<&str>, retry: Option<RetryLink<'_>>) -> Markup {
    html! {
        div class="error-banner" role="alert" {
            h3 { "Failed to load properties" }
            p { (message.unwrap_or(DEFAULT_MESSAGE)) }
            @if let Some(retry) = retry {
                a class="btn primary"
                    href=(retry.page_href)
                    hx-get=(retry.fragment_href)
                    hx-target="#listings"
                    hx-swap="innerHTML"
                {
                    "Try again"
                }
            }
        }
    }
}
