use crate::listing::PropertyRecord;
use maud::{html, Markup};

const PRICE_ON_REQUEST: &str = "Price on request";
const CURRENCY: &str = "RM";

pub fn property_card(record: &PropertyRecord) -> Markup {
    let alt = if record.name.is_empty() {
        "property image"
    } else {
        record.name.as_str()
    };

    html! {
        article class="card property-card" data-id=(record.id) {
            img class="card-media" src=(record.image_url) alt=(alt) height="140" loading="lazy";
            div class="card-body" {
                h2 { (record.name) }
                p class="price" { (format_price(record.price)) }
                p class="location" { (record.location.display().unwrap_or_else(|| "—".to_string())) }
                @if let Some(kind) = &record.property_type {
                    span class="chip" { (kind) }
                }
            }
        }
    }
}

/// Placeholder shown while a page of results is loading.
pub fn skeleton_card() -> Markup {
    html! {
        div class="card property-card skeleton" aria-hidden="true" {
            div class="skeleton-media" style="height: 140px;" {}
            div class="card-body" {
                div class="skeleton-text" style="width: 80%; height: 28px;" {}
                div class="skeleton-text" style="width: 40%; height: 24px;" {}
                div class="skeleton-text" style="width: 60%; height: 24px;" {}
            }
        }
    }
}

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(value) if value.is_finite() && value >= 0.0 => {
            format!("{CURRENCY} {}", group_thousands(value.round() as u64))
        }
        _ => PRICE_ON_REQUEST.to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
