// src/tests/router_tests/listings_tests.rs

use crate::config::ListingSettings;
use crate::router::handle;
use crate::tests::utils::{app_with, body_string, get, settings, StubTransport};
use serde_json::{json, Value};

fn sample_page() -> Value {
    json!({
        "data": [
            {
                "id": "1",
                "name": "Sunny Villa",
                "price": 500000,
                "city": "Ipoh",
                "state": "Perak",
                "types": ["Bungalow"],
                "images": [{"url": "https://img.example.com/1.jpg"}]
            },
            {"id": "2", "name": "City Condo"},
            {"name": "no id"}
        ]
    })
}

#[test]
fn fragment_renders_cards_and_pagination() -> Result<(), Box<dyn std::error::Error>> {
    let stub = StubTransport::json(200, sample_page());
    let app = app_with(settings(), stub.clone());

    let resp = handle(get("/listings?page=2&types=residential"), &app)?;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Cache-Control"], "no-store");

    let body = body_string(resp);
    assert!(body.contains("Sunny Villa"));
    assert!(body.contains("RM 500,000"));
    assert!(body.contains("Ipoh, Perak"));
    assert!(body.contains("https://img.example.com/1.jpg"));
    assert!(body.contains("Price on request"));
    assert!(!body.contains("no id"));
    assert!(body.contains("Page 2"));
    assert!(body.contains(r#"href="/?types=residential""#));
    assert!(body.contains(r#"href="/?page=3&amp;types=residential""#));
    assert_eq!(stub.calls(), 1);
    Ok(())
}

#[test]
fn first_page_has_no_previous_link() -> Result<(), Box<dyn std::error::Error>> {
    let app = app_with(settings(), StubTransport::json(200, sample_page()));
    let body = body_string(handle(get("/listings"), &app)?);
    assert!(body.contains(r#"<span class="btn disabled" aria-disabled="true">Previous</span>"#));
    assert!(body.contains(r#"href="/?page=2""#));
    Ok(())
}

#[test]
fn empty_page_is_not_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let app = app_with(settings(), StubTransport::json(200, json!({"results": []})));
    let body = body_string(handle(get("/listings?page=9999"), &app)?);
    assert!(body.contains("No properties found."));
    assert!(!body.contains("Failed to load properties"));
    Ok(())
}

#[test]
fn name_filter_narrows_rendered_cards() -> Result<(), Box<dyn std::error::Error>> {
    let app = app_with(settings(), StubTransport::json(200, sample_page()));
    let body = body_string(handle(get("/listings?name=condo"), &app)?);
    assert!(body.contains("City Condo"));
    assert!(!body.contains("Sunny Villa"));
    Ok(())
}

#[test]
fn missing_endpoint_renders_error_banner() -> Result<(), Box<dyn std::error::Error>> {
    let stub = StubTransport::json(200, sample_page());
    let app = app_with(ListingSettings::default(), stub.clone());

    let resp = handle(get("/listings?page=2"), &app)?;
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Failed to load properties"));
    assert!(body.contains("Try again"));
    assert!(body.contains(r#"hx-get="/listings?page=2""#));
    assert_eq!(stub.calls(), 0);
    Ok(())
}

#[test]
fn upstream_failure_renders_error_banner() -> Result<(), Box<dyn std::error::Error>> {
    let app = app_with(settings(), StubTransport::json(500, sample_page()));
    let body = body_string(handle(get("/listings"), &app)?);
    assert!(body.contains("Failed to load properties"));
    assert!(!body.contains("Sunny Villa"));
    Ok(())
}

#[test]
fn json_view_exposes_records_outcome_and_page() -> Result<(), Box<dyn std::error::Error>> {
    let app = app_with(settings(), StubTransport::json(200, sample_page()));
    let resp = handle(get("/listings.json?page=3"), &app)?;
    assert_eq!(resp.headers()["Content-Type"], "application/json");

    let view: Value = serde_json::from_str(&body_string(resp))?;
    assert_eq!(view["outcome"], "Ok");
    assert_eq!(view["page"], 3);
    assert_eq!(view["dropped"], 1);
    assert_eq!(view["loading"], false);
    assert_eq!(view["records"].as_array().map(Vec::len), Some(2));
    assert_eq!(view["records"][0]["imageUrl"], "https://img.example.com/1.jpg");
    assert_eq!(view["records"][1]["imageUrl"], "/placeholder.png");
    assert_eq!(view["records"][0]["location"]["city"], "Ipoh");
    Ok(())
}

#[test]
fn json_view_reports_network_failure_after_one_retry() -> Result<(), Box<dyn std::error::Error>> {
    let stub = StubTransport::unreachable("timed out");
    let app = app_with(settings(), stub.clone());
    let resp = handle(get("/listings.json"), &app)?;
    let view: Value = serde_json::from_str(&body_string(resp))?;
    assert_eq!(view["outcome"], "NetworkError");
    assert_eq!(view["records"], json!([]));
    // One automatic retry, then the failure is reported.
    assert_eq!(stub.calls(), 2);
    Ok(())
}
