// src/tests/router_tests/navigation_tests.rs

use crate::config::ListingSettings;
use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{
    app_with, body_string, get, location, request, settings, StubTransport, TEST_ENDPOINT,
};
use http::Method;
use serde_json::json;

fn app() -> crate::router::App {
    app_with(settings(), StubTransport::json(200, json!([])))
}

#[test]
fn search_page_starts_in_loading_state() -> Result<(), Box<dyn std::error::Error>> {
    let resp = handle(get("/?types=residential&page=2"), &app())?;
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains(r#"hx-get="/listings?page=2&amp;types=residential""#));
    assert!(body.contains("skeleton"));
    assert!(body.contains("Apply filters"));
    assert!(body.contains(r#"value="residential" checked"#));
    Ok(())
}

#[test]
fn search_page_redirects_to_canonical_url() -> Result<(), Box<dyn std::error::Error>> {
    let resp = handle(get("/?page=0&sort=-createdAt&types=castle,Residential"), &app())?;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/?types=residential");
    Ok(())
}

#[test]
fn apply_filters_resets_page_and_redirects() -> Result<(), Box<dyn std::error::Error>> {
    let resp = handle(
        get("/search?page=4&minPrice=100&maxPrice=abc&types=residential&types=commercial&sort=price"),
        &app(),
    )?;
    assert_eq!(resp.status(), 303);
    assert_eq!(
        location(&resp),
        "/?minPrice=100&sort=price&types=residential%2Ccommercial"
    );
    Ok(())
}

#[test]
fn empty_filter_form_goes_back_to_root() -> Result<(), Box<dyn std::error::Error>> {
    let resp = handle(get("/search?minPrice=&maxPrice=&sort=-createdAt"), &app())?;
    assert_eq!(location(&resp), "/");
    Ok(())
}

#[test]
fn change_sort_resets_page() -> Result<(), Box<dyn std::error::Error>> {
    let resp = handle(get("/sort?page=3&types=residential&sort=-price"), &app())?;
    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/?sort=-price&types=residential");
    Ok(())
}

#[test]
fn name_search_keeps_page() -> Result<(), Box<dyn std::error::Error>> {
    let resp = handle(get("/name?page=3&name=+Villa+"), &app())?;
    assert_eq!(location(&resp), "/?name=Villa&page=3");
    Ok(())
}

#[test]
fn request_preview_shows_curl() -> Result<(), Box<dyn std::error::Error>> {
    let resp = handle(get("/request-preview?page=2&types=industrial"), &app())?;
    let body = body_string(resp);
    assert!(body.contains("curl --location --request POST"));
    assert!(body.contains("page=2&amp;sort=-createdAt"));
    assert!(body.contains("industrial"));
    Ok(())
}

#[test]
fn request_preview_explains_missing_endpoint() -> Result<(), Box<dyn std::error::Error>> {
    let app = app_with(ListingSettings::default(), StubTransport::json(200, json!([])));
    let body = body_string(handle(get("/request-preview"), &app)?);
    assert!(body.contains("not configured"));
    assert!(body.contains("listing endpoint is not configured"));
    Ok(())
}

#[test]
fn request_preview_does_not_send_until_asked() -> Result<(), Box<dyn std::error::Error>> {
    let stub = StubTransport::json(200, json!([]));
    let app = app_with(settings(), stub.clone());

    let body = body_string(handle(get("/request-preview?page=2"), &app)?);
    assert!(body.contains(r#"action="/request-preview?page=2""#));
    assert!(body.contains("Send test request"));
    assert!(!body.contains("Response (status"));
    assert_eq!(stub.calls(), 0);
    Ok(())
}

#[test]
fn test_request_shows_pretty_json_response() -> Result<(), Box<dyn std::error::Error>> {
    let stub = StubTransport::json(200, json!([{"id": "1"}]));
    let app = app_with(settings(), stub.clone());

    let resp = handle(request(Method::POST, "/request-preview?page=2&sort=-price"), &app)?;
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Response (status 200):"));
    assert!(body.contains("    &quot;id&quot;: &quot;1&quot;"));
    assert_eq!(
        stub.urls(),
        vec![format!("{TEST_ENDPOINT}?page=2&sort=-price")]
    );
    Ok(())
}

#[test]
fn test_request_shows_non_success_status_and_body() -> Result<(), Box<dyn std::error::Error>> {
    let stub = StubTransport::json(502, json!({"message": "bad gateway"}));
    let app = app_with(settings(), stub.clone());

    let body = body_string(handle(request(Method::POST, "/request-preview"), &app)?);
    assert!(body.contains("Response (status 502):"));
    assert!(body.contains("&quot;message&quot;: &quot;bad gateway&quot;"));
    assert_eq!(stub.calls(), 1);
    Ok(())
}

#[test]
fn test_request_reports_network_error_without_retrying() -> Result<(), Box<dyn std::error::Error>> {
    let stub = StubTransport::unreachable("connection refused");
    let app = app_with(settings(), stub.clone());

    let body = body_string(handle(request(Method::POST, "/request-preview"), &app)?);
    assert!(body.contains("network error: connection refused"));
    assert!(!body.contains("Response (status"));
    assert_eq!(stub.calls(), 1);
    Ok(())
}

#[test]
fn test_request_without_endpoint_is_never_sent() -> Result<(), Box<dyn std::error::Error>> {
    let stub = StubTransport::json(200, json!([]));
    let app = app_with(ListingSettings::default(), stub.clone());

    let body = body_string(handle(request(Method::POST, "/request-preview"), &app)?);
    assert!(body.contains("listing endpoint is not configured"));
    assert_eq!(stub.calls(), 0);
    Ok(())
}

#[test]
fn unknown_route_is_not_found() {
    let Err(err) = handle(get("/admin"), &app()) else {
        panic!("expected /admin to be rejected");
    };
    assert!(matches!(err, ServerError::NotFound));

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Error 404"));
}

#[test]
fn wrong_method_is_bad_request() {
    let Err(err) = handle(request(Method::POST, "/search"), &app()) else {
        panic!("expected POST /search to be rejected");
    };
    assert_eq!(err.status(), 400);

    let Err(err) = handle(request(Method::DELETE, "/request-preview"), &app()) else {
        panic!("expected DELETE /request-preview to be rejected");
    };
    assert_eq!(err.status(), 400);
}
