use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use kassa_server::routes::{theater_routes, utility_routes};
use kassa_server::store::{self, CounterStore, ReservationStore};

async fn utility_app() -> Router {
    let pool = store::connect("sqlite::memory:").await.unwrap();
    let store = CounterStore::new(pool);
    store.init().await.unwrap();
    utility_routes(store)
}

async fn theater_app() -> Router {
    let pool = store::connect("sqlite::memory:").await.unwrap();
    let store = ReservationStore::new(pool);
    store.init().await.unwrap();
    theater_routes(store)
}

async fn send(app: &Router, method: &str, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_route_says_hello() {
    let app = utility_app().await;
    let response = send(&app, "GET", "/test").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body_text(response).await, "Hello World!");
}

#[tokio::test]
async fn counters_listing_matches_seed() {
    let app = utility_app().await;
    let response = send(&app, "GET", "/counters").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let counters = body["counters"].as_array().unwrap();
    assert_eq!(counters.len(), 2);
    assert_eq!(counters[0]["id"], 1);
    assert_eq!(counters[0]["name"], "name");
    assert_eq!(counters[0]["number"], 12345);
    assert_eq!(counters[1]["id"], 2);
    assert_eq!(counters[1]["name"], "asdf");
    assert_eq!(counters[1]["number"], 623475);
}

#[tokio::test]
async fn payments_listing_matches_seed() {
    let app = utility_app().await;
    let body = body_json(send(&app, "GET", "/counters/12").await).await;

    let payments = body["payments"].as_array().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["idCounter"], 12);
    assert_eq!(payments[0]["counterReading"], 15);
    assert!(payments[0]["lastUpdate"].is_string());
}

#[tokio::test]
async fn non_numeric_path_parameter_is_a_bad_request() {
    let app = utility_app().await;
    let response = send(&app, "GET", "/counters/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_payment_returns_the_new_id() {
    let app = utility_app().await;
    let response = send(&app, "POST", "/counters/1/500").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 2);
}

#[tokio::test]
async fn update_payment_reports_policy_rejection() {
    let app = utility_app().await;
    let response = send(&app, "PUT", "/counters/12/99").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("not updated"));
}

#[tokio::test]
async fn delete_missing_counter_is_not_found() {
    let app = utility_app().await;
    let response = send(&app, "DELETE", "/counters/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn performances_listing_matches_seed() {
    let app = theater_app().await;
    let body = body_json(send(&app, "GET", "/performances").await).await;

    let performances = body["performances"].as_array().unwrap();
    assert_eq!(performances.len(), 1);
    assert_eq!(performances[0]["name"], "Ololoev Ololo");
    assert_eq!(performances[0]["places"], 100);
}

#[tokio::test]
async fn place_price_is_plain_text() {
    let app = theater_app().await;
    let response = send(&app, "GET", "/place/1/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "100");
}

#[tokio::test]
async fn missing_place_price_is_not_found() {
    let app = theater_app().await;
    let response = send(&app, "GET", "/place/1/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn reserving_a_taken_seat_still_answers_ok() {
    let app = theater_app().await;

    // The seeded seat starts out reserved, so this must no-op.
    let response = send(&app, "POST", "/performance/1/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert!(body["message"].as_str().unwrap().contains("not reserved"));
}

#[tokio::test]
async fn cancel_then_reserve_round_trips() {
    let app = theater_app().await;

    let body = body_json(send(&app, "DELETE", "/performance/1/1").await).await;
    assert_eq!(body["message"], "Reservation cancelled");

    let body = body_json(send(&app, "POST", "/performance/1/1").await).await;
    assert_eq!(body["message"], "Place reserved");
}

#[tokio::test]
async fn swap_reports_both_halves() {
    let app = theater_app().await;

    // Only seat 1 exists; the target half must report no change.
    let body = body_json(send(&app, "PUT", "/performance/1/2").await).await;
    assert_eq!(body["success"], true);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("old place released"));
    assert!(message.contains("new place unchanged"));
}
