//! Drives the proxy router in-process with `tower::ServiceExt::oneshot`,
//! backed by a `wiremock` places service.

mod common;

use std::sync::Arc;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use studio_location::controller::{router_endpoints, AppState};
use studio_location::repositories::google_places::GooglePlacesRepo;
use studio_location::widget::{AUTOCOMPLETE_ERROR_MESSAGE, PLACE_DETAIL_ERROR_MESSAGE};
use common::{place_detail_json, springfield_components, suggestion_json, API_KEY};

fn app(server: &MockServer) -> Router {
    let places = GooglePlacesRepo::new(&server.uri(), API_KEY, 5).expect("failed to build places repo");
    router_endpoints(AppState {
        places: Arc::new(places),
    })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    hyper::body::to_bytes(response.into_body()).await.unwrap().to_vec()
}

#[tokio::test]
async fn health_check_is_ok() {
    let server = MockServer::start().await;
    let response = app(&server)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_a_teapot() {
    let server = MockServer::start().await;
    let response = app(&server)
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
}

#[tokio::test]
async fn autocomplete_proxies_suggestions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/places:autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "suggestions": [suggestion_json("ChIJ1", "123 Main St", Some("Springfield"))]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json("/places/autocomplete", json!({ "input": "123 Main" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["suggestions"][0]["placePrediction"]["placeId"], json!("ChIJ1"));
}

#[tokio::test]
async fn empty_input_never_reaches_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/places:autocomplete"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json("/places/autocomplete", json!({ "input": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body, json!({ "suggestions": [] }));
}

#[tokio::test]
async fn autocomplete_failure_returns_fixed_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/places:autocomplete"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json("/places/autocomplete", json!({ "input": "123" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_bytes(response).await, AUTOCOMPLETE_ERROR_MESSAGE.as_bytes());
}

#[tokio::test]
async fn resolve_returns_normalized_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/places/ChIJ1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(place_detail_json("ChIJ1", springfield_components())),
        )
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/places/resolve",
            suggestion_json("ChIJ1", "123 Main St", Some("Springfield")),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let location: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(location["googleId"], json!("ChIJ1"));
    assert_eq!(location["postalCode"], json!(62704));
    assert_eq!(location["locality"], json!("Springfield"));
    assert_eq!(location["administrativeAreaLevel1"]["shortText"], json!("IL"));
    assert_eq!(location["text"], json!({ "mainText": "123 Main St", "secondaryText": "Springfield" }));
    let object = location.as_object().unwrap();
    assert!(!object.contains_key("country"));
    assert!(!object.contains_key("postalCodeSuffix"));
}

#[tokio::test]
async fn resolve_failure_returns_fixed_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/places/ChIJ1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": 400, "message": "Not a valid Place ID" }
        })))
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/places/resolve",
            suggestion_json("ChIJ1", "123 Main St", None),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_bytes(response).await, PLACE_DETAIL_ERROR_MESSAGE.as_bytes());
}

#[tokio::test]
async fn resolve_rejects_traversal_place_id() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/places/resolve",
            suggestion_json("../secret", "123 Main St", None),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_bytes(response).await, PLACE_DETAIL_ERROR_MESSAGE.as_bytes());
}
