mod common;

use axum::http::{StatusCode, header};
use common::{app, assert_vocab_link, json, request, send, with_auth};
use serde_json::json;

const CHALLENGE: &str = "Basic realm=\"Login Required\"";

#[tokio::test]
async fn missing_credentials_are_challenged() {
    let app = app(true);
    for path in ["/demoapi/DroneCollection", "/demoapi/DroneCollection/1"] {
        let response = send(&app, request("GET", path, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], CHALLENGE);
        assert_vocab_link(&response);
    }
}

#[tokio::test]
async fn wrong_password_is_401() {
    let response = send(
        &app(true),
        with_auth("GET", "/demoapi/DroneCollection", None, Some((1, "test2"))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], CHALLENGE);
}

#[tokio::test]
async fn unknown_user_is_rejected() {
    let response = send(
        &app(true),
        with_auth("GET", "/demoapi/DroneCollection", None, Some((2, "test"))),
    )
    .await;
    assert!(matches!(
        response.status(),
        StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST
    ));
    assert_vocab_link(&response);
    assert_eq!(
        json(response).await["message"],
        "User with ID 2 is not a valid user"
    );
}

#[tokio::test]
async fn malformed_header_is_401() {
    let request = axum::http::Request::builder()
        .uri("/demoapi/DroneCollection")
        .header(header::AUTHORIZATION, "Basic !!!not-base64")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = send(&app(true), request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_credentials_pass() {
    let app = app(true);
    let drone = json!({
        "@type": "Drone",
        "name": "alpha",
        "model": "Drone 1",
        "MaxSpeed": "20",
        "DroneState": {},
    });

    let response = send(
        &app,
        with_auth("PUT", "/demoapi/DroneCollection", Some(&drone), Some((1, "test"))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        &app,
        with_auth("GET", "/demoapi/DroneCollection/1", None, Some((1, "test"))),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key(header::WWW_AUTHENTICATE));
}

#[tokio::test]
async fn documentation_routes_are_not_gated() {
    let app = app(true);
    for path in [
        "/demoapi",
        "/demoapi/vocab",
        "/demoapi/contexts/EntryPoint.jsonld",
        "/demoapi/contexts/Drone.jsonld",
    ] {
        let response = send(&app, request("GET", path, None)).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn authentication_runs_before_resolution() {
    // Unknown type and unsupported method still answer 401 first
    let app = app(true);
    let response = send(&app, request("GET", "/demoapi/Ghost", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let response = send(&app, request("PUT", "/demoapi/MessageCollection", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
