#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, header};
use hydrus::{HydrusConfig, UserConfig};
use hydrus_auth::BasicCredentials;
use serde_json::Value;
use tower::ServiceExt as _;

pub const API: &str = "demoapi";
pub const BASE: &str = "http://localhost:8080/";

pub fn config(authentication: bool) -> HydrusConfig {
    HydrusConfig {
        api_name: API.to_owned(),
        base_url: BASE.to_owned(),
        authentication,
        doc_path: None,
        users: vec![UserConfig {
            id: 1,
            password: "test".to_owned(),
        }],
    }
}

pub fn app(authentication: bool) -> Router {
    hydrus::router(config(authentication).build_state().unwrap())
}

pub fn request(method: &str, path: &str, body: Option<&Value>) -> Request<Body> {
    with_auth(method, path, body, None)
}

pub fn with_auth(
    method: &str,
    path: &str,
    body: Option<&Value>,
    credentials: Option<(u64, &str)>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some((id, password)) = credentials {
        builder = builder.header(
            header::AUTHORIZATION,
            BasicCredentials::new(id, password).to_header_value(),
        );
    }
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/ld+json");
            Body::from(serde_json::to_vec(value).unwrap())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn assert_vocab_link(response: &Response<Body>) {
    let link = response
        .headers()
        .get(header::LINK)
        .expect("Link header")
        .to_str()
        .unwrap();
    assert!(link.contains("/demoapi/vocab"), "unexpected Link: {link}");
    assert!(link.contains("http://www.w3.org/ns/hydra/core#apiDocumentation"));
}
