//! `/{api}/{type}`: collection listing and creation, singleton class operations.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::rejection::BytesRejection;
use axum::response::Response;
use http::{Method as HttpMethod, StatusCode};
use serde_json::{Value, json};

use super::{check_discriminator, denied, hydrafy, parse_object};
use crate::api::rest::context::RequestContext;
use crate::api::rest::error::DispatchError;
use crate::api::rest::shaper::Reply;
use crate::doc::{ApiDocument, Method};
use crate::domain::resolver::{expected_type_for, resolve_collection_endpoint};

pub async fn collection(
    method: HttpMethod,
    Path(type_token): Path<String>,
    mut ctx: RequestContext,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let shaper = ctx.shaper.clone();
    let result = match Method::from_http(&method) {
        Some(method) => dispatch(&mut ctx, method, &type_token, body).await,
        None => Err(DispatchError::method_not_allowed(
            method.as_str(),
            type_token.as_str(),
        )),
    };
    shaper.respond(result)
}

async fn dispatch(
    ctx: &mut RequestContext,
    method: Method,
    type_token: &str,
    body: Result<Bytes, BytesRejection>,
) -> Result<Reply, DispatchError> {
    let doc = Arc::clone(&ctx.doc);
    let resolution = resolve_collection_endpoint(&doc, method, type_token);
    if !resolution.supported {
        return Err(denied(resolution, method, type_token));
    }

    match method {
        Method::Get => get(ctx, &doc, type_token).await,
        Method::Put => put(ctx, &doc, type_token, body).await,
        Method::Post => post(ctx, &doc, type_token, body).await,
        Method::Delete => delete(ctx, &doc, type_token).await,
    }
}

async fn get(
    ctx: &mut RequestContext,
    doc: &ApiDocument,
    type_token: &str,
) -> Result<Reply, DispatchError> {
    let api = doc.api_name();
    if let Some(class) = doc.wrapped_class(type_token) {
        let members: Vec<Value> = ctx
            .session
            .get_collection(&class.title)
            .await?
            .into_iter()
            .map(|m| {
                let id = format!("/{api}/{type_token}/{}", m.id);
                json!({ "@id": id, "@type": m.type_name })
            })
            .collect();
        return Ok(Reply::ok(json!({
            "@context": format!("/{api}/contexts/{type_token}.jsonld"),
            "@id": format!("/{api}/{type_token}/"),
            "@type": type_token,
            "members": members,
        })));
    }

    if doc.is_singleton_class(type_token) {
        let (_, object) = ctx.session.get_single(type_token).await?;
        let object_id = format!("/{api}/{type_token}/");
        return Ok(Reply::ok(hydrafy(doc, object, object_id, type_token)));
    }

    Err(DispatchError::RouteNotFound(type_token.to_owned()))
}

async fn put(
    ctx: &mut RequestContext,
    doc: &ApiDocument,
    type_token: &str,
    body: Result<Bytes, BytesRejection>,
) -> Result<Reply, DispatchError> {
    if let Some(class) = doc.wrapped_class(type_token) {
        let object = parse_object(body)?;
        check_discriminator(&object, Some(&class.title))?;
        let id = ctx.session.insert(&object, None).await?;
        tracing::info!(type_token, id, "object added to collection");
        return Ok(Reply::message(
            StatusCode::CREATED,
            format!("Object with ID {id} successfully added"),
        )
        .with_location(ctx.shaper.location(type_token, Some(id))));
    }

    if doc.is_singleton_class(type_token) {
        let object = parse_object(body)?;
        let expected = expected_type_for(doc, type_token, Method::Put);
        check_discriminator(&object, expected.as_deref())?;
        ctx.session.insert(&object, None).await?;
        tracing::info!(type_token, "singleton added");
        return Ok(
            Reply::message(StatusCode::CREATED, "Object successfully added")
                .with_location(ctx.shaper.location(type_token, None)),
        );
    }

    Err(DispatchError::RouteNotFound(type_token.to_owned()))
}

async fn post(
    ctx: &mut RequestContext,
    doc: &ApiDocument,
    type_token: &str,
    body: Result<Bytes, BytesRejection>,
) -> Result<Reply, DispatchError> {
    if !doc.is_singleton_class(type_token) {
        return Err(DispatchError::method_not_allowed(Method::Post.as_str(), type_token));
    }
    let object = parse_object(body)?;
    let expected = expected_type_for(doc, type_token, Method::Post);
    check_discriminator(&object, expected.as_deref())?;
    ctx.session.update_single(&object, type_token).await?;
    tracing::info!(type_token, "singleton updated");
    Ok(
        Reply::message(StatusCode::OK, "Object successfully updated")
            .with_location(ctx.shaper.location(type_token, None)),
    )
}

async fn delete(
    ctx: &mut RequestContext,
    doc: &ApiDocument,
    type_token: &str,
) -> Result<Reply, DispatchError> {
    if !doc.is_singleton_class(type_token) {
        return Err(DispatchError::method_not_allowed(Method::Delete.as_str(), type_token));
    }
    ctx.session.delete_single(type_token).await?;
    tracing::info!(type_token, "singleton deleted");
    Ok(Reply::message(StatusCode::OK, "Object successfully deleted"))
}
