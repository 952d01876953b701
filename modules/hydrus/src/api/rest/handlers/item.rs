//! `/{api}/{type}/{id}`: operations on one instance of a collection's class.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::Path;
use axum::extract::rejection::BytesRejection;
use axum::response::Response;
use http::{Method as HttpMethod, StatusCode};

use super::{check_discriminator, hydrafy, parse_object};
use crate::api::rest::context::RequestContext;
use crate::api::rest::error::DispatchError;
use crate::api::rest::shaper::Reply;
use crate::doc::Method;
use crate::domain::resolver::{expected_type_for, resolve_class_operation};

pub async fn item(
    method: HttpMethod,
    Path((type_token, id)): Path<(String, String)>,
    mut ctx: RequestContext,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let shaper = ctx.shaper.clone();
    let result = match Method::from_http(&method) {
        Some(method) => dispatch(&mut ctx, method, &type_token, &id, body).await,
        None => Err(DispatchError::method_not_allowed(
            method.as_str(),
            type_token.as_str(),
        )),
    };
    if let Err(err) = &result {
        tracing::debug!(%method, %type_token, %id, error = %err, "item request failed");
    }
    shaper.respond(result)
}

async fn dispatch(
    ctx: &mut RequestContext,
    method: Method,
    type_token: &str,
    raw_id: &str,
    body: Result<Bytes, BytesRejection>,
) -> Result<Reply, DispatchError> {
    let doc = Arc::clone(&ctx.doc);
    let class = doc
        .wrapped_class(type_token)
        .ok_or_else(|| DispatchError::RouteNotFound(type_token.to_owned()))?
        .title
        .clone();
    let id: u64 = raw_id
        .parse()
        .map_err(|_| DispatchError::RouteNotFound(format!("{type_token}/{raw_id}")))?;

    if !resolve_class_operation(&doc, &class, method) {
        return Err(DispatchError::method_not_allowed(method.as_str(), type_token));
    }

    match method {
        Method::Get => {
            let object = ctx.session.get(id, &class).await?;
            let item_id = format!("/{}/{type_token}/{id}", doc.api_name());
            Ok(Reply::ok(hydrafy(&doc, object, item_id, &class)))
        }
        Method::Post => {
            let object = parse_object(body)?;
            let expected = expected_type_for(&doc, &class, Method::Post);
            let object_type = check_discriminator(&object, expected.as_deref())?.to_owned();
            let id = ctx.session.update(&object, id, &object_type).await?;
            tracing::info!(type_token, id, "object updated");
            Ok(Reply::message(
                StatusCode::OK,
                format!("Object with ID {id} successfully updated"),
            )
            .with_location(ctx.shaper.location(type_token, Some(id))))
        }
        Method::Put => {
            let object = parse_object(body)?;
            let expected = expected_type_for(&doc, &class, Method::Put);
            check_discriminator(&object, expected.as_deref())?;
            let id = ctx.session.insert(&object, Some(id)).await?;
            tracing::info!(type_token, id, "object added");
            Ok(Reply::message(
                StatusCode::CREATED,
                format!("Object with ID {id} successfully added"),
            )
            .with_location(ctx.shaper.location(type_token, Some(id))))
        }
        Method::Delete => {
            ctx.session.delete(id, &class).await?;
            tracing::info!(type_token, id, "object deleted");
            Ok(Reply::message(
                StatusCode::OK,
                format!("Object with ID {id} successfully deleted"),
            ))
        }
    }
}
