//! The per-request pipeline: decode → forward → receive → transform →
//! respond.
//!
//! Stages run strictly in order; the first failure short-circuits the
//! rest and becomes the response, with the status fixed per stage (see
//! [`PipelineError`]). Nothing is retried.

use crate::error::{PipelineError, Result};
use crate::table::ProxyRoute;
use axum::body::Bytes;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use refract_query::IdSet;
use serde::Deserialize;
use std::sync::Arc;

/// The inbound request body: the entity identifiers to bind into the
/// transform. A missing list decodes as an empty set.
#[derive(Debug, Deserialize)]
pub struct TransformRequest {
    /// Requested entity identifiers.
    #[serde(default, rename = "entityIds")]
    pub entity_ids: Vec<i64>,
}

/// Run one request through the pipeline.
pub async fn handle(
    route: Arc<ProxyRoute>,
    client: reqwest::Client,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    // Decode
    let request: TransformRequest =
        serde_json::from_slice(&body).map_err(|e| PipelineError::Decode(e.to_string()))?;
    let ids: IdSet = request.entity_ids.into();

    // Forward. The inbound method, path and query string are deliberately
    // ignored: the route alone decides where the derived GET goes. The
    // caller dropping the connection drops this future, which aborts the
    // backend call with it.
    let response = client
        .get(route.target().clone())
        .headers(forwarded_headers(&headers))
        .send()
        .await
        .map_err(|e| PipelineError::Forward(e.to_string()))?;

    // Receive
    let payload = response
        .bytes()
        .await
        .map_err(|e| PipelineError::Receive(e.to_string()))?;

    // Transform
    let output = route.program().evaluate(&payload, &ids)?;

    // Respond. Zero bytes is a valid empty body.
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        output,
    )
        .into_response())
}

/// Inbound headers inherited by the forwarded request. Host and the
/// body-describing headers belong to the inbound hop, not the derived
/// bodiless GET.
fn forwarded_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    headers.remove(header::HOST);
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::CONTENT_TYPE);
    headers
}
