//! The response for a newly created resource.

use axum::{
    Json,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{database_id::DatabaseId, endpoints::format_endpoint};

/// A 201 response with the created `body` and a `Location` header pointing at
/// `endpoint` with its parameter replaced by `id`.
pub fn resource_created<T: Serialize>(endpoint: &str, id: DatabaseId, body: T) -> Response {
    let location = format_endpoint(endpoint, id);
    tracing::debug!("created resource at {location}");

    (StatusCode::CREATED, [(LOCATION, location)], Json(body)).into_response()
}
