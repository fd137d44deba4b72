//! Route handlers shared by every resource identified by a generated ID.
//!
//! The handlers turn a malformed request body into an `InvalidJson` error
//! before the controller is called.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error,
    controller::Controller,
    resource::Resource,
    storage::Store,
    validation::{ResourceKind, ValidationError},
};

/// Get the JSON payload or an `InvalidJson` error for `resource`.
pub(crate) fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    resource: ResourceKind,
) -> Result<T, Error> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!("rejected {resource} payload: {rejection}");
            Err(ValidationError::InvalidJson(resource).into())
        }
    }
}

/// A route handler for creating a resource, responds with the created resource.
pub async fn create_endpoint<R, S>(
    State(controller): State<Controller<R, S>>,
    payload: Result<Json<R>, JsonRejection>,
) -> Result<(StatusCode, Json<R>), Error>
where
    R: Resource + Serialize + DeserializeOwned,
    S: Store<R>,
{
    let resource = parse_payload(payload, R::KIND)?;
    let created = controller.create(resource)?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// A route handler for getting a single resource.
pub async fn get_endpoint<R, S>(
    State(controller): State<Controller<R, S>>,
    Path(id): Path<String>,
) -> Result<Json<R>, Error>
where
    R: Resource + Serialize,
    S: Store<R>,
{
    controller.get(&id).map(Json)
}

/// A route handler for listing every resource in the order they were created.
pub async fn list_endpoint<R, S>(
    State(controller): State<Controller<R, S>>,
) -> Result<Json<Vec<R>>, Error>
where
    R: Resource + Serialize,
    S: Store<R>,
{
    controller.list().map(Json)
}

/// A route handler for replacing a resource.
///
/// The ID in the path takes precedence over any ID in the body.
pub async fn update_endpoint<R, S>(
    State(controller): State<Controller<R, S>>,
    Path(id): Path<String>,
    payload: Result<Json<R>, JsonRejection>,
) -> Result<(StatusCode, Json<R>), Error>
where
    R: Resource + Serialize + DeserializeOwned,
    S: Store<R>,
{
    let resource = parse_payload(payload, R::KIND)?.with_id(id);
    let updated = controller.update(resource)?;

    Ok((StatusCode::ACCEPTED, Json(updated)))
}

/// A route handler for deleting a resource.
pub async fn delete_endpoint<R, S>(
    State(controller): State<Controller<R, S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error>
where
    R: Resource,
    S: Store<R>,
{
    controller.delete(&id)?;

    Ok(StatusCode::ACCEPTED)
}
