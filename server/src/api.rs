//! HTTP handlers for the `/client` resource.
//!
//! Read, update and delete all go through `ClientService::require` before
//! touching the record, so an unknown id is a 404 even where the store-level
//! operation would have been a silent no-op.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::error::ClientResult;
use crate::model::{Client, ClientId, ClientInput, ClientPatch};
use crate::service::ClientService;

pub fn routes(service: ClientService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/client", get(list_clients).post(create_client))
        .route(
            "/client/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .with_state(service)
}

/// Runs a service call on the blocking pool; every store backend is sync.
async fn blocking<T, F>(service: ClientService, f: F) -> ClientResult<T>
where
    F: FnOnce(&ClientService) -> ClientResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&service)).await?
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_clients(State(service): State<ClientService>) -> ClientResult<Json<Vec<Client>>> {
    let clients = blocking(service, |svc| svc.list_all()).await?;
    Ok(Json(clients))
}

async fn create_client(
    State(service): State<ClientService>,
    Json(input): Json<ClientInput>,
) -> ClientResult<(StatusCode, Json<Client>)> {
    let client = blocking(service, move |svc| svc.create(input)).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

async fn get_client(
    State(service): State<ClientService>,
    Path(id): Path<ClientId>,
) -> ClientResult<Json<Client>> {
    let client = blocking(service, move |svc| svc.require(id)).await?;
    Ok(Json(client))
}

async fn update_client(
    State(service): State<ClientService>,
    Path(id): Path<ClientId>,
    Json(patch): Json<ClientPatch>,
) -> ClientResult<StatusCode> {
    blocking(service, move |svc| {
        let current = svc.require(id)?;
        svc.update(current, &patch)
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_client(
    State(service): State<ClientService>,
    Path(id): Path<ClientId>,
) -> ClientResult<StatusCode> {
    blocking(service, move |svc| {
        let current = svc.require(id)?;
        svc.delete_by_id(current.id)
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
