//! Route table shared by both customer resources. Handlers forward path and
//! body unchanged to the store and map its errors to status codes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;
use tracing::info;

use service::customer::{parse_customer_id, Customer, CustomerStore, RemovableCustomerStore};

use crate::errors::JsonApiError;

/// `GET /all`, `GET /info/:id`, `POST /create`, `PUT /update/:id`.
pub fn router<S>(store: Arc<S>) -> Router
where
    S: CustomerStore + ?Sized + 'static,
{
    Router::new()
        .route("/all", get(find_all::<S>))
        .route("/info/:id", get(find_one::<S>))
        .route("/create", post(create::<S>))
        .route("/update/:id", put(update::<S>))
        .with_state(store)
}

/// [`router`] plus `DELETE /remove/:id`.
pub fn removable_router<S>(store: Arc<S>) -> Router
where
    S: RemovableCustomerStore + ?Sized + 'static,
{
    router(Arc::clone(&store)).merge(
        Router::new()
            .route("/remove/:id", delete(remove::<S>))
            .with_state(store),
    )
}

pub async fn find_all<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Customer>>, JsonApiError>
where
    S: CustomerStore + ?Sized + 'static,
{
    let all = store.find_all().await?;
    info!(count = all.len(), "list customers");
    Ok(Json(all))
}

pub async fn find_one<S>(State(store): State<Arc<S>>, Path(id): Path<String>) -> Result<Json<Customer>, JsonApiError>
where
    S: CustomerStore + ?Sized + 'static,
{
    let id = parse_customer_id(&id)?;
    Ok(Json(store.find_one(id).await?))
}

pub async fn create<S>(
    State(store): State<Arc<S>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Customer>), JsonApiError>
where
    S: CustomerStore + ?Sized + 'static,
{
    let created = store.create(body).await?;
    info!(customer_id = created.id, "created customer");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<S>(
    State(store): State<Arc<S>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Customer>, JsonApiError>
where
    S: CustomerStore + ?Sized + 'static,
{
    let id = parse_customer_id(&id)?;
    let updated = store.update(id, body).await?;
    info!(customer_id = updated.id, "updated customer");
    Ok(Json(updated))
}

pub async fn remove<S>(State(store): State<Arc<S>>, Path(id): Path<String>) -> Result<Json<Customer>, JsonApiError>
where
    S: RemovableCustomerStore + ?Sized + 'static,
{
    let id = parse_customer_id(&id)?;
    let removed = store.remove(id).await?;
    info!(customer_id = removed.id, "removed customer");
    Ok(Json(removed))
}
