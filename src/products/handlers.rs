use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::ApprovedUser;
use crate::error::{AppError, Result};
use crate::state::AppState;

use super::dto::ProductInput;
use super::repo::Product;

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/:id", get(show).put(update).delete(remove))
}

#[instrument(skip(state, user))]
async fn list(State(state): State<AppState>, ApprovedUser(user): ApprovedUser) -> Result<Json<Vec<Product>>> {
    let products = Product::list_by_user(&state.db, user.id).await?;
    Ok(Json(products))
}

#[instrument(skip(state, user, input))]
async fn create(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Json(mut input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    input.validate()?;
    let product = Product::create(&state.db, user.id, &input).await?;
    tracing::info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state, user))]
async fn show(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>> {
    let product = Product::find_owned(&state.db, user.id, id)
        .await?
        .ok_or(AppError::NotFound("product"))?;
    Ok(Json(product))
}

#[instrument(skip(state, user, input))]
async fn update(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
    Json(mut input): Json<ProductInput>,
) -> Result<Json<Product>> {
    input.validate()?;
    let product = Product::update(&state.db, user.id, id, &input)
        .await?
        .ok_or(AppError::NotFound("product"))?;
    Ok(Json(product))
}

#[instrument(skip(state, user))]
async fn remove(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if !Product::delete(&state.db, user.id, id).await? {
        return Err(AppError::NotFound("product"));
    }
    tracing::info!(product_id = %id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
