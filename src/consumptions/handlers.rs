use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::ApprovedUser;
use crate::error::{AppError, Result};
use crate::meals::repo::Meal;
use crate::products::repo::Product;
use crate::state::AppState;

use super::dto::ConsumptionInput;
use super::repo::{Consumption, ConsumptionView};

pub fn consumption_routes() -> Router<AppState> {
    Router::new()
        .route("/consumptions", get(list).post(create))
        .route("/consumptions/:id", put(update).delete(remove))
}

/// Referenced meal and product must both belong to the user. A foreign or
/// unknown id reads the same from outside: not found.
async fn check_references(
    state: &AppState,
    user_id: Uuid,
    input: &ConsumptionInput,
) -> Result<()> {
    Meal::find_owned(&state.db, user_id, input.meal_id)
        .await?
        .ok_or(AppError::NotFound("meal"))?;
    Product::find_owned(&state.db, user_id, input.product_id)
        .await?
        .ok_or(AppError::NotFound("product"))?;
    Ok(())
}

#[instrument(skip(state, user))]
async fn list(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
) -> Result<Json<Vec<ConsumptionView>>> {
    let views = Consumption::list_views(&state.db, user.id).await?;
    Ok(Json(views))
}

#[instrument(skip(state, user, input))]
async fn create(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Json(input): Json<ConsumptionInput>,
) -> Result<(StatusCode, Json<ConsumptionView>)> {
    input.validate()?;
    check_references(&state, user.id, &input).await?;
    let view = Consumption::create(&state.db, user.id, &input).await?;
    tracing::info!(consumption_id = %view.id, "consumption logged");
    Ok((StatusCode::CREATED, Json(view)))
}

#[instrument(skip(state, user, input))]
async fn update(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
    Json(input): Json<ConsumptionInput>,
) -> Result<Json<ConsumptionView>> {
    input.validate()?;
    check_references(&state, user.id, &input).await?;
    let view = Consumption::update(&state.db, user.id, id, &input)
        .await?
        .ok_or(AppError::NotFound("consumption"))?;
    Ok(Json(view))
}

#[instrument(skip(state, user))]
async fn remove(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if !Consumption::delete(&state.db, user.id, id).await? {
        return Err(AppError::NotFound("consumption"));
    }
    tracing::info!(consumption_id = %id, "consumption deleted");
    Ok(StatusCode::NO_CONTENT)
}
