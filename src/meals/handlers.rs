use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extractors::ApprovedUser;
use crate::error::{AppError, Result};
use crate::state::AppState;

use super::dto::MealInput;
use super::repo::Meal;

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list).post(create))
        .route("/meals/:id", get(show).put(update).delete(remove))
}

#[instrument(skip(state, user))]
async fn list(State(state): State<AppState>, ApprovedUser(user): ApprovedUser) -> Result<Json<Vec<Meal>>> {
    let meals = Meal::list_by_user(&state.db, user.id).await?;
    Ok(Json(meals))
}

#[instrument(skip(state, user, input))]
async fn create(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Json(input): Json<MealInput>,
) -> Result<(StatusCode, Json<Meal>)> {
    let (name, date) = input.normalize();
    let meal = Meal::create(&state.db, user.id, &name, date).await?;
    tracing::info!(meal_id = %meal.id, %date, "meal created");
    Ok((StatusCode::CREATED, Json(meal)))
}

#[instrument(skip(state, user))]
async fn show(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Meal>> {
    let meal = Meal::find_owned(&state.db, user.id, id)
        .await?
        .ok_or(AppError::NotFound("meal"))?;
    Ok(Json(meal))
}

#[instrument(skip(state, user, input))]
async fn update(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
    Json(input): Json<MealInput>,
) -> Result<Json<Meal>> {
    let (name, date) = input.normalize();
    let meal = Meal::update(&state.db, user.id, id, &name, date)
        .await?
        .ok_or(AppError::NotFound("meal"))?;
    Ok(Json(meal))
}

#[instrument(skip(state, user))]
async fn remove(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if !Meal::delete(&state.db, user.id, id).await? {
        return Err(AppError::NotFound("meal"));
    }
    tracing::info!(meal_id = %id, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}
