use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::instrument;
use uuid::Uuid;

use crate::auth::dto::PublicUser;
use crate::auth::extractors::AdminUser;
use crate::auth::repo_types::{ApprovalStatus, User};
use crate::error::{AppError, Result};
use crate::state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/pending", get(pending))
        .route("/admin/users", get(all_users))
        .route("/admin/approve/:id", post(approve))
        .route("/admin/reject/:id", post(reject))
}

/// Accounts waiting for a decision.
#[instrument(skip_all)]
async fn pending(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<PublicUser>>> {
    let users = User::list_pending(&state.db).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

/// Every account, newest first.
#[instrument(skip_all)]
async fn all_users(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> Result<Json<Vec<PublicUser>>> {
    let users = User::list_all(&state.db).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state, admin))]
async fn approve(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>> {
    let user = set_status(&state, id, ApprovalStatus::Approved).await?;
    tracing::info!(user_id = %id, admin_id = %admin.id, "user approved");
    Ok(Json(user))
}

#[instrument(skip(state, admin))]
async fn reject(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>> {
    let user = set_status(&state, id, ApprovalStatus::Rejected).await?;
    tracing::info!(user_id = %id, admin_id = %admin.id, "user rejected");
    Ok(Json(user))
}

async fn set_status(state: &AppState, id: Uuid, status: ApprovalStatus) -> Result<PublicUser> {
    let user = User::set_status(&state.db, id, status)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    Ok(PublicUser::from(user))
}
