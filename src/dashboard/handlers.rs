use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use time::{Duration, OffsetDateTime};
use tracing::instrument;

use crate::auth::extractors::ApprovedUser;
use crate::consumptions::repo::Consumption;
use crate::error::Result;
use crate::meals::repo::Meal;
use crate::state::AppState;

use super::dto::{DashboardResponse, HistoryEntry};
use super::repo;
use super::services::{fill_history, HISTORY_DAYS};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/history", get(history))
}

/// Today at a glance: totals plus the meals and entries behind them.
#[instrument(skip(state, user))]
async fn dashboard(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
) -> Result<Json<DashboardResponse>> {
    let today = OffsetDateTime::now_utc().date();

    let totals = repo::totals_for_day(&state.db, user.id, today).await?;
    let meals = Meal::list_for_day(&state.db, user.id, today).await?;
    let consumptions = Consumption::list_views_for_day(&state.db, user.id, today).await?;

    Ok(Json(DashboardResponse {
        date: today,
        totals,
        meals,
        consumptions,
    }))
}

/// The last 14 days of totals, today first. Days without entries show up
/// as zeroes instead of being skipped.
#[instrument(skip(state, user))]
async fn history(
    State(state): State<AppState>,
    ApprovedUser(user): ApprovedUser,
) -> Result<Json<Vec<HistoryEntry>>> {
    let today = OffsetDateTime::now_utc().date();
    let from = today - Duration::days(HISTORY_DAYS - 1);

    let rows = repo::totals_by_day(&state.db, user.id, from, today).await?;
    Ok(Json(fill_history(today, HISTORY_DAYS, rows)))
}
