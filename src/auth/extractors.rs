use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use crate::auth::jwt::JwtKeys;
use crate::auth::repo_types::{Role, User};
use crate::error::AppError;
use crate::state::AppState;

/// Extracts and validates the session token, yielding the user id. Does
/// not touch the database, so it works for any signed-in account whatever
/// its approval status.
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or(AppError::Unauthorized)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired session token");
            AppError::InvalidToken
        })?;

        Ok(AuthUser(claims.sub))
    }
}

/// Loads the session user's row on every request, so the row reflects the
/// live approval status rather than whatever it was at login.
async fn load_session_user(parts: &mut Parts, state: &AppState) -> Result<User, AppError> {
    let AuthUser(user_id) = AuthUser::from_request_parts(parts, state).await?;
    User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::InvalidToken)
}

/// Guard for data-entry routes: the session user must be approved, unless
/// they are an admin.
pub struct ApprovedUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for ApprovedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = load_session_user(parts, state).await?;
        if !user.can_enter_data() {
            warn!(user_id = %user.id, status = ?user.status, "approval gate refused access");
            return Err(AppError::NotApproved);
        }
        Ok(ApprovedUser(user))
    }
}

/// Guard for the admin panel.
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = load_session_user(parts, state).await?;
        if user.role != Role::Admin {
            warn!(user_id = %user.id, "non-admin tried an admin route");
            return Err(AppError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}
