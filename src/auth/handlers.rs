use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::auth::{
    dto::{LoginRequest, MessageResponse, PublicUser, SessionResponse, SignupRequest, SignupResponse},
    extractors::AuthUser,
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo_types::{ApprovalStatus, Role, User},
    services::is_valid_email,
};
use crate::error::{AppError, Result};
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    payload.username = payload.username.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    if payload.username.is_empty() {
        return Err(AppError::validation("username is required"));
    }
    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::validation("invalid email"));
    }
    if payload.password.len() < 8 {
        return Err(AppError::validation("password must be at least 8 characters"));
    }

    if User::identity_taken(&state.db, &payload.email, &payload.username).await? {
        warn!(email = %payload.email, "identity already registered");
        return Err(AppError::DuplicateIdentity);
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &payload.username,
        &payload.email,
        &hash,
        Role::User,
        ApprovalStatus::Pending,
    )
    .await
    .map_err(|e| {
        // Signup racing another signup for the same identity trips the
        // unique constraint the pre-check missed.
        if e.as_database_error()
            .map_or(false, |d| d.is_unique_violation())
        {
            AppError::DuplicateIdentity
        } else {
            AppError::Database(e)
        }
    })?;

    info!(user_id = %user.id, email = %user.email, "user signed up, awaiting approval");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "signup successful, your account is awaiting admin approval",
            user: user.into(),
        }),
    ))
}

/// Verifies credentials and establishes a session. Approval is not checked
/// here: a pending user can log in and will see their status on `/auth/me`,
/// while the approval gate keeps them out of the data-entry routes.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    payload.email = payload.email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign_session(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(SessionResponse {
        token,
        user: user.into(),
    }))
}

/// Sessions are stateless signed tokens, so logout is acknowledged here
/// and the client discards the token.
#[instrument(skip_all)]
pub async fn logout(AuthUser(user_id): AuthUser) -> Result<Json<MessageResponse>> {
    info!(user_id = %user_id, "user logged out");
    Ok(Json(MessageResponse {
        message: "logged out",
    }))
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(AppError::InvalidToken)?;
    Ok(Json(user.into()))
}
