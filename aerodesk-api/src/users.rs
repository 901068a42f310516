use aerodesk_core::models::{Approval, User, UserType};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::message;
use crate::state::AppState;

const BCRYPT_COST: u32 = 10;
const BAD_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub usertype: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct OperatorRequest {
    pub id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/approve-operator", post(approve_operator))
        .route("/reject-operator", post(reject_operator))
        .route("/fetch-users", get(fetch_users))
        .route("/fetch-user/{id}", get(fetch_user))
}

async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let usertype = UserType::parse(&req.usertype)?;

    if state.users.find_user_by_email(&req.email).await?.is_some() {
        return Err(AppError::ValidationError("User already exists".to_string()));
    }

    let password = req.password;
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))?;

    let user = User::register(req.username, req.email, usertype, hash);
    state.users.insert_user(&user).await?;

    info!("Registered {} user {}", usertype.as_str(), user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let user = state
        .users
        .find_user_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::AuthenticationError(BAD_CREDENTIALS.to_string()))?;

    let password = req.password;
    let hash = user.password.clone();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .map_err(|e| AppError::InternalServerError(format!("Password check failed: {}", e)))?;

    if !matches {
        return Err(AppError::AuthenticationError(BAD_CREDENTIALS.to_string()));
    }

    Ok(Json(user))
}

async fn approve_operator(
    State(state): State<AppState>,
    AppJson(req): AppJson<OperatorRequest>,
) -> Result<Json<Value>, AppError> {
    state.users.set_approval(req.id, Approval::Approved).await?;
    info!("Operator {} approved", req.id);
    Ok(message("approved!"))
}

async fn reject_operator(
    State(state): State<AppState>,
    AppJson(req): AppJson<OperatorRequest>,
) -> Result<Json<Value>, AppError> {
    state.users.set_approval(req.id, Approval::Rejected).await?;
    info!("Operator {} rejected", req.id);
    Ok(message("rejected!"))
}

async fn fetch_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.users.list_users().await?))
}

async fn fetch_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<User>, AppError> {
    state
        .users
        .find_user(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError("User not found".to_string()))
}
