//! User handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{NewUser, User};
use crate::errors::AppResult;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/", get(list_users).post(create_user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Invalid body or validation error"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Hashing or database failure")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewUser>,
) -> AppResult<StatusCode> {
    state.user_service.create_user(payload).await?;
    Ok(StatusCode::CREATED)
}

/// List all users
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 500, description = "Database failure")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}
