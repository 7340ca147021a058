//! Review and comment handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::{AuthorId, JsonBody};
use crate::api::AppState;
use crate::domain::{CreateCommentRequest, CreateReviewRequest, Review, ReviewDetails};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, CreatedId};

/// Query parameters for listing reviews
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListReviewsQuery {
    /// Kind of the reviewed entity
    #[param(example = "product")]
    pub reviewable_type: Option<String>,
    /// Id of the reviewed entity
    #[param(value_type = Option<i32>, example = 42)]
    pub reviewable_id: Option<String>,
}

/// Create review routes
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route("/comments", post(create_comment))
        .route("/:id", get(get_review))
        .route("/:id/comments", post(create_review_comment))
}

fn parse_id(raw: &str, message: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest(message.to_string()))
}

/// Create a review, optionally with photos
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "Reviews",
    request_body = CreateReviewRequest,
    params(("X-User-ID" = i32, Header, description = "Author id")),
    responses(
        (status = 201, description = "Review created", body = CreatedId),
        (status = 400, description = "Invalid body or validation error"),
        (status = 401, description = "Missing or invalid X-User-ID"),
        (status = 500, description = "Database failure, or photos not attached (body carries review_id)")
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    AuthorId(author_id): AuthorId,
    JsonBody(payload): JsonBody<CreateReviewRequest>,
) -> AppResult<Created<CreatedId>> {
    let id = state.review_service.create_review(payload, author_id).await?;
    Ok(Created(CreatedId { id }))
}

/// Comment on a review named in the body
#[utoipa::path(
    post,
    path = "/reviews/comments",
    tag = "Reviews",
    request_body = CreateCommentRequest,
    params(("X-User-ID" = i32, Header, description = "Author id")),
    responses(
        (status = 201, description = "Comment created", body = CreatedId),
        (status = 400, description = "Invalid body or validation error"),
        (status = 401, description = "Missing or invalid X-User-ID"),
        (status = 500, description = "Database failure")
    )
)]
pub async fn create_comment(
    State(state): State<AppState>,
    AuthorId(author_id): AuthorId,
    JsonBody(payload): JsonBody<CreateCommentRequest>,
) -> AppResult<Created<CreatedId>> {
    let id = state.review_service.create_comment(payload, author_id).await?;
    Ok(Created(CreatedId { id }))
}

/// Comment on the review named in the path
#[utoipa::path(
    post,
    path = "/reviews/{id}/comments",
    tag = "Reviews",
    request_body = CreateCommentRequest,
    params(
        ("id" = i32, Path, description = "Review id; overrides review_id in the body"),
        ("X-User-ID" = i32, Header, description = "Author id")
    ),
    responses(
        (status = 201, description = "Comment created", body = CreatedId),
        (status = 400, description = "Invalid id, body or validation error"),
        (status = 401, description = "Missing or invalid X-User-ID"),
        (status = 500, description = "Database failure")
    )
)]
pub async fn create_review_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AuthorId(author_id): AuthorId,
    JsonBody(mut payload): JsonBody<CreateCommentRequest>,
) -> AppResult<Created<CreatedId>> {
    payload.review_id = parse_id(&id, "invalid id")?;
    let id = state.review_service.create_comment(payload, author_id).await?;
    Ok(Created(CreatedId { id }))
}

/// List reviews of one reviewable entity, newest first
#[utoipa::path(
    get,
    path = "/reviews",
    tag = "Reviews",
    params(ListReviewsQuery),
    responses(
        (status = 200, description = "Matching reviews", body = Vec<Review>),
        (status = 400, description = "Missing or non-numeric query parameters"),
        (status = 500, description = "Database failure")
    )
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ListReviewsQuery>,
) -> AppResult<Json<Vec<Review>>> {
    let (reviewable_type, raw_id) = match (query.reviewable_type, query.reviewable_id) {
        (Some(kind), Some(id)) if !kind.is_empty() && !id.is_empty() => (kind, id),
        _ => {
            return Err(AppError::BadRequest(
                "reviewable_type and reviewable_id query params are required".to_string(),
            ))
        }
    };
    let reviewable_id = parse_id(&raw_id, "invalid reviewable_id")?;

    let reviews = state
        .review_service
        .list_reviews(&reviewable_type, reviewable_id)
        .await?;
    Ok(Json(reviews))
}

/// Get a review with its photos and comments
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    tag = "Reviews",
    params(("id" = i32, Path, description = "Review id")),
    responses(
        (status = 200, description = "Review with photos and comments", body = ReviewDetails),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Review not found"),
        (status = 500, description = "Database failure, or photos/comments not loaded (body carries review_id)")
    )
)]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ReviewDetails>> {
    let review_id = parse_id(&id, "invalid id")?;
    let details = state.review_service.get_review(review_id).await?;
    Ok(Json(details))
}
