//! Integration tests for API endpoints.
//!
//! These tests drive the real router with fake services, so they run
//! without a database connection.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
};
use chrono::Utc;
use sea_orm::DbErr;
use serde_json::{json, Value};
use tower::ServiceExt;

use reviews_api::api::{create_router, AppState};
use reviews_api::domain::{
    CreateCommentRequest, CreateReviewRequest, NewUser, Review, ReviewComment, ReviewDetails,
    User,
};
use reviews_api::errors::{AppError, AppResult};
use reviews_api::services::{ReviewService, UserService};

// =============================================================================
// Fake Services for Testing
// =============================================================================

/// Fake user service; `taken@example.com` is already registered
struct FakeUserService;

#[async_trait]
impl UserService for FakeUserService {
    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        if new_user.email == "taken@example.com" {
            return Err(AppError::conflict("User"));
        }
        Ok(user(3, &new_user.email))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(vec![user(1, "one@example.com"), user(2, "two@example.com")])
    }
}

/// Fake review service with fixed outcomes:
/// - a photo path of `"broken"` fails after the review (id 10) was stored
/// - review 404 does not exist, review 500 loses its comments
/// - a comment id is its review id times 100
struct FakeReviewService;

#[async_trait]
impl ReviewService for FakeReviewService {
    async fn create_review(&self, req: CreateReviewRequest, _author_id: i32) -> AppResult<i32> {
        if !(1..=5).contains(&req.rating) {
            return Err(AppError::validation("rating must be between 1 and 5"));
        }
        if req.photo_paths.iter().any(|p| p == "broken") {
            return Err(AppError::PhotosNotAttached {
                review_id: 10,
                source: Box::new(db_error("insert photo")),
            });
        }
        Ok(10)
    }

    async fn create_comment(&self, req: CreateCommentRequest, _author_id: i32) -> AppResult<i32> {
        if req.body.is_empty() {
            return Err(AppError::validation("body is required"));
        }
        Ok(req.review_id * 100)
    }

    async fn list_reviews(
        &self,
        reviewable_type: &str,
        reviewable_id: i32,
    ) -> AppResult<Vec<Review>> {
        Ok(vec![
            review(2, reviewable_type, reviewable_id),
            review(1, reviewable_type, reviewable_id),
        ])
    }

    async fn get_review(&self, review_id: i32) -> AppResult<ReviewDetails> {
        match review_id {
            404 => Err(AppError::NotFound),
            500 => Err(AppError::ReviewIncomplete {
                review: Box::new(review(500, "product", 1)),
                source: Box::new(db_error("list comments")),
            }),
            id => Ok(ReviewDetails {
                review: review(id, "product", 1),
                photos: vec![],
                comments: vec![ReviewComment {
                    id: 1,
                    review_id: id,
                    user_id: 2,
                    body: "Agreed".to_string(),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                }],
            }),
        }
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn user(id: i32, email: &str) -> User {
    User {
        id,
        email: email.to_string(),
        password: "$argon2id$stored".to_string(),
        created_at: Utc::now(),
    }
}

fn review(id: i32, reviewable_type: &str, reviewable_id: i32) -> Review {
    Review {
        id,
        reviewable_type: reviewable_type.to_string(),
        reviewable_id,
        user_id: 7,
        rating: 5,
        title: None,
        body: Some("Great".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn db_error(operation: &'static str) -> AppError {
    AppError::persistence(operation, DbErr::Custom("connection reset".to_string()))
}

fn test_state() -> AppState {
    AppState::new(Arc::new(FakeUserService), Arc::new(FakeReviewService))
}

/// Send one request through a fresh router; returns status and JSON body
/// (`Value::Null` when the body is empty or not JSON).
async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = create_router(test_state())
        .oneshot(request)
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, user_id: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(id) = user_id {
        builder = builder.header("X-User-ID", id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// =============================================================================
// Root and Health Tests
// =============================================================================

#[tokio::test]
async fn test_root_endpoint() {
    let response = create_router(test_state()).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_without_database() {
    let (status, body) = send(get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"]["database"]["status"], "unconfigured");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (status, body) = send(get("/api-docs/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/reviews/{id}"].is_object());
}

// =============================================================================
// User Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_create_user_returns_created_without_body() {
    let (status, body) = send(post_json(
        "/user",
        None,
        json!({"email": "new@example.com", "password": "secret"}),
    ))
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let (status, body) = send(post_json(
        "/user",
        None,
        json!({"email": "taken@example.com", "password": "secret"}),
    ))
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let (status, body) = send(post_json(
        "/user",
        None,
        json!({"email": "not-an-email", "password": "secret"}),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_list_users_includes_stored_password() {
    let (status, body) = send(get("/user")).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["password"], "$argon2id$stored");
}

// =============================================================================
// Review Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_create_review_returns_id() {
    let (status, body) = send(post_json(
        "/reviews",
        Some("7"),
        json!({"reviewable_type": "product", "reviewable_id": 42, "rating": 5}),
    ))
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 10}));
}

#[tokio::test]
async fn test_create_review_requires_user_header() {
    let payload = json!({"reviewable_type": "product", "reviewable_id": 42, "rating": 5});

    let (status, body) = send(post_json("/reviews", None, payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "missing X-User-ID header");

    for bad in ["abc", "0", "-1"] {
        let (status, body) = send(post_json("/reviews", Some(bad), payload.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "invalid X-User-ID header");
    }
}

#[tokio::test]
async fn test_create_review_malformed_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/reviews")
        .header(CONTENT_TYPE, "application/json")
        .header("X-User-ID", "7")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("invalid request body: "));
}

#[tokio::test]
async fn test_create_review_validation_is_bad_request() {
    let (status, body) = send(post_json(
        "/reviews",
        Some("7"),
        json!({"reviewable_type": "product", "reviewable_id": 42, "rating": 9}),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "rating must be between 1 and 5");
}

#[tokio::test]
async fn test_create_review_photo_failure_reports_review_id() {
    let (status, body) = send(post_json(
        "/reviews",
        Some("7"),
        json!({
            "reviewable_type": "product",
            "reviewable_id": 42,
            "rating": 4,
            "photo_paths": ["ok.jpg", "broken"]
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "PHOTOS_NOT_ATTACHED");
    assert_eq!(body["error"]["review_id"], 10);
}

#[tokio::test]
async fn test_list_reviews() {
    let (status, body) = send(get("/reviews?reviewable_type=product&reviewable_id=42")).await;

    assert_eq!(status, StatusCode::OK);
    let reviews = body.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["id"], 2);
    assert_eq!(reviews[0]["reviewable_id"], 42);
}

#[tokio::test]
async fn test_list_reviews_query_errors() {
    let (status, body) = send(get("/reviews?reviewable_type=product")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "reviewable_type and reviewable_id query params are required"
    );

    let (status, body) = send(get("/reviews?reviewable_type=product&reviewable_id=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "invalid reviewable_id");
}

#[tokio::test]
async fn test_get_review_with_comments() {
    let (status, body) = send(get("/reviews/3")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["review"]["id"], 3);
    assert!(body["photos"].as_array().unwrap().is_empty());
    assert_eq!(body["comments"][0]["body"], "Agreed");
}

#[tokio::test]
async fn test_get_review_errors() {
    let (status, _) = send(get("/reviews/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(get("/reviews/404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, body) = send(get("/reviews/500")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "REVIEW_INCOMPLETE");
    assert_eq!(body["error"]["review_id"], 500);
}

// =============================================================================
// Comment Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_create_comment() {
    let (status, body) = send(post_json(
        "/reviews/comments",
        Some("7"),
        json!({"review_id": 4, "body": "Agreed"}),
    ))
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 400}));
}

#[tokio::test]
async fn test_path_review_id_overrides_body() {
    let (status, body) = send(post_json(
        "/reviews/7/comments",
        Some("7"),
        json!({"review_id": 1, "body": "Agreed"}),
    ))
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 700}));
}

#[tokio::test]
async fn test_create_comment_empty_body() {
    let (status, body) = send(post_json(
        "/reviews/comments",
        Some("7"),
        json!({"review_id": 4, "body": ""}),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
