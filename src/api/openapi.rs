//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{review_handler, user_handler};
use crate::domain::{
    CreateCommentRequest, CreateReviewRequest, NewUser, Review, ReviewComment, ReviewDetails,
    ReviewPhoto, User,
};
use crate::types::CreatedId;

/// OpenAPI documentation for the Reviews API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reviews API",
        version = "0.1.0",
        description = "Users, reviews, review photos and comments",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::create_user,
        user_handler::list_users,
        // Review endpoints
        review_handler::create_review,
        review_handler::create_comment,
        review_handler::create_review_comment,
        review_handler::list_reviews,
        review_handler::get_review,
    ),
    components(
        schemas(
            User,
            NewUser,
            Review,
            ReviewPhoto,
            ReviewComment,
            ReviewDetails,
            CreateReviewRequest,
            CreateCommentRequest,
            CreatedId,
        )
    ),
    tags(
        (name = "Users", description = "User registration and listing"),
        (name = "Reviews", description = "Reviews, photos and comments")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_all_routes() {
        let doc = ApiDoc::openapi();
        for path in [
            "/user",
            "/reviews",
            "/reviews/comments",
            "/reviews/{id}",
            "/reviews/{id}/comments",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
