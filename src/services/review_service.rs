//! Review service - Review, photo and comment use cases.
//!
//! Input is validated before any repository call. Creating a review with
//! photos runs in one of two [`PhotoMode`]s; in the compatible mode a photo
//! failure leaves the review in place and the error carries its id.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{MAX_PHOTOS_PER_REVIEW, MAX_RATING, MIN_RATING};
use crate::domain::{
    CreateCommentRequest, CreateReviewRequest, NewReview, NewReviewComment, Review,
    ReviewDetails,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::ReviewRepository;

/// How a review and its photos are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhotoMode {
    /// Review first, then the photo batch in its own transaction
    #[default]
    Compatible,
    /// Review and photos in a single transaction
    Atomic,
}

impl PhotoMode {
    pub fn from_flag(atomic: bool) -> Self {
        if atomic {
            PhotoMode::Atomic
        } else {
            PhotoMode::Compatible
        }
    }
}

/// Review service trait for dependency injection.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Create a review authored by `author_id`, with optional photos. Returns its id.
    async fn create_review(&self, req: CreateReviewRequest, author_id: i32) -> AppResult<i32>;

    /// Comment on a review. Returns the comment id.
    async fn create_comment(&self, req: CreateCommentRequest, author_id: i32) -> AppResult<i32>;

    /// Reviews of one reviewable entity, newest first
    async fn list_reviews(&self, reviewable_type: &str, reviewable_id: i32)
        -> AppResult<Vec<Review>>;

    /// A review with its photos and comments
    async fn get_review(&self, review_id: i32) -> AppResult<ReviewDetails>;
}

/// Concrete implementation of ReviewService.
pub struct ReviewManager {
    repo: Arc<dyn ReviewRepository>,
    photo_mode: PhotoMode,
}

impl ReviewManager {
    pub fn new(repo: Arc<dyn ReviewRepository>, photo_mode: PhotoMode) -> Self {
        Self { repo, photo_mode }
    }
}

fn validate_review(req: &CreateReviewRequest) -> AppResult<()> {
    if req.reviewable_type.is_empty() {
        return Err(AppError::validation("reviewable_type is required"));
    }
    if req.reviewable_id == 0 {
        return Err(AppError::validation("reviewable_id is required"));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&req.rating) {
        return Err(AppError::validation("rating must be between 1 and 5"));
    }
    if req.photo_paths.len() > MAX_PHOTOS_PER_REVIEW {
        return Err(AppError::validation(format!(
            "at most {} photos per review",
            MAX_PHOTOS_PER_REVIEW
        )));
    }
    Ok(())
}

fn validate_comment(req: &CreateCommentRequest) -> AppResult<()> {
    if req.review_id == 0 {
        return Err(AppError::validation("review_id is required"));
    }
    if req.body.is_empty() {
        return Err(AppError::validation("body is required"));
    }
    Ok(())
}

#[async_trait]
impl ReviewService for ReviewManager {
    async fn create_review(&self, req: CreateReviewRequest, author_id: i32) -> AppResult<i32> {
        validate_review(&req)?;

        let review = NewReview::from_request(&req, author_id);
        let photos = req.photos();
        let photo_count = photos.len();

        if self.photo_mode == PhotoMode::Atomic && !photos.is_empty() {
            let review_id = self.repo.create_with_photos(review, photos).await?;
            tracing::info!(review_id, photo_count, "Review created with photos");
            return Ok(review_id);
        }

        let review_id = self.repo.create(review).await?;

        if !photos.is_empty() {
            if let Err(source) = self.repo.add_photos(review_id, photos).await {
                tracing::warn!(review_id, error = %source, "Review created but photos were not attached");
                return Err(AppError::PhotosNotAttached {
                    review_id,
                    source: Box::new(source),
                });
            }
        }

        tracing::info!(review_id, photo_count, "Review created");
        Ok(review_id)
    }

    async fn create_comment(&self, req: CreateCommentRequest, author_id: i32) -> AppResult<i32> {
        validate_comment(&req)?;

        let comment_id = self
            .repo
            .add_comment(NewReviewComment {
                review_id: req.review_id,
                user_id: author_id,
                body: req.body,
            })
            .await?;

        tracing::info!(comment_id, review_id = req.review_id, "Comment created");
        Ok(comment_id)
    }

    async fn list_reviews(
        &self,
        reviewable_type: &str,
        reviewable_id: i32,
    ) -> AppResult<Vec<Review>> {
        if reviewable_type.is_empty() || reviewable_id == 0 {
            return Err(AppError::validation(
                "reviewable_type and reviewable_id are required",
            ));
        }

        self.repo
            .list_by_reviewable(reviewable_type, reviewable_id)
            .await
    }

    async fn get_review(&self, review_id: i32) -> AppResult<ReviewDetails> {
        if review_id == 0 {
            return Err(AppError::validation("review id is required"));
        }

        let review = self.repo.get_by_id(review_id).await?.ok_or_not_found()?;

        let incomplete = |review: Review, source: AppError| {
            tracing::warn!(review_id, error = %source, "Review found but not fully loaded");
            AppError::ReviewIncomplete {
                review: Box::new(review),
                source: Box::new(source),
            }
        };

        let photos = match self.repo.list_photos(review_id).await {
            Ok(photos) => photos,
            Err(source) => return Err(incomplete(review, source)),
        };

        let comments = match self.repo.list_comments(review_id).await {
            Ok(comments) => comments,
            Err(source) => return Err(incomplete(review, source)),
        };

        Ok(ReviewDetails {
            review,
            photos,
            comments,
        })
    }
}
