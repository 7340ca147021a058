//! Review domain entities: reviews, their photos and comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// A user review attached to a reviewable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    #[schema(example = 1)]
    pub id: i32,
    /// Discriminator of the reviewed thing, e.g. "product" or "vendor"
    #[schema(example = "product")]
    pub reviewable_type: String,
    #[schema(example = 42)]
    pub reviewable_id: i32,
    /// Author
    pub user_id: i32,
    /// 1..=5
    #[schema(example = 5, minimum = 1, maximum = 5)]
    pub rating: i32,
    pub title: Option<String>,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A photo attached to a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewPhoto {
    pub id: i32,
    pub review_id: i32,
    /// Path, URL or storage key
    pub file_path: String,
    /// Optional JSON metadata (width, height, mime, ...)
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<Value>,
    /// Zero-based position among the review's photos
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// A comment left by a user on a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReviewComment {
    pub id: i32,
    pub review_id: i32,
    pub user_id: i32,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A review with its photos in display order and its comments, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewDetails {
    pub review: Review,
    pub photos: Vec<ReviewPhoto>,
    pub comments: Vec<ReviewComment>,
}

/// Review creation payload.
///
/// Photos are given as already-uploaded file paths or storage keys;
/// `photo_metadata[i]` belongs to `photo_paths[i]` and may be shorter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    #[serde(default)]
    #[schema(example = "product")]
    pub reviewable_type: String,
    #[serde(default)]
    #[schema(example = 42)]
    pub reviewable_id: i32,
    #[serde(default)]
    #[schema(example = 4)]
    pub rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Solid purchase")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(example = json!(["uploads/1.jpg"]))]
    pub photo_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(value_type = Vec<Object>)]
    pub photo_metadata: Vec<Value>,
}

impl CreateReviewRequest {
    /// Build one photo per path, positioned by its index.
    ///
    /// Missing or `null` metadata entries leave the photo without metadata.
    pub fn photos(&self) -> Vec<NewReviewPhoto> {
        self.photo_paths
            .iter()
            .enumerate()
            .zip(0..)
            .map(|((i, path), sort_order)| NewReviewPhoto {
                file_path: path.clone(),
                metadata: self
                    .photo_metadata
                    .get(i)
                    .filter(|meta| !meta.is_null())
                    .cloned(),
                sort_order,
            })
            .collect()
    }
}

/// Comment creation payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    /// Ignored when the review id is given in the path
    #[serde(default)]
    #[schema(example = 1)]
    pub review_id: i32,
    #[serde(default)]
    #[schema(example = "Agreed, great product")]
    pub body: String,
}

/// Review fields supplied by the caller; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub reviewable_type: String,
    pub reviewable_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl NewReview {
    pub fn from_request(req: &CreateReviewRequest, author_id: i32) -> Self {
        Self {
            reviewable_type: req.reviewable_type.clone(),
            reviewable_id: req.reviewable_id,
            user_id: author_id,
            rating: req.rating,
            title: req.title.clone(),
            body: req.body.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReviewPhoto {
    pub file_path: String,
    pub metadata: Option<Value>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReviewComment {
    pub review_id: i32,
    pub user_id: i32,
    pub body: String,
}
