//! Review repository: trait port and SeaORM adapter.
//!
//! Photo batches are written inside a single transaction so a failed
//! batch leaves no photos behind.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::{review, review_comment, review_photo};
use crate::domain::{
    NewReview, NewReviewComment, NewReviewPhoto, Review, ReviewComment, ReviewPhoto,
};
use crate::errors::{AppError, AppResult, DbResultExt};

/// Review persistence port.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Insert a review and return its id.
    async fn create(&self, review: NewReview) -> AppResult<i32>;

    /// Attach photos to an existing review, all or nothing.
    async fn add_photos(&self, review_id: i32, photos: Vec<NewReviewPhoto>) -> AppResult<()>;

    /// Insert a review and its photos in one transaction.
    async fn create_with_photos(
        &self,
        review: NewReview,
        photos: Vec<NewReviewPhoto>,
    ) -> AppResult<i32>;

    /// Insert a comment and return its id.
    async fn add_comment(&self, comment: NewReviewComment) -> AppResult<i32>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Review>>;

    /// Reviews of one reviewable entity, newest first.
    async fn list_by_reviewable(
        &self,
        reviewable_type: &str,
        reviewable_id: i32,
    ) -> AppResult<Vec<Review>>;

    /// Comments of a review, oldest first.
    async fn list_comments(&self, review_id: i32) -> AppResult<Vec<ReviewComment>>;

    /// Photos of a review in display order.
    async fn list_photos(&self, review_id: i32) -> AppResult<Vec<ReviewPhoto>>;

    /// Hard delete; photos and comments go with the review.
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed review store
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Commit on success, roll back on error.
    async fn finish<T>(txn: DatabaseTransaction, result: AppResult<T>) -> AppResult<T> {
        match result {
            Ok(value) => {
                txn.commit().await.context("commit transaction")?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

async fn insert_review<C: ConnectionTrait>(conn: &C, new: NewReview) -> AppResult<i32> {
    let now = Utc::now();
    let model = review::ActiveModel {
        reviewable_type: Set(new.reviewable_type),
        reviewable_id: Set(new.reviewable_id),
        user_id: Set(new.user_id),
        rating: Set(new.rating),
        title: Set(new.title),
        body: Set(new.body),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = model.insert(conn).await.context("insert review")?;
    Ok(created.id)
}

async fn insert_photos<C: ConnectionTrait>(
    conn: &C,
    review_id: i32,
    photos: Vec<NewReviewPhoto>,
) -> AppResult<()> {
    let now = Utc::now();
    for photo in photos {
        review_photo::ActiveModel {
            review_id: Set(review_id),
            file_path: Set(photo.file_path),
            metadata: Set(photo.metadata),
            sort_order: Set(photo.sort_order),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .context("insert photo")?;
    }
    Ok(())
}

#[async_trait]
impl ReviewRepository for ReviewStore {
    async fn create(&self, review: NewReview) -> AppResult<i32> {
        insert_review(&self.db, review).await
    }

    async fn add_photos(&self, review_id: i32, photos: Vec<NewReviewPhoto>) -> AppResult<()> {
        if photos.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await.context("begin transaction")?;
        let result = insert_photos(&txn, review_id, photos).await;
        Self::finish(txn, result).await
    }

    async fn create_with_photos(
        &self,
        review: NewReview,
        photos: Vec<NewReviewPhoto>,
    ) -> AppResult<i32> {
        let txn = self.db.begin().await.context("begin transaction")?;
        let result: AppResult<i32> = async {
            let review_id = insert_review(&txn, review).await?;
            insert_photos(&txn, review_id, photos).await?;
            Ok(review_id)
        }
        .await;
        Self::finish(txn, result).await
    }

    async fn add_comment(&self, comment: NewReviewComment) -> AppResult<i32> {
        let now = Utc::now();
        let model = review_comment::ActiveModel {
            review_id: Set(comment.review_id),
            user_id: Set(comment.user_id),
            body: Set(comment.body),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model.insert(&self.db).await.context("insert comment")?;
        Ok(created.id)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Review>> {
        let found = review::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("get review")?;

        Ok(found.map(Review::from))
    }

    async fn list_by_reviewable(
        &self,
        reviewable_type: &str,
        reviewable_id: i32,
    ) -> AppResult<Vec<Review>> {
        let reviews = review::Entity::find()
            .filter(review::Column::ReviewableType.eq(reviewable_type))
            .filter(review::Column::ReviewableId.eq(reviewable_id))
            .order_by_desc(review::Column::CreatedAt)
            .order_by_desc(review::Column::Id)
            .all(&self.db)
            .await
            .context("list reviews")?;

        Ok(reviews.into_iter().map(Review::from).collect())
    }

    async fn list_comments(&self, review_id: i32) -> AppResult<Vec<ReviewComment>> {
        let comments = review_comment::Entity::find()
            .filter(review_comment::Column::ReviewId.eq(review_id))
            .order_by_asc(review_comment::Column::CreatedAt)
            .order_by_asc(review_comment::Column::Id)
            .all(&self.db)
            .await
            .context("list comments")?;

        Ok(comments.into_iter().map(ReviewComment::from).collect())
    }

    async fn list_photos(&self, review_id: i32) -> AppResult<Vec<ReviewPhoto>> {
        let photos = review_photo::Entity::find()
            .filter(review_photo::Column::ReviewId.eq(review_id))
            .order_by_asc(review_photo::Column::SortOrder)
            .order_by_asc(review_photo::Column::Id)
            .all(&self.db)
            .await
            .context("list photos")?;

        Ok(photos.into_iter().map(ReviewPhoto::from).collect())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = review::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete review")?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
