//! User repository: trait port and SeaORM adapter.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::user;
use crate::domain::User;
use crate::errors::{AppError, AppResult, DbResultExt};

/// User persistence port.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its assigned id and creation time.
    ///
    /// A duplicate email fails with `AppError::Conflict`.
    async fn create(&self, email: String, password: String) -> AppResult<User>;

    /// All users, by id.
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// SeaORM-backed user store
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, email: String, password: String) -> AppResult<User> {
        let model = user::ActiveModel {
            email: Set(email),
            password: Set(password),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let created = model.insert(&self.db).await.context("insert user").map_err(|e| {
            if e.is_unique_violation() {
                AppError::conflict("User")
            } else {
                e
            }
        })?;

        Ok(User::from(created))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let users = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .context("list users")?;

        Ok(users.into_iter().map(User::from).collect())
    }
}
