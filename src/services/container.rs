//! Service Container - Centralized service access.
//!
//! Builds the repositories, the optional password hasher and the services
//! on top of them from one database connection and the configuration.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{PhotoMode, ReviewManager, ReviewService, UserManager, UserService};
use crate::config::Config;
use crate::domain::{Argon2Hasher, PasswordHasher};
use crate::infra::{ReviewStore, UserStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get review service
    fn reviews(&self) -> Arc<dyn ReviewService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    user_service: Arc<dyn UserService>,
    review_service: Arc<dyn ReviewService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(user_service: Arc<dyn UserService>, review_service: Arc<dyn ReviewService>) -> Self {
        Self {
            user_service,
            review_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: DatabaseConnection, config: &Config) -> Self {
        let hasher: Option<Arc<dyn PasswordHasher>> = if config.password_hashing {
            Some(Arc::new(Argon2Hasher::new()))
        } else {
            None
        };
        let photo_mode = PhotoMode::from_flag(config.atomic_review_photos);

        let user_repo = Arc::new(UserStore::new(db.clone()));
        let review_repo = Arc::new(ReviewStore::new(db));

        tracing::debug!(?photo_mode, hashing = config.password_hashing, "Services wired");

        Self::new(
            Arc::new(UserManager::new(user_repo, hasher)),
            Arc::new(ReviewManager::new(review_repo, photo_mode)),
        )
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn reviews(&self) -> Arc<dyn ReviewService> {
        self.review_service.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockReviewRepository, MockUserRepository};

    fn same<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
        std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
    }

    #[tokio::test]
    async fn test_container_hands_out_injected_services() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_list().times(1).returning(|| Ok(vec![]));

        let users: Arc<dyn UserService> = Arc::new(UserManager::new(Arc::new(user_repo), None));
        let reviews: Arc<dyn ReviewService> = Arc::new(ReviewManager::new(
            Arc::new(MockReviewRepository::new()),
            PhotoMode::default(),
        ));

        let services = Services::new(users.clone(), reviews.clone());
        let cloned = services.clone();

        assert!(same(&services.users(), &users));
        assert!(same(&cloned.reviews(), &reviews));
        assert!(services.users().list_users().await.unwrap().is_empty());
    }
}
