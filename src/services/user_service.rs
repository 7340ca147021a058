//! User service - Handles user-related business logic.
//!
//! Passwords are hashed before they reach the repository when a hasher is
//! configured; without one they are stored as given.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewUser, PasswordHasher, User};
use crate::errors::AppResult;
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a user, hashing the password first when hashing is enabled
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    hasher: Option<Arc<dyn PasswordHasher>>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>, hasher: Option<Arc<dyn PasswordHasher>>) -> Self {
        Self { repo, hasher }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let NewUser { email, password } = new_user;

        let password = match &self.hasher {
            Some(hasher) => hasher.hash(&password)?,
            None => password,
        };

        let user = self.repo.create(email, password).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockPasswordHasher;
    use crate::errors::AppError;
    use crate::infra::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn stored(id: i32, email: &str, password: &str) -> User {
        User {
            id,
            email: email.to_string(),
            password: password.to_string(),
            created_at: Utc::now(),
        }
    }

    fn new_user() -> NewUser {
        NewUser {
            email: "a@b.c".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .with(eq("secret"))
            .times(1)
            .returning(|_| Ok("$argon2id$hashed".to_string()));

        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .with(eq("a@b.c".to_string()), eq("$argon2id$hashed".to_string()))
            .times(1)
            .returning(|email, password| Ok(stored(1, &email, &password)));

        let service = UserManager::new(Arc::new(repo), Some(Arc::new(hasher)));
        let user = service.create_user(new_user()).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.password, "$argon2id$hashed");
    }

    #[tokio::test]
    async fn test_create_user_without_hasher_stores_plaintext() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .with(eq("a@b.c".to_string()), eq("secret".to_string()))
            .times(1)
            .returning(|email, password| Ok(stored(2, &email, &password)));

        let service = UserManager::new(Arc::new(repo), None);
        let user = service.create_user(new_user()).await.unwrap();

        assert_eq!(user.password, "secret");
    }

    #[tokio::test]
    async fn test_hashing_failure_skips_store() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Err(AppError::hashing("out of memory")));

        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let service = UserManager::new(Arc::new(repo), Some(Arc::new(hasher)));
        let err = service.create_user(new_user()).await.unwrap_err();

        assert!(matches!(err, AppError::Hashing(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|_, _| Err(AppError::conflict("User")));

        let service = UserManager::new(Arc::new(repo), None);
        let err = service.create_user(new_user()).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref entity) if entity == "User"));
    }

    #[tokio::test]
    async fn test_list_users_returns_store_order() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().times(1).returning(|| {
            Ok(vec![stored(1, "x@y.z", "p1"), stored(2, "q@r.s", "p2")])
        });

        let service = UserManager::new(Arc::new(repo), None);
        let users = service.list_users().await.unwrap();

        assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_list_users_empty() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|| Ok(vec![]));

        let service = UserManager::new(Arc::new(repo), None);
        assert!(service.list_users().await.unwrap().is_empty());
    }
}
