//! Domain layer - Core business entities and ports
//!
//! Plain data records for users and reviews, the request DTOs that
//! create them, and the password hashing port.

pub mod password;
pub mod review;
pub mod user;

pub use password::{Argon2Hasher, PasswordHasher};
pub use review::{
    CreateCommentRequest, CreateReviewRequest, NewReview, NewReviewComment, NewReviewPhoto,
    Review, ReviewComment, ReviewDetails, ReviewPhoto,
};
pub use user::{NewUser, User};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockPasswordHasher;
