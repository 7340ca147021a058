//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod review;
pub mod review_comment;
pub mod review_photo;
pub mod user;
