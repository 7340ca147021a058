//! Custom axum extractors.

mod author;
mod json_body;
mod validated_json;

pub use author::AuthorId;
pub use json_body::JsonBody;
pub use validated_json::ValidatedJson;
