//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use validator::Validate;

use super::JsonBody;
use crate::errors::AppError;

/// Validated JSON extractor that automatically validates requests.
///
/// A body that does not parse is a `BadRequest`; one that parses but fails
/// its `validator` rules is a `Validation` error.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use reviews_api::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// struct NewTag {
///     #[validate(length(min = 1, message = "name is required"))]
///     name: String,
/// }
///
/// async fn create_tag(ValidatedJson(payload): ValidatedJson<NewTag>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Format validation errors into a user-friendly string, ordered by field name
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Signup {
        #[validate(length(min = 1, message = "zone is required"))]
        zone: String,
        #[validate(length(min = 1, message = "alias is required"))]
        alias: String,
        #[validate(length(min = 3))]
        middle: String,
    }

    #[test]
    fn test_messages_are_ordered_by_field() {
        let signup = Signup {
            zone: String::new(),
            alias: String::new(),
            middle: "x".to_string(),
        };
        let errors = signup.validate().unwrap_err();

        for _ in 0..5 {
            assert_eq!(
                format_validation_errors(&errors),
                "alias is required, middle is invalid, zone is required"
            );
        }
    }

    #[test]
    fn test_single_field_message() {
        let signup = Signup {
            zone: "eu".to_string(),
            alias: String::new(),
            middle: "abc".to_string(),
        };
        let errors = signup.validate().unwrap_err();

        assert_eq!(format_validation_errors(&errors), "alias is required");
    }
}
