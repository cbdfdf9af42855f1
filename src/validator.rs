use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use inkpress_core::AppError;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that also runs `validator` rules.
///
/// Both malformed bodies and failed validation reject with 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(describe_rejection)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

fn describe_rejection(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(
            "Missing 'Content-Type: application/json' header".to_string(),
        );
    }

    let body_text = rejection.body_text();

    if let Some(field) = body_text
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return AppError::bad_request(format!("{} is required", field));
    }

    if body_text.contains("invalid type") {
        return AppError::bad_request("Invalid field type in request".to_string());
    }

    AppError::bad_request("Invalid request body".to_string())
}
