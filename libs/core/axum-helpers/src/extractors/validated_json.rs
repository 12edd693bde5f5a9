//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed `validator` checks.
///
/// Malformed JSON is rejected with the extractor's own status; failed
/// validation becomes a 400 with per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct ProfileUpdate {
///     #[validate(length(min = 1))]
///     username: String,
/// }
///
/// async fn update(ValidatedJson(patch): ValidatedJson<ProfileUpdate>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
