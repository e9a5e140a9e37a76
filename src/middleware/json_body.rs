use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::CmsError;

/// `Json<T>` whose rejections surface as [`CmsError`]s. Take it as
/// `Result<JsonBody<T>, CmsError>` to decide when a bad body should fail the
/// request.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = CmsError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(v)) => Ok(JsonBody(v)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(CmsError::PayloadTooLarge)
            }
            Err(rejection) => Err(CmsError::validation(rejection.body_text())),
        }
    }
}
