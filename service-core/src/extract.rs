use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor whose rejections render as `422 {"detail": ...}`.
///
/// A body sent without a `Content-Type` header is still parsed as JSON. A
/// non-JSON content type, bad syntax, a missing field or a wrong type all
/// collapse to the same 422 so clients only have one malformed-body case.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let parsed = if req.headers().contains_key(header::CONTENT_TYPE) {
            Json::<T>::from_request(req, state).await
        } else {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|e| AppError::UnprocessableEntity(e.body_text()))?;
            Json::<T>::from_bytes(&bytes)
        };

        let Json(value) = parsed.map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            AppError::from(e)
        })?;

        Ok(ApiJson(value))
    }
}
