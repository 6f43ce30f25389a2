use axum::Json;

use crate::dtos::RootResponse;

pub const SERVICE_MESSAGE: &str = "Scientific Search MVP API";

/// `GET /`
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: SERVICE_MESSAGE.to_string(),
    })
}
