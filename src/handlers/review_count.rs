use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::{CurrentSession, JsonBody};
use crate::service::Operation;
use crate::{CmsError, router::CmsState};

#[derive(Debug, Serialize)]
pub struct ReviewCountResponse {
    pub count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewCountRequest {
    #[serde(default)]
    pub new_count: Value,
}

#[derive(Debug, Serialize)]
pub struct UpdateReviewCountResponse {
    pub success: bool,
    pub count: i64,
}

/// GET /review-count
pub async fn get_review_count(
    State(state): State<CmsState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<ReviewCountResponse>, CmsError> {
    state.guard.authorize(Operation::ReadReviewCount, &session)?;
    let count = state.site_config.get_review_count().await?;
    Ok(Json(ReviewCountResponse { count }))
}

/// PUT /review-count
pub async fn update_review_count(
    State(state): State<CmsState>,
    CurrentSession(session): CurrentSession,
    body: Result<JsonBody<UpdateReviewCountRequest>, CmsError>,
) -> Result<Json<UpdateReviewCountResponse>, CmsError> {
    state.guard.authorize(Operation::UpdateReviewCount, &session)?;
    let JsonBody(req) = body?;
    let count = state.site_config.set_review_count(&req.new_count).await?;
    Ok(Json(UpdateReviewCountResponse {
        success: true,
        count,
    }))
}
