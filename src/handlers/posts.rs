use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::middleware::{CurrentSession, JsonBody};
use crate::service::Operation;
use crate::service::posts::parse_post_id;
use crate::types::{Post, PostFields};
use crate::{CmsError, router::CmsState};

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /posts/list
pub async fn list_posts(
    State(state): State<CmsState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Vec<Post>>, CmsError> {
    state.guard.authorize(Operation::ListPosts, &session)?;
    Ok(Json(state.posts.list().await?))
}

/// GET /posts/{id}
pub async fn get_post(
    State(state): State<CmsState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<Json<Post>, CmsError> {
    state.guard.authorize(Operation::ReadPost, &session)?;
    Ok(Json(state.posts.get_by_raw_id(&id).await?))
}

/// POST /posts
pub async fn create_post(
    State(state): State<CmsState>,
    CurrentSession(session): CurrentSession,
    body: Result<JsonBody<PostFields>, CmsError>,
) -> Result<(StatusCode, Json<Post>), CmsError> {
    state.guard.authorize(Operation::CreatePost, &session)?;
    let JsonBody(fields) = body?;
    let post = state.posts.create(fields).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /posts/{id}: the body is the complete new representation.
pub async fn update_post(
    State(state): State<CmsState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    body: Result<JsonBody<PostFields>, CmsError>,
) -> Result<Json<Post>, CmsError> {
    state.guard.authorize(Operation::UpdatePost, &session)?;
    let id = parse_post_id(&id)?;
    let JsonBody(fields) = body?;
    Ok(Json(state.posts.update(id, fields).await?))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    State(state): State<CmsState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, CmsError> {
    state.guard.authorize(Operation::DeletePost, &session)?;
    let id = parse_post_id(&id)?;
    state.posts.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}
