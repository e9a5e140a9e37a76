use axum::{Json, extract::State};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;

use crate::middleware::{ClientAddr, JsonBody};
use crate::middleware::auth::{clear_session_cookie, session_cookie, session_from_jar};
use crate::service::Session;
use crate::{CmsError, router::CmsState};

use super::posts::MessageResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /auth/login -> verifies admin credentials and sets the session cookie.
pub async fn login(
    State(state): State<CmsState>,
    ClientAddr(client): ClientAddr,
    jar: PrivateCookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<(PrivateCookieJar, Json<Session>), CmsError> {
    let claims = state.guard.login(client, &req.email, &req.password)?;
    let cookie = session_cookie(&claims, state.insecure_cookie)?;
    let session = Session::Authenticated {
        email: claims.email,
        expires_at: claims.expires_at,
    };
    Ok((jar.add(cookie), Json(session)))
}

/// POST /auth/logout -> drops the session cookie.
pub async fn logout(jar: PrivateCookieJar) -> (PrivateCookieJar, Json<MessageResponse>) {
    (
        jar.remove(clear_session_cookie()),
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

/// GET /auth/session -> describes the caller's session.
pub async fn current_session(jar: PrivateCookieJar) -> Json<Session> {
    Json(session_from_jar(&jar))
}
