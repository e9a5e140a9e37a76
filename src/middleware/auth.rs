use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use chrono::Utc;
use std::convert::Infallible;
use tracing::debug;

use crate::service::{Session, SessionClaims};

pub const SESSION_COOKIE: &str = "cms_session";

/// Resolve the session carried by a private cookie jar. Missing, tampered,
/// undecodable or expired cookies all yield an anonymous session.
pub fn session_from_jar(jar: &PrivateCookieJar) -> Session {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Session::Anonymous;
    };
    match serde_json::from_str::<SessionClaims>(cookie.value()) {
        Ok(claims) => claims.into_session(Utc::now()),
        Err(e) => {
            debug!(error = %e, "discarding undecodable session cookie");
            Session::Anonymous
        }
    }
}

/// Extracts the caller's session; never rejects.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(Self(session_from_jar(&jar)))
    }
}

pub fn session_cookie(
    claims: &SessionClaims,
    insecure: bool,
) -> Result<Cookie<'static>, serde_json::Error> {
    let value = serde_json::to_string(claims)?;
    let max_age = (claims.expires_at - Utc::now()).num_seconds().max(0);
    Ok(Cookie::build(Cookie::new(SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(!insecure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age))
        .build())
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
