use crate::config::{AdminConfig, ContentConfig};
use crate::error::CmsError;
use chrono::{DateTime, Duration, Utc};
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

/// Session descriptor resolved for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Session {
    #[serde(rename_all = "camelCase")]
    Authenticated {
        email: String,
        expires_at: DateTime<Utc>,
    },
    Anonymous,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}

/// Payload carried inside the private session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    pub fn into_session(self, now: DateTime<Utc>) -> Session {
        if self.expires_at <= now {
            return Session::Anonymous;
        }
        Session::Authenticated {
            email: self.email,
            expires_at: self.expires_at,
        }
    }
}

/// Operations the HTTP surface can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ReadPost,
    ListPosts,
    ReadReviewCount,
    CreatePost,
    UpdatePost,
    DeletePost,
    UpdateReviewCount,
}

/// Decides which operations need a session and checks admin credentials.
#[derive(Clone)]
pub struct AuthGuard {
    admin_email: String,
    admin_password: String,
    session_ttl: Duration,
    review_count_requires_auth: bool,
    /// Failed logins per client address.
    failures: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    /// Clients that ran out of failure quota, until their quota refills.
    locked_until: Arc<Mutex<HashMap<IpAddr, Instant>>>,
    clock: DefaultClock,
}

impl AuthGuard {
    pub fn new(admin: &AdminConfig, content: &ContentConfig) -> Self {
        let per_minute = NonZeroU32::new(admin.login_attempts_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            admin_email: admin.email.trim().to_string(),
            admin_password: admin.password.clone(),
            session_ttl: Duration::hours(admin.session_ttl_hours.max(1)),
            review_count_requires_auth: content.review_count_requires_auth,
            failures: Arc::new(RateLimiter::keyed(Quota::per_minute(per_minute))),
            locked_until: Arc::new(Mutex::new(HashMap::new())),
            clock: DefaultClock::default(),
        }
    }

    pub fn requires_session(&self, op: Operation) -> bool {
        match op {
            Operation::ReadPost | Operation::ListPosts | Operation::ReadReviewCount => false,
            Operation::CreatePost | Operation::UpdatePost | Operation::DeletePost => true,
            Operation::UpdateReviewCount => self.review_count_requires_auth,
        }
    }

    pub fn authorize(&self, op: Operation, session: &Session) -> Result<(), CmsError> {
        if !self.requires_session(op) || session.is_authenticated() {
            return Ok(());
        }
        warn!(operation = ?op, "rejected unauthenticated request");
        Err(CmsError::Unauthorized)
    }

    /// Verify admin credentials for a login coming from `client` and issue
    /// claims for a new session. Only failed attempts use up the client's
    /// quota; once it is exhausted every attempt from that client, correct or
    /// not, is refused until the quota refills.
    pub fn login(
        &self,
        client: IpAddr,
        email: &str,
        password: &str,
    ) -> Result<SessionClaims, CmsError> {
        if self.is_locked(client) {
            warn!(%client, "login refused: client is rate limited");
            return Err(CmsError::RateLimited);
        }
        if !self.credentials_match(email, password) {
            return Err(self.record_failure(client));
        }
        info!(email = %self.admin_email, %client, "admin logged in");
        Ok(SessionClaims {
            email: self.admin_email.clone(),
            expires_at: Utc::now() + self.session_ttl,
        })
    }

    fn credentials_match(&self, email: &str, password: &str) -> bool {
        // An unset admin account can never log in.
        if self.admin_email.is_empty() || self.admin_password.is_empty() {
            warn!("login attempted but no admin account is configured");
            return false;
        }
        let email_ok = email.trim().as_bytes().ct_eq(self.admin_email.as_bytes());
        let password_ok = password.as_bytes().ct_eq(self.admin_password.as_bytes());
        bool::from(email_ok & password_ok)
    }

    fn is_locked(&self, client: IpAddr) -> bool {
        let mut locked = self.locked_until.lock().unwrap_or_else(|e| e.into_inner());
        match locked.get(&client) {
            Some(until) if *until > Instant::now() => true,
            Some(_) => {
                locked.remove(&client);
                false
            }
            None => false,
        }
    }

    fn record_failure(&self, client: IpAddr) -> CmsError {
        match self.failures.check_key(&client) {
            Ok(()) => {
                warn!(%client, "login failed: bad credentials");
                CmsError::Unauthorized
            }
            Err(not_until) => {
                let wait = not_until.wait_time_from(self.clock.now());
                let now = Instant::now();
                let mut locked = self.locked_until.lock().unwrap_or_else(|e| e.into_inner());
                locked.retain(|_, until| *until > now);
                locked.insert(client, now + wait);
                self.failures.retain_recent();
                warn!(%client, wait_secs = wait.as_secs(), "login rate limit exceeded");
                CmsError::RateLimited
            }
        }
    }
}
