use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use sqlx::{Pool, Sqlite};
use tracing::warn;

use crate::config::Config;
use crate::db::{PostStorage, SiteConfigStorage};
use crate::handlers::{auth, posts, review_count};
use crate::service::{AuthGuard, PostRepository, SiteConfigAccessor};

#[derive(Clone)]
pub struct CmsState {
    pub posts: PostRepository,
    pub site_config: SiteConfigAccessor,
    pub guard: AuthGuard,
    pub cookie_key: Key,
    pub insecure_cookie: bool,
}

impl CmsState {
    pub fn new(pool: Pool<Sqlite>, cfg: &Config) -> Self {
        Self {
            posts: PostRepository::new(PostStorage::new(pool.clone())),
            site_config: SiteConfigAccessor::new(
                SiteConfigStorage::new(pool),
                cfg.content.default_review_count,
            ),
            guard: AuthGuard::new(&cfg.admin, &cfg.content),
            cookie_key: cookie_key(&cfg.basic.cookie_secret),
            insecure_cookie: cfg.basic.insecure_cookie,
        }
    }
}

impl FromRef<CmsState> for Key {
    fn from_ref(state: &CmsState) -> Self {
        state.cookie_key.clone()
    }
}

fn cookie_key(secret: &str) -> Key {
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(_) => {
            warn!("cookie_secret missing or shorter than 64 bytes; sessions will not survive a restart");
            Key::generate()
        }
    }
}

pub fn cms_router(state: CmsState, body_limit: usize) -> Router {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/list", get(posts::list_posts))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/review-count",
            get(review_count::get_review_count).put(review_count::update_review_count),
        )
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/session", get(auth::current_session))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
