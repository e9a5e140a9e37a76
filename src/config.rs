use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub admin: AdminConfig,
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Master key for the private session cookie; must be at least 64 bytes.
    pub cookie_secret: String,
    pub insecure_cookie: bool,
    pub body_limit_bytes: usize,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:practice_cms.sqlite".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: String::new(),
            insecure_cookie: false,
            body_limit_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    pub session_ttl_hours: i64,
    pub login_attempts_per_minute: u32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            session_ttl_hours: 24,
            login_attempts_per_minute: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub default_review_count: i64,
    /// When false, `PUT /review-count` is writable without a session.
    pub review_count_requires_auth: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            default_review_count: 88,
            review_count_requires_auth: true,
        }
    }
}

impl Config {
    /// Resolve defaults, then `config.toml`, then `CMS_*` env vars
    /// (`__` separates sections, e.g. `CMS_ADMIN__EMAIL`).
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("CMS_").split("__"))
    }
}
