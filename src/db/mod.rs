//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and conversions
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool setup and post queries
//! - `site_config.rs`: keyed settings store
//! - `migrate.rs`: one-shot data fixups run at startup

pub mod migrate;
pub mod models;
pub mod schema;
pub mod site_config;
pub mod sqlite;

pub use models::DbPost;
pub use schema::SQLITE_INIT;
pub use site_config::SiteConfigStorage;
pub use sqlite::{PostStorage, SqlitePool};

use crate::error::CmsError;
use tracing::info;

/// Connect, create the schema and run pending data migrations.
pub async fn open(database_url: &str) -> Result<SqlitePool, CmsError> {
    let pool = sqlite::connect(database_url).await?;
    sqlite::init_schema(&pool).await?;
    migrate::normalize_legacy_categories(&pool).await?;
    info!(database_url, "database ready");
    Ok(pool)
}
