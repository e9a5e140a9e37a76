//! SQL DDL for initializing the CMS storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `posts`: `id` INTEGER PRIMARY KEY AUTOINCREMENT, `category` holds the tag
///   list as a JSON array, timestamps as RFC3339 text with fixed precision
/// - `site_config`: keyed settings store, `key` is the primary key so each
///   setting has at most one row
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    excerpt TEXT NULL,
    content TEXT NOT NULL,
    category TEXT NOT NULL, -- JSON array of tags
    read_time TEXT NULL,
    image TEXT NULL,
    is_featured INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL  -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_posts_listing ON posts(is_featured DESC, created_at DESC);

CREATE TABLE IF NOT EXISTS site_config (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL -- RFC3339
);
"#;
