use crate::db::site_config::SiteConfigStorage;
use crate::db::sqlite::SqlitePool;
use crate::error::CmsError;
use crate::types::Tags;
use tracing::info;

const LEGACY_CATEGORY_MARKER: &str = "migration.legacy_category";

/// Rewrite `posts.category` values that are not JSON arrays (older rows kept a
/// bare tag name there) into the canonical array encoding. Runs once per
/// database; a marker row in `site_config` records completion.
/// Returns the number of rewritten rows.
pub async fn normalize_legacy_categories(pool: &SqlitePool) -> Result<u64, CmsError> {
    let settings = SiteConfigStorage::new(pool.clone());
    if settings.get(LEGACY_CATEGORY_MARKER).await?.is_some() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, category FROM posts")
        .fetch_all(&mut *tx)
        .await?;

    let mut rewritten = 0u64;
    for (id, raw) in rows {
        if Tags::from_column(&raw).is_ok_and(|t| !t.is_empty()) {
            continue;
        }
        let encoded = Tags::from_legacy_column(&raw).to_column()?;
        sqlx::query("UPDATE posts SET category = ? WHERE id = ?")
            .bind(encoded)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        rewritten += 1;
    }
    tx.commit().await?;

    settings.set(LEGACY_CATEGORY_MARKER, "done").await?;
    if rewritten > 0 {
        info!(rewritten, "normalized legacy post categories");
    }
    Ok(rewritten)
}
