use crate::db::SiteConfigStorage;
use crate::error::CmsError;
use serde_json::Value;
use tracing::info;

pub const REVIEW_COUNT_KEY: &str = "review_count";

/// Get-or-create access to the review counter stored in `site_config`.
#[derive(Clone)]
pub struct SiteConfigAccessor {
    storage: SiteConfigStorage,
    default_review_count: i64,
}

impl SiteConfigAccessor {
    pub fn new(storage: SiteConfigStorage, default_review_count: i64) -> Self {
        Self {
            storage,
            default_review_count,
        }
    }

    /// Current count; seeds the default on first access.
    pub async fn get_review_count(&self) -> Result<i64, CmsError> {
        let raw = self
            .storage
            .get_or_insert(REVIEW_COUNT_KEY, &self.default_review_count.to_string())
            .await?;
        decode_count(&raw)
    }

    /// Validate `input` and store it. Storage is untouched when validation fails.
    pub async fn set_review_count(&self, input: &Value) -> Result<i64, CmsError> {
        let count = parse_review_count(input)?;
        self.storage
            .set(REVIEW_COUNT_KEY, &count.to_string())
            .await?;
        info!(count, "review count updated");
        Ok(count)
    }
}

fn decode_count(raw: &str) -> Result<i64, CmsError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)).into())
}

/// Accepts an integer, an integral float, or a decimal string. Anything else
/// is a validation error.
pub fn parse_review_count(input: &Value) -> Result<i64, CmsError> {
    let count = match input {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    count.ok_or_else(|| CmsError::validation("newCount must be an integer"))
}
