use serde::{Deserialize, Serialize};

/// Tag used when a legacy row carries no usable category.
pub const FALLBACK_TAG: &str = "General";

/// Ordered set of post tags: trimmed, non-blank, first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags: Vec<String> = Vec::new();
        for item in items {
            let tag = item.as_ref().trim();
            if tag.is_empty() || tags.iter().any(|t| t == tag) {
                continue;
            }
            tags.push(tag.to_string());
        }
        Self(tags)
    }

    /// Interpret a category string as sent by clients: a JSON-encoded array of
    /// strings, or otherwise a single plain tag. May come back empty.
    pub fn from_category(raw: &str) -> Self {
        match serde_json::from_str::<Vec<String>>(raw) {
            Ok(list) => Self::new(list),
            Err(_) => Self::new([raw]),
        }
    }

    /// Like [`Tags::from_category`], but never empty.
    pub fn from_legacy_column(raw: &str) -> Self {
        let tags = Self::from_category(raw);
        if tags.is_empty() {
            Self(vec![FALLBACK_TAG.to_string()])
        } else {
            tags
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Canonical column encoding: a JSON array.
    pub fn to_column(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    /// Decode the canonical column encoding. Fails on anything but an array of strings.
    pub fn from_column(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Vec<String>>(raw).map(Self::new)
    }
}

impl From<Vec<String>> for Tags {
    fn from(v: Vec<String>) -> Self {
        Self::new(v)
    }
}

impl From<Tags> for Vec<String> {
    fn from(t: Tags) -> Self {
        t.0
    }
}

/// Category as it arrives on the wire: either a real array or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryInput {
    List(Vec<String>),
    Text(String),
}

impl From<CategoryInput> for Tags {
    fn from(input: CategoryInput) -> Self {
        match input {
            CategoryInput::List(list) => Tags::new(list),
            CategoryInput::Text(raw) => Tags::from_category(&raw),
        }
    }
}
