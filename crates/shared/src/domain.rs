use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the content API. Numeric on most deployments,
/// string-keyed on others; either way the client never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Numeric(id) => write!(f, "{id}"),
            ArticleId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ArticleId {
    fn from(value: i64) -> Self {
        ArticleId::Numeric(value)
    }
}

impl From<&str> for ArticleId {
    /// Only canonical decimals become `Numeric`; `"007"` or `"+5"` stay text verbatim.
    fn from(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(id) if id.to_string() == value => ArticleId::Numeric(id),
            _ => ArticleId::Text(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleAttributes {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub attributes: ArticleAttributes,
}

impl Article {
    pub fn title(&self) -> &str {
        &self.attributes.title
    }

    pub fn description(&self) -> &str {
        &self.attributes.description
    }

    /// Most recent server timestamp known for this article.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.attributes
            .updated_at
            .or(self.attributes.published_at)
            .or(self.attributes.created_at)
    }
}

/// Fields sent as the body of create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl From<&Article> for ArticleDraft {
    fn from(article: &Article) -> Self {
        Self::new(article.title(), article.description())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
