use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Article, ArticleDraft, ArticleId},
    error::ApiException,
    protocol::{ArticleWriteRequest, DataEnvelope, ErrorResponse},
};
use tracing::{debug, info};
use url::Url;

pub mod board;
pub mod error;

pub use board::{ArticleBoard, ArticleForm, SubmitAction};
pub use error::{ClientError, Result};

pub const DEFAULT_ARTICLES_URL: &str =
    "https://hopeful-desire-21262e95c7.strapiapp.com/api/articles";

/// The four requests the article views issue. Each call is one round trip:
/// no retry, no timeout, no cancellation.
#[async_trait]
pub trait ArticleHandle: Send + Sync {
    async fn list_articles(&self) -> Result<Vec<Article>>;
    async fn create_article(&self, draft: &ArticleDraft) -> Result<Article>;
    async fn update_article(&self, id: &ArticleId, draft: &ArticleDraft) -> Result<Article>;
    async fn delete_article(&self, id: &ArticleId) -> Result<()>;
}

pub struct ArticleClient {
    http: Client,
    collection_url: Url,
}

impl ArticleClient {
    pub fn new(collection_url: &str) -> Result<Self> {
        Self::with_http(Client::new(), collection_url)
    }

    pub fn with_http(http: Client, collection_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            collection_url: parse_collection_url(collection_url)?,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn item_url(&self, id: &ArticleId) -> Url {
        let mut url = self.collection_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }
}

/// Validates an http(s) collection URL and strips any trailing slash.
pub fn parse_collection_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|source| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::UnsupportedScheme {
            scheme: url.scheme().to_string(),
        });
    }
    Ok(url)
}

#[async_trait]
impl ArticleHandle for ArticleClient {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        debug!(url = %self.collection_url, "fetching articles");
        let response = self.http.get(self.collection_url.clone()).send().await?;
        let articles: Vec<Article> = read_data(response, "list").await?;
        info!(count = articles.len(), "fetched articles");
        Ok(articles)
    }

    async fn create_article(&self, draft: &ArticleDraft) -> Result<Article> {
        let response = self
            .http
            .post(self.collection_url.clone())
            .json(&ArticleWriteRequest::new(draft.clone()))
            .send()
            .await?;
        let article: Article = read_data(response, "create").await?;
        info!(article_id = %article.id, "article created");
        Ok(article)
    }

    async fn update_article(&self, id: &ArticleId, draft: &ArticleDraft) -> Result<Article> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(&ArticleWriteRequest::new(draft.clone()))
            .send()
            .await?;
        let article: Article = read_data(response, "update").await?;
        info!(article_id = %id, "article updated");
        Ok(article)
    }

    async fn delete_article(&self, id: &ArticleId) -> Result<()> {
        let response = self.http.delete(self.item_url(id)).send().await?;
        ensure_success(response).await?;
        info!(article_id = %id, "article deleted");
        Ok(())
    }
}

async fn read_data<T: DeserializeOwned>(response: Response, operation: &'static str) -> Result<T> {
    let response = ensure_success(response).await?;
    let envelope: DataEnvelope<Option<T>> = response.json().await?;
    envelope.data.ok_or(ClientError::MissingData { operation })
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let exception = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(envelope) => ApiException::from(envelope.error),
        Err(_) => ApiException::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or("request failed"),
        ),
    };
    Err(ClientError::Api(exception))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
