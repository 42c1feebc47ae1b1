use serde::{Deserialize, Serialize};

use crate::{
    domain::{Article, ArticleDraft},
    error::ApiError,
};

/// Every request and response body of the content API is wrapped in `{data: ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body of `POST /articles` and `PUT /articles/{id}`.
pub type ArticleWriteRequest = DataEnvelope<ArticleDraft>;

/// `data` is nullable on the wire; a null payload on success is treated as a failure.
pub type ArticleResponse = DataEnvelope<Option<Article>>;

pub type ArticleListResponse = DataEnvelope<Option<Vec<Article>>>;

/// Failure body: `{data: null, error: {status, name, message}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}
