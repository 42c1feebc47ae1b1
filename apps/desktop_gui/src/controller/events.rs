//! UI/backend events and error modeling for the desktop controller.

use client_core::ClientError;
use shared::{
    domain::{Article, ArticleId},
    error::ErrorCode,
};

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    ArticlesLoaded(Vec<Article>),
    ArticleCreated(Article),
    ArticleUpdated { target: ArticleId, article: Article },
    ArticleDeleted(ArticleId),
    Error(UiError),
}

impl UiEvent {
    /// Stable name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            UiEvent::Info(_) => "info",
            UiEvent::ArticlesLoaded(_) => "articles_loaded",
            UiEvent::ArticleCreated(_) => "article_created",
            UiEvent::ArticleUpdated { .. } => "article_updated",
            UiEvent::ArticleDeleted(_) => "article_deleted",
            UiEvent::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    NotFound,
    Validation,
    Malformed,
    Server,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    ListArticles,
    CreateArticle,
    UpdateArticle,
    DeleteArticle,
}

impl UiErrorContext {
    pub fn operation(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "backend_startup",
            UiErrorContext::ListArticles => "list",
            UiErrorContext::CreateArticle => "create",
            UiErrorContext::UpdateArticle => "update",
            UiErrorContext::DeleteArticle => "delete",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    article_id: Option<ArticleId>,
    message: String,
}

impl UiError {
    pub fn from_client_error(
        context: UiErrorContext,
        article_id: Option<ArticleId>,
        err: &ClientError,
    ) -> Self {
        let category = match err {
            ClientError::Transport(inner) if inner.is_decode() => UiErrorCategory::Malformed,
            ClientError::Transport(_) => UiErrorCategory::Transport,
            ClientError::Api(api) => match api.code {
                ErrorCode::Unauthorized | ErrorCode::Forbidden => UiErrorCategory::Auth,
                ErrorCode::NotFound => UiErrorCategory::NotFound,
                ErrorCode::Validation => UiErrorCategory::Validation,
                ErrorCode::RateLimited | ErrorCode::Internal => UiErrorCategory::Server,
            },
            ClientError::MissingData { .. } => UiErrorCategory::Malformed,
            ClientError::InvalidBaseUrl { .. } | ClientError::UnsupportedScheme { .. } => {
                UiErrorCategory::Validation
            }
        };

        Self {
            category,
            context,
            article_id,
            message: err.to_string(),
        }
    }

    /// The backend worker could not start, so no request was attempted.
    pub fn startup_failure(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context: UiErrorContext::BackendStartup,
            article_id: None,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn article_id(&self) -> Option<&ArticleId> {
        self.article_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ApiException;

    #[test]
    fn startup_failure_is_unknown_whatever_the_wording() {
        let err = UiError::startup_failure(
            "backend worker startup failure: failed to build runtime: invalid thread count, connection refused",
        );

        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
        assert!(err.article_id().is_none());
        assert!(err.message().contains("failed to build runtime"));
    }

    #[test]
    fn client_errors_are_classified_by_status() {
        let err = UiError::from_client_error(
            UiErrorContext::UpdateArticle,
            Some(ArticleId::Numeric(5)),
            &ClientError::Api(ApiException::new(401, "Unauthorized")),
        );
        assert_eq!(err.category(), UiErrorCategory::Auth);
        assert_eq!(err.context().operation(), "update");

        let err = UiError::from_client_error(
            UiErrorContext::ListArticles,
            None,
            &ClientError::MissingData { operation: "list" },
        );
        assert_eq!(err.category(), UiErrorCategory::Malformed);
    }

    #[test]
    fn event_kinds_name_the_variant() {
        assert_eq!(UiEvent::ArticlesLoaded(Vec::new()).kind(), "articles_loaded");
        assert_eq!(UiEvent::ArticleDeleted(ArticleId::Numeric(1)).kind(), "article_deleted");
        assert_eq!(
            UiEvent::Error(UiError::startup_failure("boom")).kind(),
            "error"
        );
    }
}
