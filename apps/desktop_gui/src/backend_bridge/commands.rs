//! Backend commands queued from UI to backend worker.

use shared::domain::{ArticleDraft, ArticleId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    LoadArticles,
    CreateArticle {
        draft: ArticleDraft,
    },
    UpdateArticle {
        id: ArticleId,
        draft: ArticleDraft,
    },
    DeleteArticle {
        id: ArticleId,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadArticles => "load_articles",
            BackendCommand::CreateArticle { .. } => "create_article",
            BackendCommand::UpdateArticle { .. } => "update_article",
            BackendCommand::DeleteArticle { .. } => "delete_article",
        }
    }
}
