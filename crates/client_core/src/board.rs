//! In-memory article list plus the form that edits it.
//!
//! The board only changes in response to a successful server reply or a
//! purely local form action. A failed request never reaches it, so prior
//! state stays exactly as displayed.

use shared::domain::{Article, ArticleDraft, ArticleId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleForm {
    pub title: String,
    pub description: String,
    editing: Option<ArticleId>,
}

impl ArticleForm {
    pub fn editing_id(&self) -> Option<&ArticleId> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn draft(&self) -> ArticleDraft {
        ArticleDraft::new(self.title.clone(), self.description.clone())
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.editing = None;
    }
}

/// Request the form submit button issues for the current editing marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    Create(ArticleDraft),
    Update { id: ArticleId, draft: ArticleDraft },
}

#[derive(Debug, Clone, Default)]
pub struct ArticleBoard {
    articles: Vec<Article>,
    pub form: ArticleForm,
}

impl ArticleBoard {
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn find(&self, id: &ArticleId) -> Option<&Article> {
        self.articles.iter().find(|article| &article.id == id)
    }

    pub fn submit_action(&self) -> SubmitAction {
        let draft = self.form.draft();
        match self.form.editing_id() {
            Some(id) => SubmitAction::Update {
                id: id.clone(),
                draft,
            },
            None => SubmitAction::Create(draft),
        }
    }

    pub fn start_editing(&mut self, article: &Article) {
        self.form.title = article.title().to_string();
        self.form.description = article.description().to_string();
        self.form.editing = Some(article.id.clone());
    }

    /// Looks the article up by id first; returns false when it is no longer listed.
    pub fn start_editing_id(&mut self, id: &ArticleId) -> bool {
        match self.find(id).cloned() {
            Some(article) => {
                self.start_editing(&article);
                true
            }
            None => false,
        }
    }

    pub fn cancel_editing(&mut self) {
        self.form.clear();
    }

    pub fn apply_listed(&mut self, articles: Vec<Article>) {
        self.articles = articles;
    }

    pub fn apply_created(&mut self, article: Article) {
        match self.articles.iter_mut().find(|existing| existing.id == article.id) {
            Some(existing) => *existing = article,
            None => self.articles.push(article),
        }
        self.form.title.clear();
        self.form.description.clear();
    }

    /// `target` is the id the update was issued against, captured at submit time.
    pub fn apply_updated(&mut self, target: &ArticleId, article: Article) {
        if let Some(index) = self.articles.iter().position(|existing| &existing.id == target) {
            let id = article.id.clone();
            self.articles[index] = article;
            let mut position = 0;
            self.articles.retain(|existing| {
                let keep = position == index || existing.id != id;
                position += 1;
                keep
            });
        }
        self.form.clear();
    }

    pub fn apply_deleted(&mut self, id: &ArticleId) {
        self.articles.retain(|article| &article.id != id);
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
