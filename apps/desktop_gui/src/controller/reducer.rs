//! Applies backend events to the view state. Runs on the UI thread only.

use std::time::{Duration, Instant};

use client_core::ArticleBoard;

use crate::controller::events::{UiErrorContext, UiEvent};

pub const NOTICE_DURATION: Duration = Duration::from_millis(3000);

/// Closable confirmation shown after a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub board: ArticleBoard,
    pub notice: Option<Notice>,
    pub status: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            board: ArticleBoard::default(),
            notice: None,
            status: "Starting".to_string(),
        }
    }
}

impl ViewState {
    fn notify(&mut self, message: &str, now: Instant) {
        self.notice = Some(Notice {
            message: message.to_string(),
            expires_at: now + NOTICE_DURATION,
        });
    }

    pub fn expire_notice(&mut self, now: Instant) {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.expires_at <= now)
        {
            self.notice = None;
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

pub fn reduce(state: &mut ViewState, event: UiEvent, now: Instant) {
    match event {
        UiEvent::Info(message) => {
            state.status = message;
        }
        UiEvent::ArticlesLoaded(articles) => {
            tracing::debug!(count = articles.len(), "article list replaced");
            state.board.apply_listed(articles);
        }
        UiEvent::ArticleCreated(article) => {
            state.board.apply_created(article);
            state.notify("Article created", now);
        }
        UiEvent::ArticleUpdated { target, article } => {
            state.board.apply_updated(&target, article);
            state.notify("Article updated", now);
        }
        UiEvent::ArticleDeleted(id) => {
            state.board.apply_deleted(&id);
            state.notify("Article deleted", now);
        }
        UiEvent::Error(err) => {
            tracing::error!(
                operation = err.context().operation(),
                category = ?err.category(),
                article_id = ?err.article_id(),
                "{}",
                err.message()
            );
            if err.context() == UiErrorContext::BackendStartup {
                state.status = err.message().to_string();
            }
        }
    }
}
