use super::*;

use std::{
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use client_core::{ClientError, Result};
use crossbeam_channel::bounded;
use shared::{
    domain::{Article, ArticleAttributes, ArticleDraft, ArticleId},
    error::ApiException,
};

use crate::controller::events::UiErrorCategory;

struct FakeArticles {
    articles: Mutex<Vec<Article>>,
    reject_writes_with: Option<u16>,
}

impl FakeArticles {
    fn seeded(articles: Vec<Article>) -> Self {
        Self {
            articles: Mutex::new(articles),
            reject_writes_with: None,
        }
    }

    fn rejecting(status: u16) -> Self {
        Self {
            articles: Mutex::new(Vec::new()),
            reject_writes_with: Some(status),
        }
    }

    fn check_writable(&self) -> Result<()> {
        match self.reject_writes_with {
            Some(status) => Err(ClientError::Api(ApiException::new(status, "rejected"))),
            None => Ok(()),
        }
    }
}

fn article(id: i64, draft: &ArticleDraft) -> Article {
    Article {
        id: ArticleId::Numeric(id),
        attributes: ArticleAttributes {
            title: draft.title.clone(),
            description: draft.description.clone(),
            created_at: None,
            updated_at: None,
            published_at: None,
        },
    }
}

#[async_trait]
impl ArticleHandle for FakeArticles {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        Ok(self.articles.lock().expect("lock").clone())
    }

    async fn create_article(&self, draft: &ArticleDraft) -> Result<Article> {
        self.check_writable()?;
        let mut articles = self.articles.lock().expect("lock");
        let created = article(articles.len() as i64 + 1, draft);
        articles.push(created.clone());
        Ok(created)
    }

    async fn update_article(&self, id: &ArticleId, draft: &ArticleDraft) -> Result<Article> {
        self.check_writable()?;
        let mut articles = self.articles.lock().expect("lock");
        let existing = articles
            .iter_mut()
            .find(|existing| &existing.id == id)
            .ok_or_else(|| ClientError::Api(ApiException::new(404, "Not Found")))?;
        existing.attributes.title = draft.title.clone();
        existing.attributes.description = draft.description.clone();
        Ok(existing.clone())
    }

    async fn delete_article(&self, id: &ArticleId) -> Result<()> {
        self.check_writable()?;
        self.articles
            .lock()
            .expect("lock")
            .retain(|existing| &existing.id != id);
        Ok(())
    }
}

/// Runs `commands` through a fresh worker and returns every non-info event it emitted.
fn run_worker(client: FakeArticles, commands: Vec<BackendCommand>) -> Vec<UiEvent> {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(64);
    let worker = launch(Arc::new(client), cmd_rx, ui_tx);

    for cmd in commands {
        cmd_tx.send(cmd).expect("queue command");
    }
    drop(cmd_tx);
    worker.join().expect("worker thread");

    let mut events = Vec::new();
    while let Ok(event) = ui_rx.recv_timeout(Duration::from_millis(50)) {
        if !matches!(event, UiEvent::Info(_)) {
            events.push(event);
        }
    }
    events
}

#[test]
fn load_command_emits_article_list() {
    let seed = vec![article(1, &ArticleDraft::new("First", "one"))];

    let events = run_worker(FakeArticles::seeded(seed), vec![BackendCommand::LoadArticles]);

    assert_eq!(events.len(), 1);
    match &events[0] {
        UiEvent::ArticlesLoaded(articles) => assert_eq!(articles[0].title(), "First"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn update_event_carries_the_target_id() {
    let seed = vec![article(4, &ArticleDraft::new("Old", "old"))];

    let events = run_worker(
        FakeArticles::seeded(seed),
        vec![BackendCommand::UpdateArticle {
            id: ArticleId::Numeric(4),
            draft: ArticleDraft::new("New", "new"),
        }],
    );

    match &events[..] {
        [UiEvent::ArticleUpdated { target, article }] => {
            assert_eq!(target, &ArticleId::Numeric(4));
            assert_eq!(article.title(), "New");
        }
        other => panic!("unexpected events: {other:?}"),
    }
}

#[test]
fn create_and_delete_report_success() {
    let events = run_worker(
        FakeArticles::seeded(Vec::new()),
        vec![BackendCommand::CreateArticle {
            draft: ArticleDraft::new("Fresh", ""),
        }],
    );
    assert!(matches!(&events[..], [UiEvent::ArticleCreated(article)] if article.title() == "Fresh"));

    let events = run_worker(
        FakeArticles::seeded(vec![article(1, &ArticleDraft::default())]),
        vec![BackendCommand::DeleteArticle {
            id: ArticleId::Numeric(1),
        }],
    );
    assert!(matches!(&events[..], [UiEvent::ArticleDeleted(ArticleId::Numeric(1))]));
}

#[test]
fn failed_writes_become_error_events_with_context() {
    let events = run_worker(
        FakeArticles::rejecting(403),
        vec![BackendCommand::DeleteArticle {
            id: ArticleId::Numeric(8),
        }],
    );

    match &events[..] {
        [UiEvent::Error(err)] => {
            assert_eq!(err.context(), UiErrorContext::DeleteArticle);
            assert_eq!(err.category(), UiErrorCategory::Auth);
            assert_eq!(err.article_id(), Some(&ArticleId::Numeric(8)));
        }
        other => panic!("unexpected events: {other:?}"),
    }
}

#[test]
fn update_of_missing_article_is_not_found() {
    let events = run_worker(
        FakeArticles::seeded(Vec::new()),
        vec![BackendCommand::UpdateArticle {
            id: ArticleId::Numeric(2),
            draft: ArticleDraft::new("x", "y"),
        }],
    );

    assert!(matches!(
        &events[..],
        [UiEvent::Error(err)] if err.category() == UiErrorCategory::NotFound
    ));
}

#[test]
fn full_event_queue_drops_the_reply() {
    let (ui_tx, ui_rx) = bounded(1);
    assert!(deliver(&ui_tx, UiEvent::Info("filler".to_string())));

    assert!(!deliver(&ui_tx, UiEvent::ArticleDeleted(ArticleId::Numeric(3))));

    assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::Info(_))));
    assert!(ui_rx.try_recv().is_err());
}

#[test]
fn closed_event_queue_drops_the_reply() {
    let (ui_tx, ui_rx) = bounded::<UiEvent>(4);
    drop(ui_rx);

    assert!(!deliver(&ui_tx, UiEvent::ArticlesLoaded(Vec::new())));
}

#[test]
fn replies_beyond_queue_capacity_are_dropped_not_blocked() {
    let seed = vec![article(1, &ArticleDraft::new("Only", ""))];
    let (cmd_tx, cmd_rx) = bounded(16);
    // Room for the two startup notices plus one reply.
    let (ui_tx, ui_rx) = bounded(3);
    let worker = launch(Arc::new(FakeArticles::seeded(seed)), cmd_rx, ui_tx);

    for _ in 0..5 {
        cmd_tx.send(BackendCommand::LoadArticles).expect("queue command");
    }
    drop(cmd_tx);
    worker.join().expect("worker thread");

    let mut loaded = 0;
    while let Ok(event) = ui_rx.try_recv() {
        if matches!(event, UiEvent::ArticlesLoaded(_)) {
            loaded += 1;
        }
    }
    assert_eq!(loaded, 1);
}
