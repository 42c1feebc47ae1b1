//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::ArticleHandle;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Every command becomes its own task, so
/// requests overlap freely and whichever reply lands last wins.
pub fn launch(
    client: Arc<dyn ArticleHandle>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                deliver(
                    &ui_tx,
                    UiEvent::Error(UiError::startup_failure(format!(
                        "backend worker startup failure: failed to build runtime: {err}"
                    ))),
                );
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            let mut in_flight: Vec<tokio::task::JoinHandle<()>> = Vec::new();
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend picked up command");
                in_flight.retain(|task| !task.is_finished());
                in_flight.push(tokio::spawn(run_command(
                    Arc::clone(&client),
                    cmd,
                    ui_tx.clone(),
                )));
            }
            tracing::debug!("ui command queue closed; draining in-flight requests");
            for task in in_flight {
                let _ = task.await;
            }
        });
    })
}

async fn run_command(client: Arc<dyn ArticleHandle>, cmd: BackendCommand, ui_tx: Sender<UiEvent>) {
    let event = match cmd {
        BackendCommand::LoadArticles => match client.list_articles().await {
            Ok(articles) => UiEvent::ArticlesLoaded(articles),
            Err(err) => UiEvent::Error(UiError::from_client_error(
                UiErrorContext::ListArticles,
                None,
                &err,
            )),
        },
        BackendCommand::CreateArticle { draft } => match client.create_article(&draft).await {
            Ok(article) => UiEvent::ArticleCreated(article),
            Err(err) => UiEvent::Error(UiError::from_client_error(
                UiErrorContext::CreateArticle,
                None,
                &err,
            )),
        },
        BackendCommand::UpdateArticle { id, draft } => {
            match client.update_article(&id, &draft).await {
                Ok(article) => UiEvent::ArticleUpdated {
                    target: id,
                    article,
                },
                Err(err) => UiEvent::Error(UiError::from_client_error(
                    UiErrorContext::UpdateArticle,
                    Some(id),
                    &err,
                )),
            }
        }
        BackendCommand::DeleteArticle { id } => match client.delete_article(&id).await {
            Ok(()) => UiEvent::ArticleDeleted(id),
            Err(err) => UiEvent::Error(UiError::from_client_error(
                UiErrorContext::DeleteArticle,
                Some(id),
                &err,
            )),
        },
    };

    deliver(&ui_tx, event);
}

/// Hands `event` to the UI without blocking; returns `false` when it was dropped.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    let kind = event.kind();
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::error!(event = kind, "backend->ui event queue full; dropping event");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::warn!(event = kind, "ui event queue closed; dropping event");
            false
        }
    }
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
