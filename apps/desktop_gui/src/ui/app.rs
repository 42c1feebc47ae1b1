use std::time::{Duration, Instant};

use chrono::Local;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Article, ArticleId};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::StartupConfig;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{reduce, ViewState};
use client_core::SubmitAction;

const CONTENT_MAX_WIDTH: f32 = 600.0;
const ACCENT_BLUE: egui::Color32 = egui::Color32::from_rgb(49, 130, 206);
const NOTICE_GREEN: egui::Color32 = egui::Color32::from_rgb(47, 133, 90);

enum CardAction {
    Edit(ArticleId),
    Delete(ArticleId),
}

pub struct ArticleDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    startup: StartupConfig,
    view: ViewState,
}

impl ArticleDeskApp {
    /// Builds the app and issues the initial list request.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            startup,
            view: ViewState::default(),
        };
        app.queue(BackendCommand::LoadArticles);
        app
    }

    fn queue(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.view.status);
    }

    fn process_ui_events(&mut self) {
        let now = Instant::now();
        while let Ok(event) = self.ui_rx.try_recv() {
            reduce(&mut self.view, event, now);
        }
        self.view.expire_notice(now);
    }

    fn submit_form(&mut self) {
        let cmd = match self.view.board.submit_action() {
            SubmitAction::Create(draft) => BackendCommand::CreateArticle { draft },
            SubmitAction::Update { id, draft } => BackendCommand::UpdateArticle { id, draft },
        };
        self.queue(cmd);
    }

    fn show_notice(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.view.notice.clone() else {
            return;
        };

        egui::Frame::NONE
            .fill(NOTICE_GREEN)
            .corner_radius(6.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("✔ {}", notice.message))
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").on_hover_text("Close").clicked() {
                            self.view.dismiss_notice();
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let form = &mut self.view.board.form;
        ui.add(
            egui::TextEdit::singleline(&mut form.title)
                .id_salt("article_title")
                .hint_text("Title")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);
        ui.add(
            egui::TextEdit::multiline(&mut form.description)
                .id_salt("article_description")
                .hint_text("Description")
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);

        let editing = form.is_editing();
        let label = if editing {
            "✏ Update Article"
        } else {
            "➕ Create Article"
        };
        let mut submit_clicked = false;
        let mut cancel_clicked = false;
        ui.horizontal(|ui| {
            let width = if editing {
                ui.available_width() - 96.0
            } else {
                ui.available_width()
            };
            let button = egui::Button::new(
                egui::RichText::new(label)
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(ACCENT_BLUE);
            submit_clicked = ui.add_sized([width, 34.0], button).clicked();
            if editing {
                cancel_clicked = ui.add_sized([88.0, 34.0], egui::Button::new("Cancel")).clicked();
            }
        });

        if submit_clicked {
            self.submit_form();
        } else if cancel_clicked {
            self.view.board.cancel_editing();
        }
    }

    fn show_article_card(ui: &mut egui::Ui, article: &Article) -> Option<CardAction> {
        let mut action = None;
        egui::Frame::NONE
            .stroke(egui::Stroke::new(
                1.0,
                ui.visuals().widgets.noninteractive.bg_stroke.color,
            ))
            .corner_radius(6.0)
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🗑").on_hover_text("Delete article").clicked() {
                            action = Some(CardAction::Delete(article.id.clone()));
                        }
                        if ui.button("✏").on_hover_text("Edit article").clicked() {
                            action = Some(CardAction::Edit(article.id.clone()));
                        }
                        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                            ui.label(egui::RichText::new(article.title()).heading().strong());
                            ui.label(article.description());
                            if let Some(modified) = article.last_modified() {
                                ui.label(
                                    egui::RichText::new(format!(
                                        "updated {}",
                                        modified.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                                    ))
                                    .small()
                                    .weak(),
                                );
                            }
                        });
                    });
                });
            });
        action
    }

    fn show_article_list(&mut self, ui: &mut egui::Ui) {
        let mut pending = Vec::new();
        for article in self.view.board.articles() {
            ui.push_id(article.id.to_string(), |ui| {
                if let Some(action) = Self::show_article_card(ui, article) {
                    pending.push(action);
                }
            });
            ui.add_space(10.0);
        }

        for action in pending {
            match action {
                CardAction::Edit(id) => {
                    if !self.view.board.start_editing_id(&id) {
                        tracing::debug!(article_id = %id, "edit requested for article no longer listed");
                    }
                }
                CardAction::Delete(id) => self.queue(BackendCommand::DeleteArticle { id }),
            }
        }
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(CONTENT_MAX_WIDTH);
                        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                            ui.add_space(16.0);
                            ui.horizontal(|ui| {
                                ui.heading(egui::RichText::new("Article Management").size(28.0));
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui
                                            .button("⟳ Refresh")
                                            .on_hover_text(self.startup.api_url.as_str())
                                            .clicked()
                                        {
                                            self.queue(BackendCommand::LoadArticles);
                                        }
                                    },
                                );
                            });
                            ui.add_space(12.0);
                            self.show_notice(ui);
                            self.show_form(ui);
                            ui.add_space(24.0);
                            self.show_article_list(ui);
                            ui.separator();
                            ui.small(egui::RichText::new(&self.view.status).weak());
                        });
                    });
                });
        });
    }
}

impl eframe::App for ArticleDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_main(ctx);
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
