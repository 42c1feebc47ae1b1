//! UI layer for the article desk: app shell, form, and article list.

pub mod app;

pub use app::ArticleDeskApp;
