use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use client_core::{parse_collection_url, DEFAULT_ARTICLES_URL};
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "articles.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub api_url: String,
    pub window_title: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_ARTICLES_URL.to_string(),
            window_title: "Article Management".to_string(),
        }
    }
}

/// Optional keys accepted in `articles.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub window_title: Option<String>,
}

/// Layers defaults, then the config file, then environment, then the command line.
/// A config file that cannot be read or parsed is logged and skipped; only an
/// invalid resulting URL is an error.
pub fn load_startup_config(
    explicit_path: Option<&Path>,
    cli_api_url: Option<String>,
) -> anyhow::Result<StartupConfig> {
    let file = explicit_path
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .and_then(|path| match read_config_file(&path) {
            Ok(file) => Some(file),
            Err(err) => {
                tracing::warn!("ignoring config file '{}': {err:#}", path.display());
                None
            }
        });

    let settings = resolve_startup_config(file, |name| std::env::var(name).ok(), cli_api_url);
    parse_collection_url(&settings.api_url)
        .with_context(|| format!("invalid article API url '{}'", settings.api_url))?;
    Ok(settings)
}

pub fn resolve_startup_config(
    file: Option<FileConfig>,
    env: impl Fn(&str) -> Option<String>,
    cli_api_url: Option<String>,
) -> StartupConfig {
    let mut settings = StartupConfig::default();

    if let Some(file) = file {
        if let Some(v) = file.api_url {
            settings.api_url = v;
        }
        if let Some(v) = file.window_title {
            settings.window_title = v;
        }
    }

    if let Some(v) = non_empty(env("ARTICLES_API_URL")) {
        settings.api_url = v;
    }
    if let Some(v) = non_empty(env("APP__API_URL")) {
        settings.api_url = v;
    }

    if let Some(v) = non_empty(cli_api_url) {
        settings.api_url = v;
    }

    settings
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn read_config_file(path: &Path) -> anyhow::Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))
}

/// `./articles.toml` when present, otherwise `<config dir>/article_desk/articles.toml`.
fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|base| base.join("article_desk").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
