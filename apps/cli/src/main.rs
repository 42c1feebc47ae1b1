use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ArticleClient, ArticleHandle, DEFAULT_ARTICLES_URL};
use shared::domain::{Article, ArticleDraft, ArticleId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "articles", about = "One-shot requests against an article collection")]
struct Cli {
    #[arg(long, env = "ARTICLES_API_URL", default_value = DEFAULT_ARTICLES_URL)]
    api_url: String,
    /// Print articles as JSON lines instead of plain text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Update {
        id: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let client = ArticleClient::new(&cli.api_url)?;

    match cli.command {
        Command::List => {
            let articles = client
                .list_articles()
                .await
                .context("failed to fetch articles")?;
            for article in &articles {
                println!("{}", render_article(article, cli.json)?);
            }
        }
        Command::Create { title, description } => {
            let article = client
                .create_article(&ArticleDraft::new(title, description))
                .await
                .context("failed to create article")?;
            println!("{}", render_article(&article, cli.json)?);
        }
        Command::Update {
            id,
            title,
            description,
        } => {
            let id = ArticleId::from(id.as_str());
            let article = client
                .update_article(&id, &ArticleDraft::new(title, description))
                .await
                .with_context(|| format!("failed to update article {id}"))?;
            println!("{}", render_article(&article, cli.json)?);
        }
        Command::Delete { id } => {
            let id = ArticleId::from(id.as_str());
            client
                .delete_article(&id)
                .await
                .with_context(|| format!("failed to delete article {id}"))?;
            println!("deleted article {id}");
        }
    }

    Ok(())
}

fn render_article(article: &Article, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(article)?);
    }
    Ok(format!(
        "{}\t{}\t{}",
        article.id,
        article.title(),
        article.description().replace('\n', " ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use shared::domain::ArticleAttributes;

    fn sample() -> Article {
        Article {
            id: ArticleId::Numeric(3),
            attributes: ArticleAttributes {
                title: "Hello".to_string(),
                description: "line one\nline two".to_string(),
                created_at: None,
                updated_at: None,
                published_at: None,
            },
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn plain_rendering_is_one_tab_separated_line() {
        assert_eq!(
            render_article(&sample(), false).expect("render"),
            "3\tHello\tline one line two"
        );
    }

    #[test]
    fn json_rendering_keeps_wire_shape() {
        let rendered = render_article(&sample(), true).expect("render");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(value["id"], 3);
        assert_eq!(value["attributes"]["title"], "Hello");
    }

    #[test]
    fn parses_update_with_text_id() {
        let cli = Cli::try_parse_from([
            "articles",
            "--api-url",
            "http://127.0.0.1:1337/api/articles",
            "update",
            "abc",
            "--title",
            "T",
        ])
        .expect("parse");
        match cli.command {
            Command::Update { id, description, .. } => {
                assert_eq!(ArticleId::from(id.as_str()), ArticleId::Text("abc".to_string()));
                assert!(description.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn delete_keeps_zero_padded_id_verbatim() {
        let cli = Cli::try_parse_from(["articles", "delete", "007"]).expect("parse");
        match cli.command {
            Command::Delete { id } => {
                let id = ArticleId::from(id.as_str());
                assert_eq!(id, ArticleId::Text("007".to_string()));
                assert_eq!(id.to_string(), "007");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
