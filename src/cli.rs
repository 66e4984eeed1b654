//! Command-line surface of `nova`.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use thiserror::Error;

use crate::api::{HttpSearchApi, SearchApi};
use crate::config::Config;
use crate::model::{ArticleId, EmbeddingType};
use crate::search::{Orchestrator, ResponseOrdering};
use crate::ui::components::theme::ThemePalette;
use crate::ui::presenter::{ENTER_QUERY_TEXT, NO_MATCHES_TEXT, article_view, result_subtitle};
use crate::ui::rich_text::TrustedHtml;
use crate::ui::tui::{self, App};

#[derive(Parser, Debug)]
#[command(
    name = "nova",
    version,
    about = "Search the ContactNova knowledge base from the terminal",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Whether this invocation hands the terminal to the interactive UI.
    pub fn is_interactive(&self) -> bool {
        match &self.command {
            None => true,
            Some(Command::Tui { once, .. }) => !*once,
            Some(_) => false,
        }
    }
}

/// Settings that take precedence over the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Config file (default: platform config dir, e.g. ~/.config/nova/config.toml)
    #[arg(long, global = true, env = "NOVA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the search backend
    #[arg(long, global = true, env = "NOVA_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Embedding type used for searches and article lookups
    #[arg(long, global = true, value_enum, env = "NOVA_EMBEDDING_TYPE")]
    pub embedding_type: Option<EmbeddingType>,

    /// Route searches through the AI-validation endpoint
    #[arg(
        long,
        global = true,
        env = "NOVA_AI_VALIDATION",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub ai_validation: bool,

    /// How completions of overlapping searches are reconciled
    #[arg(long, global = true, value_enum, env = "NOVA_RESPONSE_ORDERING")]
    pub ordering: Option<ResponseOrdering>,

    /// Maximum number of results requested from the backend
    #[arg(long, global = true, env = "NOVA_SEARCH_LIMIT")]
    pub limit: Option<u32>,

    /// Use the light palette in the interactive UI
    #[arg(long, global = true)]
    pub light: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(embedding_type) = self.embedding_type {
            config.embedding_type = embedding_type;
        }
        if self.ai_validation {
            config.ai_validation = true;
        }
        if let Some(ordering) = self.ordering {
            config.response_ordering = ordering;
        }
        if let Some(limit) = self.limit {
            config.limit = Some(limit);
        }
    }

    fn palette(&self) -> ThemePalette {
        if self.light {
            ThemePalette::light()
        } else {
            ThemePalette::dark()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive search UI (default)
    Tui {
        /// Render one frame and exit; requires TUI_HEADLESS=1 when stdout is not a terminal
        #[arg(long)]
        once: bool,

        /// Search for this query on startup
        #[arg(long)]
        query: Option<String>,
    },
    /// Run one search and print the results
    Search {
        query: String,

        /// Restrict results to one group
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// List the available groups
    Categories {
        #[arg(long)]
        json: bool,
    },
    /// Print one article
    Article {
        id: String,

        #[arg(long)]
        json: bool,

        /// Print the HTML body verbatim
        #[arg(long, conflicts_with = "json")]
        raw: bool,
    },
}

/// Failures with a dedicated exit code.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("TUI is disabled: stdout is not a terminal (use a subcommand such as `nova search`)")]
    TuiDisabled,

    #[error("article {0} could not be loaded")]
    ArticleUnavailable(String),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::TuiDisabled => 2,
            CliError::ArticleUnavailable(_) => 3,
        }
    }
}

pub async fn execute(cli: Cli) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let mut config = Config::load(cli.overrides.config.as_deref())?;
    cli.overrides.apply(&mut config);
    tracing::debug!(?config, "resolved configuration");

    let api = HttpSearchApi::new(&config.base_url)?;
    let palette = cli.overrides.palette();

    match cli.command {
        None => run_tui(api, &config, palette, false, None).await,
        Some(Command::Tui { once, query }) => {
            run_tui(api, &config, palette, once, query.as_deref()).await
        }
        Some(Command::Search {
            query,
            category,
            json,
        }) => run_search(api, &config, query, category, json).await,
        Some(Command::Categories { json }) => run_categories(api, &config, json).await,
        Some(Command::Article { id, json, raw }) => run_article(api, &config, &id, json, raw).await,
    }
}

fn headless() -> bool {
    std::env::var("TUI_HEADLESS").is_ok_and(|v| v == "1")
}

async fn run_tui<A: SearchApi>(
    api: A,
    config: &Config,
    palette: ThemePalette,
    once: bool,
    query: Option<&str>,
) -> Result<()> {
    let headless = once && headless();
    if !headless && !std::io::stdout().is_terminal() {
        return Err(CliError::TuiDisabled.into());
    }

    let mut app = App::new(Orchestrator::new(api, config.initial_state()), palette);
    app.start(query);

    if once {
        let screen = tui::render_once(&mut app, 120, 30).await?;
        println!("{screen}");
        return Ok(());
    }

    tracing::info!(base_url = %config.base_url, "starting interactive UI");
    // The event loop polls the terminal synchronously.
    tokio::task::block_in_place(|| tui::run_interactive(app))
}

async fn run_search<A: SearchApi>(
    api: A,
    config: &Config,
    query: String,
    category: Option<String>,
    json: bool,
) -> Result<()> {
    let mut orchestrator = Orchestrator::new(api, config.initial_state());
    orchestrator.state_mut().set_query(query);
    orchestrator.state_mut().set_category(category);
    let issued = orchestrator.submit_search().is_some();
    orchestrator.settle().await;

    let state = orchestrator.state();
    if json {
        println!("{}", serde_json::to_string_pretty(state.results())?);
        return Ok(());
    }

    if state.results().is_empty() {
        let message = if issued {
            NO_MATCHES_TEXT
        } else {
            ENTER_QUERY_TEXT
        };
        println!("{}", message.dimmed());
        return Ok(());
    }

    for (idx, result) in state.results().iter().enumerate() {
        let score = result
            .score
            .map(|s| format!(" [{s:.2}]").dimmed().to_string())
            .unwrap_or_default();
        println!("{:>3}. {}{}", idx + 1, result.question.bold(), score);
        println!(
            "     {}  {}",
            result_subtitle(result).dimmed(),
            format!("(id {})", result.id).dimmed()
        );
    }
    Ok(())
}

async fn run_categories<A: SearchApi>(api: A, config: &Config, json: bool) -> Result<()> {
    let mut orchestrator = Orchestrator::new(api, config.initial_state());
    orchestrator.load_categories();
    orchestrator.settle().await;

    let categories = orchestrator.state().categories();
    if json {
        println!("{}", serde_json::to_string_pretty(categories)?);
    } else {
        for category in categories {
            println!("{category}");
        }
    }
    Ok(())
}

async fn run_article<A: SearchApi>(
    api: A,
    config: &Config,
    id: &str,
    json: bool,
    raw: bool,
) -> Result<()> {
    let mut orchestrator = Orchestrator::new(api, config.initial_state());
    orchestrator.select_article(ArticleId::from(id));
    orchestrator.settle().await;

    let Some(article) = orchestrator.state().selected_article() else {
        return Err(CliError::ArticleUnavailable(id.to_string()).into());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(article)?);
    } else if raw {
        println!("{}", TrustedHtml::new(&article.answer).raw());
    } else {
        let view = article_view(article);
        println!("{}", view.title.bold().red());
        println!("[{}]  [{}]", view.group_chip.red(), view.topic_chip);
        println!();
        for line in &view.body {
            println!("{line}");
        }
    }
    Ok(())
}
