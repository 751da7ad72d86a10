mod display;
mod explore;

use std::time::Duration;

use anyhow::Context;
use caselaw_client::{ApiClient, ApiConfig, Target};
use caselaw_controller::{CaseState, MAX_PAGE_INDEX, SearchController, SearchState, load_case};
use caselaw_core::{BrowseParams, parse_case_id, parse_year};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use display::{BrowseView, CaseView, SearchView, SimilarList, TopicList};

#[derive(Parser)]
#[command(name = "caselaw", version, about = "Search and browse Indian Supreme Court case summaries")]
struct Cli {
    /// API base URL. Defaults to a localhost address chosen by --target.
    #[arg(long, env = "CASELAW_API_URL", global = true)]
    api_url: Option<String>,

    /// Sent as X-API-Key when the server requires one.
    #[arg(long, env = "CASELAW_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Request timeout in seconds. No timeout when unset.
    #[arg(long, env = "CASELAW_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Where the API is reached from, for the default base URL.
    #[arg(long, value_enum, default_value_t = TargetArg::Desktop, global = true)]
    target: TargetArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    Desktop,
    AndroidEmulator,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Desktop => Target::Desktop,
            TargetArg::AndroidEmulator => Target::AndroidEmulator,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Semantic search over case summaries
    Search {
        /// Query text; omit to match all cases
        query: Vec<String>,
        #[arg(long)]
        topic: Option<i64>,
        #[arg(long, value_parser = year_arg)]
        year_from: Option<i32>,
        #[arg(long, value_parser = year_arg)]
        year_to: Option<i32>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=LAST_PAGE))]
        page: u32,
    },
    /// List cases by filter only, without ranking
    Browse {
        /// Topic ids, comma-separated
        #[arg(long, value_delimiter = ',')]
        topic: Vec<i64>,
        #[arg(long, value_parser = year_arg)]
        year_from: Option<i32>,
        #[arg(long, value_parser = year_arg)]
        year_to: Option<i32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show one case with its most similar cases
    Case {
        id: String,
    },
    /// List cases similar to one case
    Similar {
        id: String,
        /// Defaults to 5
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List all topics
    Topics,
    /// Interactive search session
    Explore,
}

/// Highest one-based `--page` whose result offset still fits the API's range.
const LAST_PAGE: i64 = MAX_PAGE_INDEX as i64 + 1;

fn year_arg(s: &str) -> Result<i32, String> {
    match parse_year(s) {
        Ok(Some(y)) => Ok(y),
        Ok(None) => Err("year must not be empty".into()),
        Err(e) => Err(e.to_string()),
    }
}

fn build_client(cli: &Cli) -> anyhow::Result<ApiClient> {
    let target = Target::from(cli.target);
    let config = ApiConfig {
        base_url: cli
            .api_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| target.default_base_url().to_string()),
        api_key: cli.api_key.clone().filter(|k| !k.is_empty()),
        timeout: cli.timeout_secs.map(Duration::from_secs),
    };
    tracing::debug!(base_url = %config.base_url, "api configured");
    ApiClient::from_config(&config).context("configuring API client")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("caselaw v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let client = build_client(&cli)?;

    match cli.command {
        Command::Search {
            query,
            topic,
            year_from,
            year_to,
            page,
        } => {
            let mut controller = SearchController::new(client);
            controller.set_query(query.join(" "));
            controller.set_topic(topic);
            controller.set_year_from(year_from);
            controller.set_year_to(year_to);
            controller.search(page - 1).await;
            if let SearchState::Failed { message } = controller.state() {
                anyhow::bail!("{message}");
            }
            print!(
                "{}",
                SearchView {
                    state: controller.state(),
                    has_more: controller.has_more(),
                }
            );
        }
        Command::Browse {
            topic,
            year_from,
            year_to,
            limit,
            offset,
        } => {
            let params = BrowseParams {
                topic_ids: topic,
                year_from,
                year_to,
                limit,
                offset,
            };
            let cases = client.browse_cases(&params).await?;
            print!(
                "{}",
                BrowseView {
                    cases: &cases,
                    offset: offset.unwrap_or(0),
                }
            );
        }
        Command::Case { id } => {
            let state = CaseState::from(load_case(&client, &id).await);
            if let CaseState::Failed { message } = &state {
                anyhow::bail!("{message}");
            }
            print!("{}", CaseView(&state));
        }
        Command::Similar { id, limit } => {
            let id = parse_case_id(&id)?;
            let similar = client.get_similar_cases(id, limit).await?;
            print!("{}", SimilarList(&similar));
        }
        Command::Topics => {
            let topics = client.get_topics().await?;
            print!("{}", TopicList(&topics));
        }
        Command::Explore => explore::run(client).await?,
    }

    Ok(())
}
