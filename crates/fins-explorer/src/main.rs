//! FINS explorer - search and browse marine species from the terminal

use clap::{Parser, Subcommand};
use fins_explorer::render::{render_candidates, render_featured, render_record};
use fins_explorer::{
    load_featured, DetailTab, ExplorerConfig, Result, SearchOutcome, Session,
    SpeciesFinder, FEATURED_ENTRIES,
};
use semantyfish_api::CatalogClient;
use std::io::Write;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fins-explorer")]
#[command(about = "Search the SemantyFish marine species catalog")]
#[command(version)]
struct Cli {
    /// Catalog base URL, normally the FINS relay
    #[arg(long, env = "FINS_API_BASE_URL", default_value = CatalogClient::DEFAULT_BASE_URL)]
    api_base_url: String,

    /// Intro screen duration in milliseconds
    #[arg(long, env = "FINS_INTRO_MS", default_value_t = 5000)]
    intro_ms: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the full record of one species
    Species {
        id: u64,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
        /// Detail tab to print
        #[arg(long, default_value = "classification")]
        tab: DetailTab,
    },
    /// Resolve a query and print the record or the list of matches
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Print the featured species
    Featured,
    /// Interactive session (default)
    Browse,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("{}", e);
    }

    if let Err(e) = run(cli).await {
        eprintln!("Search failed: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive("fins_explorer=info".parse()?);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = ExplorerConfig {
        api_base_url: cli.api_base_url,
        intro_duration: Duration::from_millis(cli.intro_ms),
    };
    info!("Catalog: {}", config.api_base_url);

    let client = config.client();
    let mut stdout = std::io::stdout();

    match cli.command.unwrap_or(Command::Browse) {
        Command::Species { id, json, tab } => {
            let record = SpeciesFinder::new(client).open(id, None).await?;
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&record)?)?;
            } else {
                write!(stdout, "{}", render_record(&record, tab))?;
            }
        }
        Command::Search { query } => {
            match SpeciesFinder::new(client).search(&query.join(" ")).await? {
                SearchOutcome::Record(record) => {
                    write!(stdout, "{}", render_record(&record, DetailTab::default()))?
                }
                SearchOutcome::Candidates(candidates) => {
                    write!(stdout, "{}", render_candidates(&candidates))?
                }
            }
        }
        Command::Featured => {
            let cards = load_featured(&client, FEATURED_ENTRIES).await;
            write!(stdout, "{}", render_featured(&cards))?;
        }
        Command::Browse => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            Session::new(client, config.intro_duration)
                .run(input, &mut stdout)
                .await?;
        }
    }

    stdout.flush()?;
    Ok(())
}
